use crate::error::{LauncherError, Result};
use crate::models::{GameEntry, LauncherSettings};
use log::{debug, warn};
use walkdir::WalkDir;

pub struct GameScanner;

impl GameScanner {
    /// 扫描游戏目录（不递归），按文件系统枚举顺序返回，最多 `max_games` 个
    pub fn scan(settings: &LauncherSettings) -> Result<Vec<GameEntry>> {
        let root = settings.games_dir.as_path();
        let mut games = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                // 根目录本身打不开是致命错误，单个条目出错则跳过
                Err(err) if err.depth() == 0 => {
                    return Err(LauncherError::DirectoryUnavailable {
                        path: root.to_path_buf(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if !settings.matches(name) {
                continue;
            }

            games.push(GameEntry::new(name.to_string(), entry.path().to_path_buf()));
            if games.len() >= settings.max_games {
                break;
            }
        }

        debug!("Discovered {} games in {}", games.len(), root.display());
        Ok(games)
    }

    /// 扫描并要求至少找到一个游戏
    pub fn scan_required(settings: &LauncherSettings) -> Result<Vec<GameEntry>> {
        let games = Self::scan(settings)?;
        if games.is_empty() {
            return Err(LauncherError::NoGames {
                path: settings.games_dir.clone(),
            });
        }
        Ok(games)
    }
}
