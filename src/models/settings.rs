use std::path::PathBuf;

/// 游戏发现规则
#[derive(Debug, Clone)]
pub struct LauncherSettings {
    pub games_dir: PathBuf,
    pub prefix: String,
    pub source_suffix: String,
    pub max_games: usize,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            games_dir: PathBuf::from("."),
            prefix: "game_".to_string(),
            source_suffix: ".c".to_string(),
            max_games: 100,
        }
    }
}

impl LauncherSettings {
    /// 名称以前缀开头，且不是源文件
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && !file_name.ends_with(&self.source_suffix)
    }
}
