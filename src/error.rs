use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// 游戏目录无法打开，没有可提供的游戏
    #[error("Unable to open directory {path}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("No games found in the current directory.")]
    NoGames { path: PathBuf },

    /// 无法定位或进入启动器自身所在目录
    #[error("Unable to resolve launcher directory: {0}")]
    ExecutableDir(#[source] io::Error),

    #[error("Failed to start game {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for game: {0}")]
    Wait(#[source] io::Error),

    #[error("Terminal mode error: {0}")]
    Terminal(#[from] nix::errno::Errno),

    #[error("Signal setup failed: {0}")]
    Signal(#[source] nix::errno::Errno),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
