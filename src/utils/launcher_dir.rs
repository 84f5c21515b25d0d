use crate::error::{LauncherError, Result};
use log::debug;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// 启动器可执行文件所在目录
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(LauncherError::ExecutableDir)?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            LauncherError::ExecutableDir(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })
}

/// 切换工作目录到启动器所在目录，游戏以 ./<name> 方式启动
pub fn enter_launcher_dir() -> Result<PathBuf> {
    let dir = launcher_dir()?;
    env::set_current_dir(&dir).map_err(LauncherError::ExecutableDir)?;
    debug!("Working directory set to {}", dir.display());
    Ok(dir)
}
