use crate::error::{LauncherError, Result};
use crate::models::GameEntry;
use crate::services::SignalHold;
use crate::state::LauncherContext;
use log::{debug, info};
use nix::sys::signal::SigSet;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// 菜单用来启动游戏的接口
pub trait GameRunner {
    /// 运行游戏直到结束，返回子进程 pid 和退出状态
    fn run_game(&mut self, game: &GameEntry) -> Result<(u32, ExitStatus)>;
}

pub struct ProcessManager<'a> {
    context: &'a LauncherContext,
}

/// 离开作用域时清空子进程槽位，包括出错和 panic 的情况
struct ChildSlot<'a> {
    context: &'a LauncherContext,
}

impl Drop for ChildSlot<'_> {
    fn drop(&mut self) {
        self.context.clear_child();
    }
}

impl<'a> ProcessManager<'a> {
    pub fn new(context: &'a LauncherContext) -> Self {
        Self { context }
    }

    /// 启动游戏并阻塞等待其结束
    ///
    /// 子进程继承终端（stdin/stdout/stderr）和当前工作目录，不带参数。
    /// 同一时间只跟踪一个子进程，菜单循环在返回前不会再次调用。
    pub fn start(&self, executable_path: &Path) -> Result<(u32, ExitStatus)> {
        debug_assert!(self.context.current_child().is_none());

        let mut command = Command::new(executable_path);
        // 子进程会继承 spawn 时的信号屏蔽字，exec 前清空，否则转发的信号一直挂起
        unsafe {
            command.pre_exec(|| SigSet::empty().thread_set_mask().map_err(io::Error::from));
        }

        let (mut child, slot) = {
            let _hold = SignalHold::new()?;
            let child = command
                .spawn()
                .map_err(|source| LauncherError::Spawn {
                    path: executable_path.to_path_buf(),
                    source,
                })?;
            self.context.record_child(child.id());
            (
                child,
                ChildSlot {
                    context: self.context,
                },
            )
        };

        let pid = child.id();
        debug!("Started {} (pid {})", executable_path.display(), pid);

        let status = child.wait().map_err(LauncherError::Wait);
        drop(slot);

        let status = status?;
        info!("{} (pid {}) finished: {}", executable_path.display(), pid, status);
        Ok((pid, status))
    }
}

impl GameRunner for ProcessManager<'_> {
    fn run_game(&mut self, game: &GameEntry) -> Result<(u32, ExitStatus)> {
        self.start(&game.executable_path)
    }
}
