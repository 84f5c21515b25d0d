use crate::error::Result;
use crate::state::LauncherContext;
use log::debug;
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};
use std::io::{self, Read};
use std::os::fd::{BorrowedFd, RawFd};

/// 菜单循环对终端模式的操作
pub trait TerminalControl {
    /// 保存当前终端属性并关闭行缓冲和回显
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// 游戏返回后重新应用菜单的 raw 模式
    fn resume_raw_mode(&mut self) -> Result<()>;

    /// 恢复启动时保存的终端属性，可重复调用
    fn restore_mode(&mut self) -> Result<()>;
}

pub struct TerminalManager<'a> {
    context: &'a LauncherContext,
    raw: Option<Termios>,
}

impl<'a> TerminalManager<'a> {
    pub fn new(context: &'a LauncherContext) -> Self {
        Self { context, raw: None }
    }

    pub fn input(&self) -> TtyInput {
        TtyInput {
            fd: self.context.tty_fd(),
        }
    }

    fn fd(&self) -> BorrowedFd<'_> {
        // tty_fd 在整个进程生命周期内保持打开
        unsafe { BorrowedFd::borrow_raw(self.context.tty_fd()) }
    }
}

/// 不带缓冲地读取终端输入，游戏运行期间的按键不会被菜单预先读走
pub struct TtyInput {
    fd: RawFd,
}

impl Read for TtyInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }
}

impl TerminalControl for TerminalManager<'_> {
    fn enter_raw_mode(&mut self) -> Result<()> {
        let original = tcgetattr(self.fd())?;
        self.context.save_terminal(original.clone().into());

        // 只关闭 ICANON 和 ECHO，保留 ISIG 以便 Ctrl-C 仍然产生 SIGINT
        let mut raw = original;
        raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        tcsetattr(self.fd(), SetArg::TCSANOW, &raw)?;

        debug!("Terminal switched to non-canonical mode");
        self.raw = Some(raw);
        Ok(())
    }

    fn resume_raw_mode(&mut self) -> Result<()> {
        if let Some(raw) = &self.raw {
            tcsetattr(self.fd(), SetArg::TCSANOW, raw)?;
        }
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if self.context.restore_terminal() {
            debug!("Terminal attributes restored");
        } else if !self.context.has_terminal_snapshot() {
            debug!("No terminal snapshot to restore");
        }
        Ok(())
    }
}
