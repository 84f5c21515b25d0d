use once_cell::sync::{Lazy, OnceCell};
use std::os::fd::RawFd;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// 进程级共享状态
///
/// 主流程和信号处理函数都会访问这里的字段，所以只使用原子操作和
/// 一次性初始化的快照，任何时刻观察到的都是完整状态：
/// 要么没有子进程（pid 为 0），要么恰好一个子进程。
pub struct LauncherContext {
    tty_fd: RawFd,
    child_pid: AtomicI32,
    saved_termios: OnceCell<libc::termios>,
    restored: AtomicBool,
}

static CONTEXT: Lazy<LauncherContext> = Lazy::new(|| LauncherContext::new(libc::STDIN_FILENO));

/// 信号处理函数和 panic hook 使用的全局句柄，安装处理函数前必须先调用一次
pub fn context() -> &'static LauncherContext {
    &CONTEXT
}

impl LauncherContext {
    pub fn new(tty_fd: RawFd) -> Self {
        Self {
            tty_fd,
            child_pid: AtomicI32::new(0),
            saved_termios: OnceCell::new(),
            restored: AtomicBool::new(false),
        }
    }

    pub fn tty_fd(&self) -> RawFd {
        self.tty_fd
    }

    pub fn record_child(&self, pid: u32) {
        self.child_pid.store(pid as i32, Ordering::SeqCst);
    }

    pub fn clear_child(&self) {
        self.child_pid.store(0, Ordering::SeqCst);
    }

    pub fn current_child(&self) -> Option<i32> {
        match self.child_pid.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    /// 取出并清空子进程槽位，保证同一个 pid 只被转发一次
    pub fn take_child(&self) -> Option<i32> {
        match self.child_pid.swap(0, Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    /// 保存启动时的终端属性，只有第一次调用生效
    pub fn save_terminal(&self, termios: libc::termios) -> bool {
        self.saved_termios.set(termios).is_ok()
    }

    pub fn has_terminal_snapshot(&self) -> bool {
        self.saved_termios.get().is_some()
    }

    /// 恢复终端属性，整个进程生命周期内只执行一次
    ///
    /// 只调用 tcsetattr，可在信号处理函数中使用。返回本次调用是否执行了恢复。
    pub fn restore_terminal(&self) -> bool {
        let Some(termios) = self.saved_termios.get() else {
            return false;
        };
        if self.restored.swap(true, Ordering::SeqCst) {
            return false;
        }
        unsafe {
            libc::tcsetattr(self.tty_fd, libc::TCSANOW, termios);
        }
        true
    }
}
