use crate::error::{LauncherError, Result};
use crate::state::{self, LauncherContext};
use crate::utils::write_signal_goodbye;
use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{kill, sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::Pid;

/// 需要转发给子进程的信号
pub const FORWARDED_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

fn forwarded_set() -> SigSet {
    let mut set = SigSet::empty();
    for signal in FORWARDED_SIGNALS {
        set.add(signal);
    }
    set
}

pub struct SignalBridge;

impl SignalBridge {
    /// 安装 SIGINT / SIGTERM 处理函数，在启动器整个生命周期内有效
    pub fn install() -> Result<()> {
        // 先初始化全局句柄，处理函数里只做读取
        let _ = state::context();

        let action = SigAction::new(
            SigHandler::Handler(handle_signal),
            SaFlags::empty(),
            forwarded_set(),
        );
        for signal in FORWARDED_SIGNALS {
            unsafe { sigaction(signal, &action) }.map_err(LauncherError::Signal)?;
        }

        debug!("Signal handlers installed for {:?}", FORWARDED_SIGNALS);
        Ok(())
    }
}

/// 把信号转发给当前记录的子进程并等待其退出
///
/// 只使用 kill / waitpid 和原子操作，可在信号处理函数中调用。
/// 子进程已经退出时 ESRCH / ECHILD 都被忽略。返回被转发的 pid。
pub fn forward_and_reap(context: &LauncherContext, signal: Signal) -> Option<i32> {
    let pid = context.take_child()?;
    let child = Pid::from_raw(pid);

    let _ = kill(child, signal);
    loop {
        match waitpid(child, None) {
            Err(Errno::EINTR) => continue,
            _ => break,
        }
    }
    Some(pid)
}

/// 顺序固定：先回收子进程，再恢复终端，最后退出
extern "C" fn handle_signal(signo: libc::c_int) {
    let context = state::context();

    if let Ok(signal) = Signal::try_from(signo) {
        forward_and_reap(context, signal);
    }
    context.restore_terminal();
    write_signal_goodbye(signo);

    unsafe { libc::_exit(0) }
}

/// 在作用域内屏蔽转发信号
///
/// 用于 spawn 与记录 pid 之间，避免信号在子进程被记录前到达。
/// 期间到达的信号会在 drop 时递送。
pub struct SignalHold {
    mask: SigSet,
}

impl SignalHold {
    pub fn new() -> Result<Self> {
        let mask = forwarded_set();
        mask.thread_block().map_err(LauncherError::Signal)?;
        Ok(Self { mask })
    }
}

impl Drop for SignalHold {
    fn drop(&mut self) {
        let _ = self.mask.thread_unblock();
    }
}
