use chrono::{DateTime, Utc};
use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// 一次游戏运行的结果，菜单在下一次渲染时显示
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    pub game_name: String,
    pub pid: Option<u32>,
    pub status: ProcessStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    Exited(i32),
    Signaled(i32),
    SpawnFailed(String),
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ProcessStatus::Exited(code),
            (None, Some(signo)) => ProcessStatus::Signaled(signo),
            // 既无退出码也无信号（例如被停止），按失败处理
            (None, None) => ProcessStatus::Exited(-1),
        }
    }
}

impl ProcessInfo {
    pub fn finished(
        game_name: String,
        pid: Option<u32>,
        status: ProcessStatus,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            game_name,
            pid,
            status,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = (self.finished_at - self.started_at).num_seconds().max(0);
        let label = match self.pid {
            Some(pid) => format!("{} (pid {})", self.game_name, pid),
            None => self.game_name.clone(),
        };
        match &self.status {
            ProcessStatus::Exited(code) => {
                write!(f, "{} exited with code {} after {}s", label, code, secs)
            }
            ProcessStatus::Signaled(signo) => {
                write!(f, "{} was terminated by signal {} after {}s", label, signo, secs)
            }
            ProcessStatus::SpawnFailed(reason) => {
                write!(f, "Failed to start {}: {}", self.game_name, reason)
            }
        }
    }
}
