use nix::pty::openpty;
use nix::sys::signal::{kill, Signal};
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg};
use nix::unistd::Pid;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// 把启动器复制到临时目录，启动器会在自身所在目录里查找游戏
fn install_launcher(dir: &Path) -> PathBuf {
    let target = dir.join("game-console");
    let status = Command::new("cp")
        .arg(env!("CARGO_BIN_EXE_game-console"))
        .arg(&target)
        .status()
        .unwrap();
    assert!(status.success());
    target
}

fn install_script(dir: &Path, name: &str, body: &str) {
    let status = Command::new("sh")
        .arg("-c")
        .arg("printf '#!/bin/sh\\n%s\\n' \"$1\" > \"$2\" && chmod 755 \"$2\"")
        .arg("sh")
        .arg(body)
        .arg(dir.join(name))
        .status()
        .unwrap();
    assert!(status.success());
}

fn wait_for(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !path.exists() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", path.display());
        sleep(Duration::from_millis(20));
    }
}

fn wait_with_deadline(child: &mut Child) -> ExitStatus {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        assert!(Instant::now() < deadline, "launcher did not exit");
        sleep(Duration::from_millis(20));
    }
}

#[test]
fn interrupt_is_forwarded_to_running_game() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = install_launcher(dir.path());
    install_script(
        dir.path(),
        "game_wait",
        "trap 'echo interrupted > interrupted; exit 0' INT\n: > started\nwhile :; do sleep 0.1; done",
    );

    let mut child = Command::new(&launcher)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"\n").unwrap();
    stdin.flush().unwrap();

    wait_for(&dir.path().join("started"));
    kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).unwrap();

    let status = wait_with_deadline(&mut child);
    assert_eq!(status.code(), Some(0));

    // 子进程先收到同一个信号并被回收，启动器之后才退出
    let marker = fs::read_to_string(dir.path().join("interrupted")).unwrap();
    assert_eq!(marker.trim(), "interrupted");

    let mut output = String::new();
    child.stdout.take().unwrap().read_to_string(&mut output).unwrap();
    assert!(output.contains("> game_wait <"));
    assert!(output.ends_with("Main screen exited due to signal 2. Goodbye!\n"));
    assert!(!output.contains("Thank you for using"));
    drop(stdin);
}

#[test]
fn quit_key_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = install_launcher(dir.path());
    install_script(dir.path(), "game_noop", "exit 0");
    fs::write(dir.path().join("game_noop.c"), b"int main(void) { return 0; }\n").unwrap();

    let mut child = Command::new(&launcher)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"\nq").unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let screen = String::from_utf8_lossy(&output.stdout);
    assert!(screen.contains("game_noop (pid "));
    assert!(screen.contains("exited with code 0"));
    assert!(!screen.contains("game_noop.c"));
    assert!(screen.ends_with("Thank you for using the video game console! Goodbye!\n"));
}

#[test]
fn no_games_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = install_launcher(dir.path());

    let output = Command::new(&launcher)
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No games found in the current directory."));
}

#[test]
fn interrupt_stops_game_with_default_signal_handling() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = install_launcher(dir.path());
    // 游戏不设置任何信号处理，依赖默认动作结束
    install_script(dir.path(), "game_sleep", ": > started\nexec sleep 30");

    let mut child = Command::new(&launcher)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"\n").unwrap();

    wait_for(&dir.path().join("started"));
    // 等 sh exec 成 sleep
    sleep(Duration::from_millis(200));

    let sent_at = Instant::now();
    kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).unwrap();
    let status = wait_with_deadline(&mut child);

    assert_eq!(status.code(), Some(0));
    assert!(sent_at.elapsed() < Duration::from_secs(5));
    drop(stdin);
}

#[test]
fn interrupt_restores_terminal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = install_launcher(dir.path());
    install_script(dir.path(), "game_sleep", ": > started\nexec sleep 30");

    let pty = openpty(None, None).unwrap();
    let slave = pty.slave;
    let mut master = File::from(pty.master);

    let mut cooked = tcgetattr(&slave).unwrap();
    cooked.local_flags.insert(LocalFlags::ICANON | LocalFlags::ECHO);
    tcsetattr(&slave, SetArg::TCSANOW, &cooked).unwrap();

    let mut child = Command::new(&launcher)
        .stdin(Stdio::from(slave.try_clone().unwrap()))
        .stdout(Stdio::from(slave.try_clone().unwrap()))
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    master.write_all(b"\n").unwrap();
    wait_for(&dir.path().join("started"));

    // 游戏运行期间终端处于启动器设置的非规范模式
    let during = tcgetattr(&slave).unwrap();
    assert!(!during.local_flags.contains(LocalFlags::ICANON));
    assert!(!during.local_flags.contains(LocalFlags::ECHO));

    kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).unwrap();
    let status = wait_with_deadline(&mut child);
    assert_eq!(status.code(), Some(0));

    let after = tcgetattr(&slave).unwrap();
    assert!(after.local_flags.contains(LocalFlags::ICANON));
    assert!(after.local_flags.contains(LocalFlags::ECHO));
}
