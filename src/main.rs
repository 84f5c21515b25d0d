mod error;
mod models;
mod services;
mod state;
mod utils;

use error::{LauncherError, Result};
use log::warn;
use models::LauncherSettings;
use services::{
    GameScanner, MenuController, ProcessManager, SignalBridge, TerminalControl, TerminalManager,
};
use std::io;
use std::panic;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    install_panic_hook();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                LauncherError::NoGames { .. } => println!("{}", e),
                _ => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    utils::enter_launcher_dir()?;

    let settings = LauncherSettings::default();
    let games = GameScanner::scan_required(&settings)?;

    // 先安装处理函数：此时还没有快照，信号到达时恢复是空操作
    SignalBridge::install()?;

    let context = state::context();
    let mut terminal = TerminalManager::new(context);
    if let Err(e) = terminal.enter_raw_mode() {
        // stdin 不是终端时仍可运行，只是按键需要回车
        warn!("Raw mode unavailable: {}", e);
    }

    let mut runner = ProcessManager::new(context);
    let mut menu = MenuController::new(games, terminal.input(), io::stdout());
    menu.run(&mut runner, &mut terminal)
}

/// panic 时先恢复终端再输出 panic 信息
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        state::context().restore_terminal();
        default_hook(info);
    }));
}
