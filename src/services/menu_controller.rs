use crate::error::{LauncherError, Result};
use crate::models::{GameEntry, MenuAction, MenuKey, MenuState, ProcessInfo, ProcessStatus};
use crate::services::{GameRunner, TerminalControl};
use chrono::Utc;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, warn};
use std::io::{ErrorKind, Read, Write};

const SEPARATOR: &str = "---------------------------";

pub struct MenuController<R, W> {
    games: Vec<GameEntry>,
    state: MenuState,
    last_run: Option<ProcessInfo>,
    input: R,
    output: W,
}

impl<R: Read, W: Write> MenuController<R, W> {
    /// `games` 不能为空，启动阶段已经保证
    pub fn new(games: Vec<GameEntry>, input: R, output: W) -> Self {
        Self {
            games,
            state: MenuState::new(),
            last_run: None,
            input,
            output,
        }
    }

    /// 菜单主循环：渲染、读一个按键、状态转移或启动游戏
    ///
    /// 无论循环如何结束，返回前都恰好调用一次 `restore_mode`。
    pub fn run<G, T>(&mut self, runner: &mut G, terminal: &mut T) -> Result<()>
    where
        G: GameRunner,
        T: TerminalControl,
    {
        let result = self.event_loop(runner, terminal);
        terminal.restore_mode()?;
        result?;

        write!(
            self.output,
            "\nThank you for using the video game console! Goodbye!\n"
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn event_loop<G, T>(&mut self, runner: &mut G, terminal: &mut T) -> Result<()>
    where
        G: GameRunner,
        T: TerminalControl,
    {
        loop {
            self.render()?;

            let Some(byte) = self.read_key()? else {
                debug!("Input closed, leaving menu");
                return Ok(());
            };

            match self.state.handle(MenuKey::from_byte(byte), self.games.len()) {
                MenuAction::Stay => {}
                MenuAction::Quit => return Ok(()),
                MenuAction::Launch(index) => {
                    self.launch(index, runner);
                    if let Err(e) = terminal.resume_raw_mode() {
                        warn!("Failed to re-enter raw mode: {}", e);
                    }
                }
            }
        }
    }

    fn launch<G: GameRunner>(&mut self, index: usize, runner: &mut G) {
        let game = &self.games[index];
        let started_at = Utc::now();

        let info = match runner.run_game(game) {
            Ok((pid, status)) => {
                ProcessInfo::finished(game.name.clone(), Some(pid), status.into(), started_at)
            }
            Err(e) => {
                warn!("{}", e);
                let reason = match e {
                    LauncherError::Spawn { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                ProcessInfo::finished(
                    game.name.clone(),
                    None,
                    ProcessStatus::SpawnFailed(reason),
                    started_at,
                )
            }
        };

        self.last_run = Some(info);
    }

    fn read_key(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn menu_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "=== Video Game Console ===".to_string(),
            "Use 'w' and 's' to navigate, 'a' and 'd' to toggle, 'Enter' to select, and 'q' to quit."
                .to_string(),
            SEPARATOR.to_string(),
        ];

        let focused = self.state.focused_game();
        for (i, game) in self.games.iter().enumerate() {
            if focused == Some(i) {
                lines.push(format!(" > {} <", game.name));
            } else {
                lines.push(format!("   {}", game.name));
            }
        }

        if self.state.exit_focused {
            lines.push(" > Exit <".to_string());
        } else {
            lines.push("   Exit".to_string());
        }
        lines.push(SEPARATOR.to_string());

        if let Some(info) = &self.last_run {
            lines.push(info.to_string());
        }
        lines
    }

    fn render(&mut self) -> Result<()> {
        let lines = self.menu_lines();
        queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        for line in lines {
            queue!(self.output, Print(line), Print("\n"))?;
        }
        self.output.flush()?;
        Ok(())
    }
}
