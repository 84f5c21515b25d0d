/// 单个按键在菜单中的含义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Toggle,
    Confirm,
    Quit,
    Other,
}

impl MenuKey {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'w' => MenuKey::Up,
            b's' => MenuKey::Down,
            b'a' | b'd' => MenuKey::Toggle,
            b'\n' | b'\r' => MenuKey::Confirm,
            b'q' => MenuKey::Quit,
            _ => MenuKey::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Stay,
    Launch(usize),
    Quit,
}

/// 菜单焦点：要么某个游戏，要么 Exit
///
/// `exit_focused` 为 true 时 `selected_index` 保留上一次的游戏位置，
/// 但不表示焦点在该游戏上。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub selected_index: usize,
    pub exit_focused: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前获得焦点的游戏下标
    pub fn focused_game(&self) -> Option<usize> {
        if self.exit_focused {
            None
        } else {
            Some(self.selected_index)
        }
    }

    /// 处理一个按键，`game_count` 必须大于 0
    pub fn handle(&mut self, key: MenuKey, game_count: usize) -> MenuAction {
        debug_assert!(game_count > 0);
        let last = game_count.saturating_sub(1);

        match key {
            MenuKey::Up => {
                if self.exit_focused {
                    self.exit_focused = false;
                    self.selected_index = last;
                } else if self.selected_index > 0 {
                    self.selected_index -= 1;
                } else {
                    self.exit_focused = true;
                }
                MenuAction::Stay
            }
            MenuKey::Down => {
                if !self.exit_focused && self.selected_index >= last {
                    self.exit_focused = true;
                } else if self.exit_focused {
                    self.exit_focused = false;
                    self.selected_index = 0;
                } else {
                    self.selected_index += 1;
                }
                MenuAction::Stay
            }
            MenuKey::Toggle => {
                self.exit_focused = !self.exit_focused;
                MenuAction::Stay
            }
            MenuKey::Confirm => match self.focused_game() {
                Some(index) => MenuAction::Launch(index),
                None => MenuAction::Quit,
            },
            MenuKey::Quit => MenuAction::Quit,
            MenuKey::Other => MenuAction::Stay,
        }
    }
}
