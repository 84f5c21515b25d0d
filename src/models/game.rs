use std::path::PathBuf;

/// 扫描阶段发现的一个游戏，发现后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    pub name: String,
    pub executable_path: PathBuf,
}

impl GameEntry {
    pub fn new(name: String, executable_path: PathBuf) -> Self {
        Self {
            name,
            executable_path,
        }
    }
}
