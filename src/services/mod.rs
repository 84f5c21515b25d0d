pub mod game_scanner;
pub mod menu_controller;
pub mod process_manager;
pub mod signal_bridge;
pub mod terminal_manager;

pub use game_scanner::*;
pub use menu_controller::*;
pub use process_manager::*;
pub use signal_bridge::*;
pub use terminal_manager::*;
