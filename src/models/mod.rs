pub mod game;
pub mod menu;
pub mod process_info;
pub mod settings;

pub use game::*;
pub use menu::*;
pub use process_info::*;
pub use settings::*;
