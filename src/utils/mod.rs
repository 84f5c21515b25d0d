pub mod launcher_dir;
pub mod signal_write;

pub use launcher_dir::*;
pub use signal_write::*;
