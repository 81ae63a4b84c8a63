pub mod play;
pub mod terminal;
pub mod watch;

pub use play::PlayMode;
pub use watch::{SpectatorSpeed, WatchMode};
