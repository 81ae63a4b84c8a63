pub mod renderer;

pub use renderer::{HudInfo, Renderer, PLAY_CONTROLS, WATCH_CONTROLS};
