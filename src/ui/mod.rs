//! UI module - score HUD and pause overlay.

mod hud;
mod plugin;

pub use hud::{HighScoreText, ScoreText};
pub use plugin::UiPlugin;
