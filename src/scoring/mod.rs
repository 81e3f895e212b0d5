//! Scoring module - running score and session high score.

mod plugin;
mod score;

pub use plugin::ScoringPlugin;
pub use score::*;
