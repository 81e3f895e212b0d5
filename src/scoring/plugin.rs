//! Scoring plugin - owns the score board resource.

use bevy::prelude::*;

use super::score::ScoreBoard;

/// Scoring plugin - starts every session at zero with no high score.
pub struct ScoringPlugin;

impl Plugin for ScoringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>();
    }
}
