//! Score tracking.

use bevy::prelude::*;

/// Current score and the best score seen this session.
///
/// The score only ever goes up; the high score follows it whenever it is
/// strictly beaten.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
}

/// Result of awarding points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u32,
    pub new_high_score: bool,
}

impl ScoreBoard {
    /// Start from zero against a previously reached high score.
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn award(&mut self, points: u32) -> ScoreUpdate {
        self.score = self.score.saturating_add(points);
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        ScoreUpdate {
            score: self.score,
            new_high_score,
        }
    }
}
