//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy movement,
//! spawning and damage only run while `InGame`; `Paused` freezes them but
//! keeps the playfield visible.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while config and data files are read
/// - Move to `InGame` once loading completes
/// - `Paused` freezes gameplay but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading config and data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
