//! Core plugin that sets up game states, events, config and basic flow.

use bevy::prelude::*;

use super::config::*;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (ImpactEvent, ShipDestroyed)
/// - The gameplay config resource
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<ImpactEvent>()
            .add_event::<ShipDestroyed>()

            // Config must exist before any other plugin's startup systems read it
            .add_systems(PreStartup, load_game_config)

            // Loading state - data files are read by Startup systems of the
            // other plugins, so we can move on immediately
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Movement is a function of elapsed time, so the clock stops
            // while paused
            .add_systems(OnEnter(GameState::Paused), pause_time)
            .add_systems(OnExit(GameState::Paused), resume_time)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            );
    }
}

/// Transition from Loading to InGame.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn pause_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
