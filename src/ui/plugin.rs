//! UI plugin - HUD and pause overlay.

use bevy::prelude::*;

use super::hud;
use crate::core::GameState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(OnEnter(GameState::Paused), setup_pause_overlay)
            .add_systems(OnExit(GameState::Paused), cleanup_pause_overlay);
    }
}

/// Marker for pause overlay entities.
#[derive(Component)]
struct PauseOverlay;

/// Dim the playfield while paused.
fn setup_pause_overlay(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            PauseOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

fn cleanup_pause_overlay(mut commands: Commands, query: Query<Entity, With<PauseOverlay>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
