//! In-game HUD - score and high score display.

use bevy::prelude::*;

use crate::scoring::ScoreBoard;

/// Marker for the current score text.
#[derive(Component)]
pub struct ScoreText;

/// Marker for the high score text.
#[derive(Component)]
pub struct HighScoreText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(Startup, spawn_hud).add_systems(
        Update,
        update_score_text.run_if(resource_changed::<ScoreBoard>),
    );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Top edge: score on the left, high score on the right
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::all(Val::Px(16.0)),
            position_type: PositionType::Absolute,
            ..default()
        })
        .with_children(|parent| {
            spawn_label(parent, score_label(0), ScoreText);
            spawn_label(parent, high_score_label(0), HighScoreText);
        });
}

fn spawn_label<M: Component>(parent: &mut ChildBuilder, text: String, marker: M) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.9)),
        marker,
    ));
}

fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

fn high_score_label(high_score: u32) -> String {
    format!("High: {high_score}")
}

/// Refresh both texts whenever the score board changes.
fn update_score_text(
    score: Res<ScoreBoard>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<HighScoreText>)>,
    mut high_text: Query<&mut Text, (With<HighScoreText>, Without<ScoreText>)>,
) {
    if let Ok(mut text) = score_text.get_single_mut() {
        text.0 = score_label(score.score());
    }
    if let Ok(mut text) = high_text.get_single_mut() {
        text.0 = high_score_label(score.high_score());
    }
}
