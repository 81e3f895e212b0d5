//! World plugin - playfield setup and camera.

use bevy::render::camera::ScalingMode;
use bevy::prelude::*;

use super::playfield::PlayfieldBounds;
use crate::core::GameConfig;

/// World plugin - derives the playfield from config and frames it with an
/// orthographic camera looking down the -Z axis.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayfieldBounds>()
            .add_systems(Startup, (setup_playfield, setup_camera).chain());
    }
}

/// Replace the default playfield with the configured one.
fn setup_playfield(mut commands: Commands, config: Res<GameConfig>) {
    let bounds = PlayfieldBounds::from_config(&config);
    info!(
        "Playfield half extents: {} x {}",
        bounds.cam_width, bounds.cam_height
    );
    commands.insert_resource(bounds);
}

/// Spawn the camera and a key light.
fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: config.cam_height * 2.0,
            },
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_xyz(0.0, 0.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
