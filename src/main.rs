//! Space Shmup - Entry Point
//!
//! Controls:
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Shmup".to_string(),
                resolution: (600.0, 800.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(space_shmup::ShmupPlugin)

        .run();
}
