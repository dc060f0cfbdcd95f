//! fxdx - Entry Point
//!
//! A 2D side-view action game: run, jump, hover and shoot.
//!
//! Controls:
//! - A/D: Move
//! - Space: Jump (hold in the air to hover)
//! - Arrow keys: Shoot in that direction
//! - E: Warp back to the start while standing in a warp gate
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "fxdx".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.07, 0.07, 0.1)))

        // Physics, one world unit per metre
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))

        // Our game plugin
        .add_plugins(fxdx::FxdxPlugin)

        .run();
}
