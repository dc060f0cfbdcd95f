//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::{GameState, GameplaySet};

/// Enemy plugin - handles enemy definitions, AI, damage and despawning.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            // Definitions are read once; the arena spawns from them later
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(
                Update,
                ai::update_enemies
                    .in_set(GameplaySet::Act)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                ai::receive_enemy_damage
                    .in_set(GameplaySet::Damage)
                    .run_if(in_state(GameState::InGame)),
            )
            // Velocity is applied on the physics clock
            .add_systems(
                FixedUpdate,
                ai::drive_enemy_bodies.run_if(in_state(GameState::InGame)),
            );
    }
}
