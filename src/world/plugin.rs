//! World plugin - arena loading, setup and the warp gate.

use bevy::prelude::*;

use super::arena::{cleanup_arena, setup_arena};
use super::data::ArenaDefinition;
use super::warp;
use crate::core::{load_or_default, GameState, GameplaySet, PlayState};

/// World plugin - handles the arena and warping.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_arena_definition)
            // The arena lives for a whole run, pauses and game overs included
            .add_systems(OnExit(GameState::MainMenu), setup_arena)
            .add_systems(OnEnter(GameState::MainMenu), cleanup_arena)
            .add_systems(
                Update,
                warp::detect_warp_range
                    .in_set(GameplaySet::Collide)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                warp::start_warp
                    .in_set(GameplaySet::Input)
                    .run_if(in_state(PlayState::Exploring)),
            )
            .add_systems(
                Update,
                warp::run_warp_sequence
                    .in_set(GameplaySet::Act)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

fn load_arena_definition(mut commands: Commands) {
    commands.insert_resource(load_or_default::<ArenaDefinition>(ArenaDefinition::PATH));
}
