//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::events::*;
use super::sequence::ScreenFade;
use super::states::*;

/// Shared random source for shake jitter and drop scatter.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (DamageEvent, DeathEvent, etc.)
/// - The gameplay system set ordering
/// - Pause handling for both the game and the physics pipeline
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Shared resources
            .init_resource::<GameRng>()
            .init_resource::<ScreenFade>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<LevelUpEvent>()
            .add_event::<ItemDropEvent>()

            // Gameplay ordering
            .configure_sets(
                Update,
                (
                    GameplaySet::Sense,
                    GameplaySet::Input,
                    GameplaySet::Act,
                    GameplaySet::Collide,
                    GameplaySet::Damage,
                    GameplaySet::Feedback,
                )
                    .chain(),
            )

            // Data files are read at startup, so there is nothing to wait for
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )

            // Physics only steps during gameplay
            .add_systems(OnEnter(GameState::InGame), resume_physics)
            .add_systems(OnExit(GameState::InGame), suspend_physics);
    }
}

fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
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

fn resume_physics(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.physics_pipeline_active = true;
    }
}

fn suspend_physics(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.physics_pipeline_active = false;
    }
}
