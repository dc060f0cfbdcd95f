//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! enemy logic only runs in the InGame state, while menu systems only run
//! in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, pickups
    #[default]
    Exploring,
    /// A warp fade is running; nobody acts until it finishes
    Warping,
}

/// Ordering of per-frame gameplay work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Ground probes and other world sensing
    Sense,
    /// Keyboard input
    Input,
    /// Controller state machines and timers
    Act,
    /// Collision events turned into hits and pickups
    Collide,
    /// Damage resolution
    Damage,
    /// Drops, pickups and visual follow-up
    Feedback,
}
