//! Enemies module - enemy archetypes, AI, and spawning.

mod ai;
mod components;
pub mod data;
pub mod enemy_001;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use enemy_001::{Enemy001, Enemy001State, Enemy001Tuning, EnemyCommand};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
