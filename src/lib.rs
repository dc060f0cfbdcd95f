//! fxdx - a 2D side-view action game core in Bevy.
//!
//! A player runs, jumps, hovers and shoots through a small arena while
//! enemies approach, fire back, get knocked around and drop loot.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, data loading, screen fade
//! - **Character**: Shared character machinery (hit-stop, knockback,
//!   blinking, ground probes, team collision groups, player registry)
//! - **Player**: Player controller, input, camera follow
//! - **Combat**: Bullets, damage resolution, invincibility
//! - **Enemies**: Enemy definitions, spawning and AI
//! - **Items**: Loot drops, magnet pickup, gold and experience
//! - **World**: Arena layout, walls, ground types, warp gate
//! - **UI**: Menus, HUD, fade overlay
//!
//! Gameplay logic lives in plain structs that talk to the engine through
//! small surface traits (see [`character::RendererSurface`] and friends),
//! so the rules are unit-tested without an `App`.

pub mod character;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct FxdxPlugin;

impl Plugin for FxdxPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Shared character machinery
            .add_plugins(character::CharacterPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Pickups
            .add_plugins(items::ItemPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
