//! Global events used for cross-system communication.
//!
//! Bullet hits become DamageEvents, the owning archetype resolves them, and
//! deaths, drops and pickups fan out from there.

use bevy::prelude::*;

use crate::items::ItemKind;

/// Sent when a bullet (or any other source) hits a character.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Hit points to subtract
    pub amount: i32,
    /// World position of the impact, used for knockback direction
    pub hit_position: Vec2,
}

/// Sent once when a character's health reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that dealt the final hit
    pub killed_by: Option<Entity>,
}

/// Sent when the player collects an item.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemPickupEvent {
    pub item: Entity,
    pub player: Entity,
    pub kind: ItemKind,
    pub amount: u32,
}

/// Sent when the player levels up.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelUpEvent {
    /// The player entity
    pub player: Entity,
    /// New level
    pub new_level: u32,
}

/// Sent when a defeated enemy drops its loot.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemDropEvent {
    /// Where the enemy died
    pub position: Vec2,
    pub gold_min: u32,
    pub gold_max: u32,
}
