//! Enemy-related components.

use bevy::prelude::*;

use crate::character::EnemyKind;

/// Marker component for all enemies, with the archetype walls filter on.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Half the body size, used by the forward wall probe.
    pub half_extents: Vec2,
}

/// Gold range dropped on death.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyLoot {
    pub gold_min: u32,
    pub gold_max: u32,
}
