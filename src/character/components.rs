//! Components shared by every character archetype.

use bevy::prelude::*;

use super::team::GroundType;

/// Link from a character root to the child entity carrying its sprite.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpriteLink(pub Entity);

/// Marker for the sprite child of a character.
#[derive(Component, Debug, Default)]
pub struct CharacterSprite;

/// Set on every character while an event (such as a warp) suspends play.
#[derive(Component, Debug, Default)]
pub struct ActionPaused;

/// Box probe under a character's feet.
#[derive(Component, Debug, Clone)]
pub struct GroundSensor {
    pub half_extents: Vec2,
    pub distance: f32,
    pub grounded: bool,
    /// Classification of the ground last stood on, if it has one.
    pub ground: Option<GroundType>,
}

impl GroundSensor {
    pub fn new(half_extents: Vec2, distance: f32) -> Self {
        Self {
            half_extents,
            distance,
            grounded: false,
            ground: None,
        }
    }
}
