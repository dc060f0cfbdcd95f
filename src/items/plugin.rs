//! Item plugin - dropped gold and experience.

use bevy::prelude::*;

use super::systems;

/// Item plugin - handles drops, pickups and their rewards.
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_item_systems(app);
    }
}
