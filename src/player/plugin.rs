//! Player plugin - input, movement, damage and camera.

use bevy::prelude::*;

use super::systems;

/// Player plugin - handles player config, control and respawn.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_player_systems(app);
    }
}
