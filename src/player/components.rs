//! Player-related components and configuration.

use bevy::prelude::*;
use serde::Deserialize;

use crate::character::CharacterStatus;

/// Marker component for the player entity.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Gold carried by the player.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerWallet {
    pub gold: u32,
}

/// Camera that tracks the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerCamera {
    /// Offset from the player to the camera centre
    pub offset: Vec2,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 1.5),
        }
    }
}

/// Player tuning, read from `assets/data/characters/player.ron`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub status: CharacterStatus,
    /// Base horizontal speed in units per second
    pub move_speed: f32,
    /// Vertical velocity set by a jump
    pub jump_force: f32,
    /// Upward impulse per second while hovering
    pub hover_force: f32,
    /// Length of the box probe below the feet
    pub ground_check_distance: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    /// Aim input magnitude needed to fire
    pub stick_fire_threshold: f32,
    /// Body width and height in world units
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    pub spawn_position: (f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            status: CharacterStatus {
                hp_max: 1000,
                ..default()
            },
            move_speed: 5.0,
            jump_force: 5.0,
            hover_force: 6.0,
            ground_check_distance: 0.1,
            bullet_speed: 10.0,
            bullet_lifetime: 3.0,
            fire_rate: 0.2,
            stick_fire_threshold: 0.9,
            size: (0.6, 0.9),
            color: (0.3, 0.6, 0.95),
            spawn_position: (-6.0, 1.0),
        }
    }
}

impl PlayerConfig {
    pub const PATH: &'static str = "assets/data/characters/player.ron";

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1) * 0.5
    }

    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.spawn_position.0, self.spawn_position.1)
    }

    pub fn sprite_color(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_ron, read_ron};

    #[test]
    fn config_overrides_merge_with_defaults() {
        let config: PlayerConfig =
            parse_ron(PlayerConfig::PATH, "(move_speed: 6.5, spawn_position: (1.0, 2.0))").unwrap();

        assert_eq!(config.move_speed, 6.5);
        assert_eq!(config.spawn_position(), Vec2::new(1.0, 2.0));
        assert_eq!(config.status.hp_max, 1000);
        assert_eq!(config.fire_rate, 0.2);
    }

    #[test]
    fn shipped_config_matches_the_defaults() {
        let config: PlayerConfig = read_ron(PlayerConfig::PATH).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }
}
