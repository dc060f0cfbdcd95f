//! Bullet spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::Bullet;
use crate::character::{Team, BULLET_GROUP, ENEMY_GROUP, MAP_GROUP, PLAYER_GROUP};
use crate::world::ArenaEntity;

const BULLET_RADIUS: f32 = 0.08;
const BULLET_LENGTH: f32 = 0.28;

/// Everything needed to put a bullet in flight.
#[derive(Debug, Clone, Copy)]
pub struct BulletShot {
    pub team: Team,
    pub shooter: Entity,
    pub origin: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub lifetime: f32,
}

impl BulletShot {
    /// Groups for a bullet of this team: it meets map geometry and the
    /// opposing team's bodies.
    pub fn collision_groups(&self) -> CollisionGroups {
        let targets = match self.team {
            Team::Player => ENEMY_GROUP,
            Team::Enemy => PLAYER_GROUP,
            Team::None => Group::NONE,
        };
        CollisionGroups::new(BULLET_GROUP, MAP_GROUP | targets)
    }

    fn color(&self) -> Color {
        match self.team {
            Team::Player => Color::srgb(1.0, 0.9, 0.4),
            _ => Color::srgb(0.9, 0.3, 0.8),
        }
    }
}

/// Spawn a gravity-free sensor bullet travelling along `shot.direction`.
pub fn spawn_bullet(commands: &mut Commands, shot: BulletShot) -> Entity {
    let direction = shot.direction.normalize_or_zero();
    let angle = direction.y.atan2(direction.x);

    commands
        .spawn((
            Bullet {
                team: shot.team,
                shooter: shot.shooter,
                lifetime: shot.lifetime,
                spent: false,
            },
            Sprite::from_color(shot.color(), Vec2::new(BULLET_LENGTH, BULLET_RADIUS * 2.0)),
            Transform::from_translation(shot.origin.extend(2.0))
                .with_rotation(Quat::from_rotation_z(angle)),
            RigidBody::Dynamic,
            Collider::ball(BULLET_RADIUS),
            Sensor,
            GravityScale(0.0),
            Velocity::linear(direction * shot.speed),
            shot.collision_groups(),
            ActiveEvents::COLLISION_EVENTS,
            ArenaEntity,
        ))
        .id()
}
