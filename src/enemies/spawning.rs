//! Enemy spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyLoot};
use super::data::EnemyDefinition;
use super::enemy_001::Enemy001;
use crate::character::{
    Animator, CharacterSprite, GroundSensor, Health, HitStop, Knockback, SpriteLink, Team,
};
use crate::world::ArenaEntity;

const GROUND_CHECK_DISTANCE: f32 = 0.1;

/// Spawn one enemy from its definition, standing at `position`.
pub fn spawn_enemy(commands: &mut Commands, definition: &EnemyDefinition, position: Vec2) -> Entity {
    let half = definition.half_extents();

    let sprite = commands
        .spawn((
            CharacterSprite,
            Animator::default(),
            Sprite::from_color(definition.sprite_color(), half * 2.0),
            Transform::default(),
            Visibility::Inherited,
        ))
        .id();

    let enemy = commands
        .spawn((
            Name::new(definition.name.clone()),
            Enemy {
                kind: definition.kind,
                half_extents: half,
            },
            EnemyLoot {
                gold_min: definition.gold_min,
                gold_max: definition.gold_max,
            },
            Enemy001::new(definition.tuning),
            Team::Enemy,
            definition.status,
            Health::from_status(&definition.status),
            HitStop::default(),
            Knockback::new(definition.tuning.knockback.resistance, half.x),
            Animator::default(),
            GroundSensor::new(half, GROUND_CHECK_DISTANCE),
            SpriteLink(sprite),
            ArenaEntity,
        ))
        .insert((
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            ExternalImpulse::default(),
            Friction::coefficient(0.0),
            Team::Enemy.body_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .add_child(sprite)
        .id();

    debug!("Spawned {} at {:?}", definition.name, position);
    enemy
}
