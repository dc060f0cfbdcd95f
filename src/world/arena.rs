//! Arena construction from data definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{ArenaDefinition, BlockDef, BlockKind};
use super::warp::spawn_warp_gate;
use crate::character::MAP_GROUP;
use crate::core::ScreenFade;
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_player, PlayerCamera, PlayerConfig};

/// Marker for everything that belongs to a run and is removed on the way
/// back to the title screen.
#[derive(Component, Debug, Default)]
pub struct ArenaEntity;

/// Build the arena, the camera, the player and the enemies.
pub fn setup_arena(
    mut commands: Commands,
    arena: Res<ArenaDefinition>,
    player_config: Res<PlayerConfig>,
    enemy_registry: Res<EnemyRegistry>,
) {
    info!("Building arena: {}", arena.name);

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: arena.camera_scale,
            ..OrthographicProjection::default_2d()
        },
        PlayerCamera::default(),
        Transform::from_xyz(0.0, 0.0, 100.0),
        ArenaEntity,
    ));

    for block in &arena.blocks {
        spawn_block(&mut commands, block);
    }

    if let Some(gate) = arena.warp_gate {
        spawn_warp_gate(&mut commands, &gate);
    }

    spawn_player(&mut commands, &player_config);

    for spawn in &arena.enemies {
        let definition = enemy_registry.get_or_default(&spawn.enemy_type);
        spawn_enemy(
            &mut commands,
            &definition,
            Vec2::new(spawn.position.0, spawn.position.1),
        );
    }
}

/// Spawn one static map block with its classification.
fn spawn_block(commands: &mut Commands, block: &BlockDef) {
    let half = block.half_extents();
    let mut entity = commands.spawn((
        Sprite::from_color(block.color(), half * 2.0),
        Transform::from_translation(block.center().extend(0.0))
            .with_rotation(Quat::from_rotation_z(block.angle.to_radians())),
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y),
        Friction::coefficient(0.0),
        ArenaEntity,
    ));

    match &block.kind {
        BlockKind::Ground(ground) => {
            entity.insert((*ground, CollisionGroups::new(MAP_GROUP, Group::ALL)));
        }
        BlockKind::Wall(wall) => {
            entity.insert((wall.collision_groups(), wall.clone()));
        }
    }
}

/// Remove every run entity when returning to the title screen.
pub fn cleanup_arena(
    mut commands: Commands,
    mut fade: ResMut<ScreenFade>,
    entities: Query<Entity, With<ArenaEntity>>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }
    *fade = ScreenFade::default();
}
