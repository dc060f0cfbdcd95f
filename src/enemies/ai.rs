//! Enemy behavior systems.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyLoot};
use super::enemy_001::{Enemy001, Enemy001Hit, EnemyCommand};
use crate::character::{
    ActionPaused, Animator, CharacterFrame, CharacterRig, CharacterSprite, GroundSensor, Health,
    HitStop, Knockback, PlayerRegistry, RapierBody, RapierProbe, SpriteLink, SpriteRig, Team,
    WallType, WorldProbe,
};
use crate::combat::{apply_damage, spawn_bullet, BulletShot, DamageOutcome};
use crate::core::{DamageEvent, DeathEvent, GameRng, ItemDropEvent};
use crate::player::Player;

/// Look-ahead past the body edge for walls in the walking direction.
const WALL_LOOKAHEAD: f32 = 0.1;

type SpriteParts<'w, 's> = Query<
    'w,
    's,
    (&'static mut Sprite, &'static mut Visibility, &'static mut Transform),
    (With<CharacterSprite>, Without<Enemy>, Without<Player>),
>;

/// Step every active enemy's state machine and carry out what it asks for.
#[allow(clippy::type_complexity)]
pub fn update_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    registry: Res<PlayerRegistry>,
    rapier_context: Query<&RapierContext>,
    players: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (
            Entity,
            &mut Enemy001,
            &mut HitStop,
            &mut Knockback,
            &mut Animator,
            &mut Velocity,
            &mut ExternalImpulse,
            &mut Transform,
            &GroundSensor,
            &SpriteLink,
        ),
        (With<Enemy>, Without<ActionPaused>),
    >,
    mut sprites: SpriteParts,
) {
    let probe = RapierProbe::new(rapier_context.get_single().ok());
    let target = registry
        .current()
        .and_then(|player| players.get(player).ok())
        .map(|transform| transform.translation.truncate());

    for (
        entity,
        mut enemy,
        mut hit_stop,
        mut knockback,
        mut animator,
        mut velocity,
        mut impulse,
        mut transform,
        sensor,
        link,
    ) in enemies.iter_mut()
    {
        let Ok((mut sprite, mut visibility, mut sprite_transform)) = sprites.get_mut(link.0) else {
            continue;
        };

        let mut renderer = SpriteRig {
            sprite: &mut sprite,
            visibility: &mut visibility,
            transform: &mut sprite_transform,
        };
        let mut body = RapierBody {
            velocity: &mut velocity,
            impulse: &mut impulse,
        };

        let mut frame = CharacterFrame {
            delta: time.delta_secs(),
            position: transform.translation.truncate(),
            grounded: sensor.grounded,
            hit_stop: &mut hit_stop,
            knockback: &mut knockback,
            rig: CharacterRig {
                renderer: &mut renderer,
                animator: &mut *animator,
                body: &mut body,
            },
            probe: &probe,
            rng: &mut rng.0,
        };

        let command = enemy.update(&mut frame, target);
        let position = frame.position;

        if position != transform.translation.truncate() {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }

        match command {
            Some(EnemyCommand::Fire {
                origin,
                direction,
                speed,
                lifetime,
            }) => {
                spawn_bullet(
                    &mut commands,
                    BulletShot {
                        team: Team::Enemy,
                        shooter: entity,
                        origin,
                        direction,
                        speed,
                        lifetime,
                    },
                );
            }
            Some(EnemyCommand::Despawn) => {
                debug!("Despawning enemy {:?}", entity);
                commands.entity(entity).despawn_recursive();
            }
            None => {}
        }
    }
}

/// Apply each enemy's walking velocity to its body.
pub fn drive_enemy_bodies(
    rapier_context: Query<&RapierContext>,
    walls: Query<&WallType>,
    mut enemies: Query<(
        &Enemy,
        &Enemy001,
        &HitStop,
        &Transform,
        &mut Velocity,
        Has<ActionPaused>,
    )>,
) {
    let probe = RapierProbe::new(rapier_context.get_single().ok());

    for (enemy, controller, hit_stop, transform, mut velocity, paused) in enemies.iter_mut() {
        if paused {
            velocity.linvel.x = 0.0;
            continue;
        }
        if hit_stop.is_active() {
            continue;
        }

        let center = controller.contact_center(transform.translation.truncate());
        let direction = Vec2::new(controller.facing_sign(), 0.0);
        let blocked_ahead = probe
            .raycast(center, direction, enemy.half_extents.x + WALL_LOOKAHEAD)
            .and_then(|hit| hit.entity)
            .and_then(|wall| walls.get(wall).ok())
            .is_some_and(|wall| wall.blocks(Team::Enemy, Some(enemy.kind)));

        velocity.linvel = controller.fixed_velocity(velocity.linvel, blocked_ahead);
    }
}

/// Resolve damage events aimed at enemies.
#[allow(clippy::type_complexity)]
pub fn receive_enemy_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut death_events: EventWriter<DeathEvent>,
    mut drop_events: EventWriter<ItemDropEvent>,
    mut enemies: Query<
        (
            &mut Enemy001,
            &mut Health,
            &mut HitStop,
            &mut Knockback,
            &mut Animator,
            &mut Velocity,
            &mut ExternalImpulse,
            &Transform,
            &SpriteLink,
            &EnemyLoot,
        ),
        With<Enemy>,
    >,
    mut sprites: SpriteParts,
) {
    for event in damage_events.read() {
        let Ok((
            mut enemy,
            mut health,
            mut hit_stop,
            mut knockback,
            mut animator,
            mut velocity,
            mut impulse,
            transform,
            link,
            loot,
        )) = enemies.get_mut(event.target)
        else {
            continue;
        };
        let Ok((mut sprite, mut visibility, mut sprite_transform)) = sprites.get_mut(link.0) else {
            continue;
        };

        let position = transform.translation.truncate();
        let (outcome, drop_items) = {
            let mut renderer = SpriteRig {
                sprite: &mut sprite,
                visibility: &mut visibility,
                transform: &mut sprite_transform,
            };
            let mut body = RapierBody {
                velocity: &mut velocity,
                impulse: &mut impulse,
            };
            let mut rig = CharacterRig {
                renderer: &mut renderer,
                animator: &mut *animator,
                body: &mut body,
            };
            let mut hooks = Enemy001Hit {
                enemy: &mut enemy,
                hit_stop: &mut hit_stop,
                knockback: &mut knockback,
                rig: &mut rig,
                position,
                drop_items: false,
            };
            let outcome = apply_damage(&mut health, &mut hooks, event.amount, event.hit_position);
            (outcome, hooks.drop_items)
        };

        match outcome {
            DamageOutcome::Killed => {
                sprite_transform.rotation = Quat::from_rotation_z(-FRAC_PI_2);
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: Some(event.source),
                });
                if drop_items {
                    drop_events.send(ItemDropEvent {
                        position,
                        gold_min: loot.gold_min,
                        gold_max: loot.gold_max,
                    });
                }
            }
            DamageOutcome::Hurt { remaining } => {
                debug!("Enemy {:?} hit, {} HP left", event.target, remaining);
            }
            DamageOutcome::Ignored => {}
        }
    }
}
