//! Combat systems - bullet hits, bullet lifetime, death handling.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::resolver::DAMAGE_PER_HIT;
use crate::character::{Health, Team, WallType};
use crate::core::{DamageEvent, DeathEvent, GameState, GameplaySet};
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Bullets age while the game runs, warp or not
        .add_systems(
            Update,
            tick_bullets
                .in_set(GameplaySet::Act)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            detect_bullet_hits
                .in_set(GameplaySet::Collide)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            check_deaths
                .in_set(GameplaySet::Feedback)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Despawn bullets whose lifetime ran out.
fn tick_bullets(
    mut commands: Commands,
    time: Res<Time>,
    mut bullets: Query<(Entity, &mut Bullet)>,
) {
    for (entity, mut bullet) in bullets.iter_mut() {
        bullet.lifetime -= time.delta_secs();
        if bullet.lifetime <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Turn bullet collisions into damage events.
///
/// A bullet lands on the first living character of the opposing team it
/// touches, or disappears into a wall. Dead characters let bullets through.
fn detect_bullet_hits(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    mut bullets: Query<(&mut Bullet, &Transform)>,
    targets: Query<(&Team, &Health)>,
    walls: Query<(), With<WallType>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        for (bullet_entity, other) in [(*a, *b), (*b, *a)] {
            let Ok((mut bullet, transform)) = bullets.get_mut(bullet_entity) else {
                continue;
            };
            if bullet.spent {
                continue;
            }

            if let Ok((team, health)) = targets.get(other) {
                if health.is_dead() || !bullet.team.is_hostile_to(*team) {
                    continue;
                }
                damage_events.send(DamageEvent {
                    target: other,
                    source: bullet.shooter,
                    amount: DAMAGE_PER_HIT,
                    hit_position: transform.translation.truncate(),
                });
            } else if !walls.contains(other) {
                continue;
            }

            bullet.spent = true;
            commands.entity(bullet_entity).despawn_recursive();
        }
    }
}

/// Move to the game over screen when the player dies.
fn check_deaths(
    mut death_events: EventReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if players.contains(event.entity) {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        } else {
            info!("Enemy {:?} defeated", event.entity);
        }
    }
}
