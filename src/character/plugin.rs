//! Character plugin - ground sensing, animator playback and action pause.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ActionPaused, CharacterSprite, GroundSensor};
use super::hit_stop::HitStop;
use super::registry::PlayerRegistry;
use super::surfaces::{Animator, AnimatorSurface, RapierProbe, WorldProbe};
use super::team::{GroundType, Team};
use crate::core::{GameState, GameplaySet, PlayState};

/// Sprite squash while walking.
const WALK_BOB_RATE: f32 = 14.0;
const WALK_BOB_AMOUNT: f32 = 0.06;

/// Character plugin - systems every archetype relies on.
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerRegistry>()
            .add_systems(
                Update,
                update_ground_sensors
                    .in_set(GameplaySet::Sense)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (propagate_animator_state, animate_character_sprites)
                    .chain()
                    .in_set(GameplaySet::Feedback)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(PlayState::Warping), pause_characters)
            .add_systems(OnExit(PlayState::Warping), resume_characters);
    }
}

/// Probe the ground under every character.
fn update_ground_sensors(
    rapier_context: Query<&RapierContext>,
    grounds: Query<&GroundType>,
    mut sensors: Query<(&Transform, &mut GroundSensor)>,
) {
    let probe = RapierProbe::new(rapier_context.get_single().ok());

    for (transform, mut sensor) in sensors.iter_mut() {
        let hit = probe.boxcast_down(
            transform.translation.truncate(),
            sensor.half_extents,
            sensor.distance,
        );
        sensor.grounded = hit.is_some();
        sensor.ground = hit
            .and_then(|hit| hit.entity)
            .and_then(|entity| grounds.get(entity).ok().copied());
    }
}

/// Copy each character's animator onto the animator of its sprite child, so
/// a speed change on the root (hit-stop, pause) reaches every animated part.
fn propagate_animator_state(
    roots: Query<(&Animator, &Children), Without<CharacterSprite>>,
    mut parts: Query<&mut Animator, With<CharacterSprite>>,
) {
    for (animator, children) in roots.iter() {
        for &child in children.iter() {
            if let Ok(mut part) = parts.get_mut(child) {
                part.mirror(animator);
            }
        }
    }
}

/// Advance sprite animators and apply the walk squash.
fn animate_character_sprites(
    time: Res<Time>,
    mut parts: Query<(&mut Animator, &mut Transform), With<CharacterSprite>>,
) {
    for (mut animator, mut transform) in parts.iter_mut() {
        animator.advance(time.delta_secs());

        let walking = animator.get_bool("isMove") || animator.get_bool("isMoving");
        let bob = if walking {
            (animator.clock() * WALK_BOB_RATE).sin() * WALK_BOB_AMOUNT
        } else {
            0.0
        };
        transform.scale = Vec3::new(1.0 - bob, 1.0 + bob, 1.0);
    }
}

/// Freeze every character while an event runs.
fn pause_characters(
    mut commands: Commands,
    mut characters: Query<(Entity, &mut Animator, &mut Velocity), With<Team>>,
) {
    for (entity, mut animator, mut velocity) in characters.iter_mut() {
        commands.entity(entity).insert(ActionPaused);
        animator.set_speed(0.0);
        velocity.linvel.x = 0.0;
    }
    debug!("characters paused");
}

/// A hit-stop still running when the pause ends keeps its slowed playback.
fn resumed_speed(hit_stop: Option<&HitStop>) -> f32 {
    hit_stop.map_or(1.0, HitStop::animation_speed)
}

fn resume_characters(
    mut commands: Commands,
    mut characters: Query<(Entity, &mut Animator, Option<&HitStop>), With<ActionPaused>>,
) {
    for (entity, mut animator, hit_stop) in characters.iter_mut() {
        commands.entity(entity).remove::<ActionPaused>();
        animator.set_speed(resumed_speed(hit_stop));
    }
    debug!("characters resumed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::hit_stop::HitStopRole;
    use crate::character::testing::MockRig;

    #[test]
    fn resume_keeps_a_running_hit_stop_frozen() {
        let mut mocks = MockRig::default();
        let mut hit_stop = HitStop::default();
        hit_stop.begin(0.1, 0.1, HitStopRole::Victim, &mut mocks.rig());
        assert_eq!(resumed_speed(Some(&hit_stop)), 0.0);

        hit_stop.begin(0.1, 0.1, HitStopRole::DeathBlow, &mut mocks.rig());
        assert_eq!(resumed_speed(Some(&hit_stop)), 0.2);
    }

    #[test]
    fn resume_plays_at_full_speed_without_a_hit_stop() {
        assert_eq!(resumed_speed(None), 1.0);
        assert_eq!(resumed_speed(Some(&HitStop::default())), 1.0);
    }
}
