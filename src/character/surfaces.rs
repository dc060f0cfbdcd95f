//! Collaborator surfaces the combat core talks to.
//!
//! Character logic never reaches into Bevy or Rapier directly. It drives a
//! renderer, an animator, a physics body and a world probe through the traits
//! below, and the adapters at the bottom of this file bind them to the engine.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::team::{PROBE_GROUP, MAP_GROUP};

/// Visibility, facing and local offset of a character's sprite.
pub trait RendererSurface {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    fn set_flip_x(&mut self, flip: bool);
    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);
}

/// Named boolean parameters plus a playback speed scalar.
pub trait AnimatorSurface {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_speed(&mut self, speed: f32);
}

/// Linear velocity access and impulses on a rigid body.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Nearest map collider reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Option<Entity>,
    pub point: Vec2,
    pub normal: Vec2,
}

/// Ray queries against map geometry.
pub trait WorldProbe {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit>;

    /// Box probe straight down, sampled with rays at both edges and the middle
    /// of the box bottom.
    fn boxcast_down(&self, center: Vec2, half_extents: Vec2, distance: f32) -> Option<ProbeHit> {
        let bottom = center.y - half_extents.y + BOX_PROBE_SKIN;
        [0.0, -half_extents.x, half_extents.x]
            .into_iter()
            .find_map(|dx| {
                self.raycast(
                    Vec2::new(center.x + dx, bottom),
                    Vec2::NEG_Y,
                    distance + BOX_PROBE_SKIN,
                )
            })
    }
}

const BOX_PROBE_SKIN: f32 = 0.01;

/// The three mutable surfaces a hit reaction needs at once.
pub struct CharacterRig<'a> {
    pub renderer: &'a mut dyn RendererSurface,
    pub animator: &'a mut dyn AnimatorSurface,
    pub body: &'a mut dyn PhysicsBody,
}

// === Bevy adapters ===

/// Animation parameter block for a character or one of its parts.
///
/// Holds the named booleans the state machines write and a playback clock that
/// advances at `speed`, so hit-stop can freeze or slow every animated part.
#[derive(Component, Debug, Clone)]
pub struct Animator {
    params: HashMap<&'static str, bool>,
    speed: f32,
    clock: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            params: HashMap::new(),
            speed: 1.0,
            clock: 0.0,
        }
    }
}

impl Animator {
    pub fn get_bool(&self, name: &str) -> bool {
        self.params.get(name).copied().unwrap_or(false)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Playback time in seconds, scaled by speed.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn advance(&mut self, delta: f32) {
        self.clock += delta * self.speed;
    }

    /// Take over another animator's parameters and playback speed. The
    /// clock stays local.
    pub fn mirror(&mut self, source: &Animator) {
        self.params.clone_from(&source.params);
        self.speed = source.speed;
    }
}

impl AnimatorSurface for Animator {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.params.insert(name, value);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Sprite child of a character: the part that blinks, flips and shakes.
pub struct SpriteRig<'a> {
    pub sprite: &'a mut Sprite,
    pub visibility: &'a mut Visibility,
    pub transform: &'a mut Transform,
}

impl RendererSurface for SpriteRig<'_> {
    fn is_visible(&self) -> bool {
        !matches!(*self.visibility, Visibility::Hidden)
    }

    fn set_visible(&mut self, visible: bool) {
        *self.visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.sprite.flip_x = flip;
    }

    fn local_position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }
}

/// Rapier rigid body seen through its velocity and impulse components.
pub struct RapierBody<'a> {
    pub velocity: &'a mut Velocity,
    pub impulse: &'a mut ExternalImpulse,
}

impl PhysicsBody for RapierBody<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.linvel = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.impulse.impulse += impulse;
    }
}

/// Ray queries against colliders in the map collision group.
///
/// Without a physics context every query misses.
pub struct RapierProbe<'a> {
    context: Option<&'a RapierContext>,
}

impl<'a> RapierProbe<'a> {
    pub fn new(context: Option<&'a RapierContext>) -> Self {
        Self { context }
    }
}

impl WorldProbe for RapierProbe<'_> {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        let context = self.context?;
        if direction == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        let filter = QueryFilter::new().groups(CollisionGroups::new(PROBE_GROUP, MAP_GROUP));
        context
            .cast_ray_and_get_normal(origin, direction.normalize(), max_distance, true, filter)
            .map(|(entity, hit)| ProbeHit {
                entity: Some(entity),
                point: hit.point,
                normal: hit.normal,
            })
    }
}
