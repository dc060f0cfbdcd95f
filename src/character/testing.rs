//! In-memory surfaces for driving character logic in unit tests.

use std::collections::HashMap;

use bevy::prelude::*;

use super::surfaces::{
    AnimatorSurface, CharacterRig, PhysicsBody, ProbeHit, RendererSurface, WorldProbe,
};

#[derive(Debug, Clone)]
pub struct MockRenderer {
    pub visible: bool,
    pub flip_x: bool,
    pub position: Vec3,
    pub toggles: usize,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self {
            visible: true,
            flip_x: false,
            position: Vec3::ZERO,
            toggles: 0,
        }
    }
}

impl RendererSurface for MockRenderer {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.toggles += 1;
        }
        self.visible = visible;
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

#[derive(Debug, Clone)]
pub struct MockAnimator {
    pub params: HashMap<&'static str, bool>,
    pub speed: f32,
}

impl Default for MockAnimator {
    fn default() -> Self {
        Self {
            params: HashMap::new(),
            speed: 1.0,
        }
    }
}

impl MockAnimator {
    pub fn get(&self, name: &str) -> bool {
        self.params.get(name).copied().unwrap_or(false)
    }
}

impl AnimatorSurface for MockAnimator {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.params.insert(name, value);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockBody {
    pub velocity: Vec2,
    pub impulses: Vec<Vec2>,
}

impl PhysicsBody for MockBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.impulses.push(impulse);
    }
}

/// A flat (or tilted) floor at `ground_height`, optionally ending at
/// `ground_end_x` (floor only where `x <= ground_end_x`), and an optional
/// vertical wall at `wall_x`.
#[derive(Debug, Clone)]
pub struct MockWorld {
    pub ground_height: Option<f32>,
    pub ground_end_x: Option<f32>,
    pub ground_normal: Vec2,
    pub wall_x: Option<f32>,
}

impl MockWorld {
    pub fn flat(height: f32) -> Self {
        Self {
            ground_height: Some(height),
            ground_end_x: None,
            ground_normal: Vec2::Y,
            wall_x: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            ground_height: None,
            ground_end_x: None,
            ground_normal: Vec2::Y,
            wall_x: None,
        }
    }

    pub fn with_floor_ending_at(mut self, x: f32) -> Self {
        self.ground_end_x = Some(x);
        self
    }

    pub fn with_wall(mut self, x: f32) -> Self {
        self.wall_x = Some(x);
        self
    }

    pub fn with_ground_normal(mut self, normal: Vec2) -> Self {
        self.ground_normal = normal.normalize();
        self
    }
}

impl WorldProbe for MockWorld {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        let direction = direction.normalize_or_zero();

        if direction.y < -0.5 {
            let height = self.ground_height?;
            if self.ground_end_x.is_some_and(|end| origin.x > end) {
                return None;
            }
            let drop = origin.y - height;
            return (drop >= 0.0 && drop <= max_distance).then(|| ProbeHit {
                entity: None,
                point: Vec2::new(origin.x, height),
                normal: self.ground_normal,
            });
        }

        let wall_x = self.wall_x?;
        if direction.x == 0.0 {
            return None;
        }
        let distance = (wall_x - origin.x) / direction.x;
        (distance >= 0.0 && distance <= max_distance).then(|| ProbeHit {
            entity: None,
            point: Vec2::new(wall_x, origin.y),
            normal: Vec2::new(-direction.x.signum(), 0.0),
        })
    }
}

/// Owns one of each mock surface and lends them out as a [`CharacterRig`].
#[derive(Debug, Clone, Default)]
pub struct MockRig {
    pub renderer: MockRenderer,
    pub animator: MockAnimator,
    pub body: MockBody,
}

impl MockRig {
    pub fn rig(&mut self) -> CharacterRig<'_> {
        CharacterRig {
            renderer: &mut self.renderer,
            animator: &mut self.animator,
            body: &mut self.body,
        }
    }
}
