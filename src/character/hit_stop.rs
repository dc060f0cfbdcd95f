//! Freeze-frame on impact.
//!
//! While a hit-stop runs the character's animation is stopped (or slowed),
//! its body velocity is parked, and its sprite jitters around where it was.
//! On expiry everything snaps back exactly.

use bevy::prelude::*;
use rand::{Rng, RngCore};

use super::surfaces::CharacterRig;

/// Which side of the hit this character is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStopRole {
    /// Took the hit: animation freezes completely.
    Victim,
    /// Dealt the hit: animation keeps creeping.
    Hitter,
    /// Took a killing hit: animation creeps a little faster.
    DeathBlow,
}

impl HitStopRole {
    pub fn animation_speed(self) -> f32 {
        match self {
            HitStopRole::Victim => 0.0,
            HitStopRole::Hitter => 0.1,
            HitStopRole::DeathBlow => 0.2,
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HitStop {
    active: bool,
    timer: f32,
    shake: f32,
    animation_speed: f32,
    base_position: Vec3,
    saved_velocity: Vec2,
}

impl HitStop {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Playback speed the animator should run at right now.
    pub fn animation_speed(&self) -> f32 {
        if self.active {
            self.animation_speed
        } else {
            1.0
        }
    }

    /// Start (or restart) a hit-stop of `duration` seconds.
    ///
    /// A restart only resets the timer, shake and role; the sprite position
    /// and velocity captured by the first call are the ones restored.
    pub fn begin(&mut self, duration: f32, shake: f32, role: HitStopRole, rig: &mut CharacterRig<'_>) {
        if !self.active {
            self.base_position = rig.renderer.local_position();
            self.saved_velocity = rig.body.velocity();
        }

        self.active = true;
        self.timer = duration.max(0.0);
        self.shake = shake.max(0.0);
        self.animation_speed = role.animation_speed();

        rig.body.set_velocity(Vec2::ZERO);
        rig.animator.set_speed(self.animation_speed);
    }

    /// Advance the hit-stop. The sprite shakes horizontally, and vertically
    /// too while airborne.
    pub fn update(
        &mut self,
        delta: f32,
        grounded: bool,
        rig: &mut CharacterRig<'_>,
        rng: &mut dyn RngCore,
    ) {
        if !self.active {
            return;
        }

        self.timer -= delta;
        if self.timer <= 0.0 {
            self.finish(rig);
            return;
        }

        let mut offset = Vec3::new(jitter(rng, self.shake), 0.0, 0.0);
        if !grounded {
            offset.y = jitter(rng, self.shake);
        }
        rig.renderer.set_local_position(self.base_position + offset);
    }

    fn finish(&mut self, rig: &mut CharacterRig<'_>) {
        self.timer = 0.0;
        self.active = false;
        rig.animator.set_speed(1.0);
        rig.renderer.set_local_position(self.base_position);
        rig.body.set_velocity(self.saved_velocity);
    }
}

fn jitter(rng: &mut dyn RngCore, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.gen_range(-amount..=amount)
    } else {
        0.0
    }
}
