//! Combat-related components and tuning constants.

use bevy::prelude::*;

use crate::character::{Blink, RendererSurface, Team};

/// Freeze-frame applied to an enemy on a non-lethal hit.
pub const ENEMY_HIT_STOP_TIME: f32 = 0.1;
pub const ENEMY_HIT_STOP_SHAKE: f32 = 0.1;

/// Post-hit window during which the player ignores damage.
pub const INVINCIBILITY_TIME: f32 = 2.0;
pub const INVINCIBILITY_BLINK_INTERVAL: f32 = 0.04;

/// Damage immunity with a blinking sprite.
#[derive(Debug, Clone)]
pub struct Invincibility {
    duration: f32,
    timer: f32,
    blink: Blink,
}

impl Default for Invincibility {
    fn default() -> Self {
        Self::new(INVINCIBILITY_TIME, INVINCIBILITY_BLINK_INTERVAL)
    }
}

impl Invincibility {
    pub fn new(duration: f32, blink_interval: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            timer: 0.0,
            blink: Blink::new(blink_interval),
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.timer.max(0.0)
    }

    pub fn start(&mut self) {
        self.timer = self.duration;
        self.blink.restart();
    }

    /// End the window now and show the sprite.
    pub fn clear(&mut self, renderer: &mut dyn RendererSurface) {
        self.timer = 0.0;
        renderer.set_visible(true);
    }

    pub fn tick(&mut self, delta: f32, renderer: &mut dyn RendererSurface) {
        if !self.is_active() {
            return;
        }

        self.timer -= delta;
        if self.timer <= 0.0 {
            renderer.set_visible(true);
        } else {
            self.blink.tick(delta, renderer);
        }
    }
}

/// A projectile fired by one team at the other.
#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub team: Team,
    pub shooter: Entity,
    /// Seconds until the bullet despawns on its own
    pub lifetime: f32,
    /// Set on the first hit so one bullet never lands twice.
    pub spent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::testing::MockRenderer;

    #[test]
    fn window_blinks_then_restores_visibility() {
        let mut renderer = MockRenderer::default();
        let mut invincibility = Invincibility::new(0.2, 0.05);

        invincibility.start();
        for _ in 0..3 {
            invincibility.tick(0.05, &mut renderer);
        }
        assert!(invincibility.is_active());
        assert!(renderer.toggles >= 2);

        invincibility.tick(0.06, &mut renderer);
        assert!(!invincibility.is_active());
        assert!(renderer.visible);
    }

    #[test]
    fn inactive_window_leaves_sprite_alone() {
        let mut renderer = MockRenderer::default();
        let mut invincibility = Invincibility::default();

        invincibility.tick(1.0, &mut renderer);

        assert_eq!(renderer.toggles, 0);
        assert!(!invincibility.is_active());
    }
}
