//! Forced displacement away from a damage source.
//!
//! The push decays linearly and is cancelled as soon as it would shove the
//! character into a wall, off a ledge or onto a steep slope.

use bevy::prelude::*;

use super::surfaces::WorldProbe;

const WALL_PROBE_LIFT: f32 = 0.1;
const LEDGE_PROBE_LIFT: f32 = 0.2;
const LEDGE_PROBE_LENGTH: f32 = 1.0;
/// Ground tilted further than this from vertical (degrees) stops a push.
const MAX_SLOPE_ANGLE: f32 = 50.0;
/// Rounding slack so a normal reported at exactly the limit still counts
/// as walkable.
const SLOPE_TOLERANCE: f32 = 0.01;

/// What a single knockback tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockbackStep {
    Idle,
    Moved,
    Finished,
    BlockedByWall,
    NoGround,
    TooSteep,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Knockback {
    value: f32,
    damping: f32,
    threshold: f32,
    direction: Vec2,
    resistance: f32,
    probe_radius: f32,
    active: bool,
}

impl Default for Knockback {
    fn default() -> Self {
        Self {
            value: 0.0,
            damping: 0.0,
            threshold: 0.0,
            direction: Vec2::ZERO,
            resistance: 0.0,
            probe_radius: 0.4,
            active: false,
        }
    }
}

impl Knockback {
    pub fn new(resistance: f32, probe_radius: f32) -> Self {
        Self {
            resistance: resistance.clamp(0.0, 1.0),
            probe_radius: probe_radius.max(0.0),
            ..default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Push away from `hit_position`. Only the horizontal part of the
    /// direction is used for movement.
    pub fn begin(
        &mut self,
        power: f32,
        damping: f32,
        threshold: f32,
        hit_position: Vec2,
        position: Vec2,
    ) {
        let away = (position - hit_position).normalize_or_zero();
        let direction = Vec2::new(away.x, 0.0).normalize_or_zero();
        if direction == Vec2::ZERO {
            self.cancel();
            return;
        }

        self.value = power * (1.0 - self.resistance);
        self.damping = damping.max(0.0);
        self.threshold = threshold;
        self.direction = direction;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.value = 0.0;
    }

    /// Advance one frame, moving `position` in place when nothing objects.
    pub fn update(&mut self, delta: f32, position: &mut Vec2, probe: &dyn WorldProbe) -> KnockbackStep {
        if !self.active {
            return KnockbackStep::Idle;
        }

        if self.value <= self.threshold {
            self.cancel();
            return KnockbackStep::Finished;
        }

        let step = self.value * delta;

        let wall_origin = *position + self.direction * self.probe_radius + Vec2::Y * WALL_PROBE_LIFT;
        if probe.raycast(wall_origin, self.direction, step).is_some() {
            self.cancel();
            return KnockbackStep::BlockedByWall;
        }

        // Ground under the leading edge after this step.
        let ledge_origin = *position
            + self.direction * (self.probe_radius + step)
            + Vec2::Y * LEDGE_PROBE_LIFT;
        let Some(ground) = probe.raycast(ledge_origin, Vec2::NEG_Y, LEDGE_PROBE_LENGTH) else {
            self.cancel();
            return KnockbackStep::NoGround;
        };

        if slope_angle(ground.normal) > MAX_SLOPE_ANGLE + SLOPE_TOLERANCE {
            self.cancel();
            return KnockbackStep::TooSteep;
        }

        *position += self.direction * step;
        self.value -= self.damping * delta;
        KnockbackStep::Moved
    }
}

/// Angle between a surface normal and straight up, in degrees.
fn slope_angle(normal: Vec2) -> f32 {
    normal
        .normalize_or_zero()
        .dot(Vec2::Y)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::testing::MockWorld;

    const DT: f32 = 0.1;

    #[test]
    fn pushes_away_from_the_hit_and_decays() {
        let world = MockWorld::flat(0.0);
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(1.0, 0.5), position);
        assert_eq!(knockback.direction(), Vec2::NEG_X);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::Moved);
        assert!((position.x + 0.3).abs() < 1e-5);
        assert_eq!(position.y, 0.0);
        assert!((knockback.value() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn ends_without_moving_once_at_threshold() {
        let world = MockWorld::flat(0.0);
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;

        knockback.begin(0.1, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::Finished);
        assert!(!knockback.is_active());
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn resistance_scales_power() {
        let world = MockWorld::flat(0.0);
        let mut knockback = Knockback::new(1.0, 0.4);
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::Finished);
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn wall_ahead_cancels_without_movement() {
        let world = MockWorld::flat(0.0).with_wall(0.5);
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::BlockedByWall);
        assert!(!knockback.is_active());
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn ledge_cancels_without_movement() {
        let world = MockWorld::empty();
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::NoGround);
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn steep_ground_cancels_but_gentle_slopes_do_not() {
        let steep = MockWorld::flat(0.0).with_ground_normal(Vec2::new(1.0, 0.5));
        let gentle = MockWorld::flat(0.0).with_ground_normal(Vec2::new(0.3, 1.0));

        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;
        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);
        assert_eq!(knockback.update(DT, &mut position, &steep), KnockbackStep::TooSteep);
        assert_eq!(position, Vec2::ZERO);

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);
        assert_eq!(knockback.update(DT, &mut position, &gentle), KnockbackStep::Moved);
        assert!(position.x > 0.0);
    }

    #[test]
    fn ledge_is_checked_under_the_leading_edge() {
        // Floor ends at x = 0.5; the body is 0.4 wide on each side.
        let world = MockWorld::flat(0.0).with_floor_ending_at(0.5);
        let mut knockback = Knockback::new(0.0, 0.4);
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        // The centre would still be over the floor at x = 0.3, the edge would not.
        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::NoGround);
        assert!(!knockback.is_active());
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn pushes_freely_while_the_leading_edge_stays_on_the_floor() {
        let world = MockWorld::flat(0.0).with_floor_ending_at(2.0);
        let mut knockback = Knockback::new(0.0, 0.4);
        let mut position = Vec2::ZERO;

        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        assert_eq!(knockback.update(DT, &mut position, &world), KnockbackStep::Moved);
        assert!((position.x - 0.3).abs() < 1e-5);
    }

    fn push_over(normal_degrees: f32) -> KnockbackStep {
        let angle = normal_degrees.to_radians();
        let world =
            MockWorld::flat(0.0).with_ground_normal(Vec2::new(angle.sin(), angle.cos()));
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;
        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);
        knockback.update(DT, &mut position, &world)
    }

    #[test]
    fn slope_limit_is_inclusive_at_fifty_degrees() {
        assert_eq!(push_over(1.0), KnockbackStep::Moved);
        assert_eq!(push_over(50.0), KnockbackStep::Moved);
        assert_eq!(push_over(50.5), KnockbackStep::TooSteep);
    }

    #[test]
    fn hit_from_directly_above_does_not_push() {
        let mut knockback = Knockback::default();
        knockback.begin(3.0, 15.0, 0.1, Vec2::new(0.0, 1.0), Vec2::ZERO);
        assert!(!knockback.is_active());
    }

    #[test]
    fn runs_out_after_enough_ticks() {
        let world = MockWorld::flat(0.0);
        let mut knockback = Knockback::default();
        let mut position = Vec2::ZERO;
        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), position);

        let mut ticks = 0;
        while knockback.is_active() {
            knockback.update(0.02, &mut position, &world);
            ticks += 1;
            assert!(ticks < 100);
        }

        assert!(position.x > 0.0);
    }
}
