//! Damage application and the death transition.

use bevy::prelude::*;

use crate::character::Health;

/// Hit points removed by one bullet, in either direction.
pub const DAMAGE_PER_HIT: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead or invincible; nothing changed.
    Ignored,
    Hurt { remaining: i32 },
    Killed,
}

/// Archetype-specific reactions to being hit.
pub trait CombatHooks {
    fn is_invincible(&self) -> bool {
        false
    }

    /// Called after a hit that leaves the target alive.
    fn on_hurt(&mut self, hit_position: Vec2);

    /// Called exactly once, on the hit that brings HP to zero.
    fn on_death(&mut self);
}

/// Subtract `amount` from `health` and dispatch the matching hook.
pub fn apply_damage(
    health: &mut Health,
    hooks: &mut dyn CombatHooks,
    amount: i32,
    hit_position: Vec2,
) -> DamageOutcome {
    if health.is_dead() || hooks.is_invincible() {
        return DamageOutcome::Ignored;
    }

    health.add(-amount.max(0));

    if health.current() == 0 {
        health.mark_dead();
        hooks.on_death();
        DamageOutcome::Killed
    } else {
        hooks.on_hurt(hit_position);
        DamageOutcome::Hurt {
            remaining: health.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        invincible: bool,
        hurts: Vec<Vec2>,
        deaths: usize,
    }

    impl CombatHooks for Recorder {
        fn is_invincible(&self) -> bool {
            self.invincible
        }

        fn on_hurt(&mut self, hit_position: Vec2) {
            self.hurts.push(hit_position);
        }

        fn on_death(&mut self) {
            self.deaths += 1;
        }
    }

    #[test]
    fn non_lethal_hit_reports_remaining_hp() {
        let mut health = Health::new(300);
        let mut hooks = Recorder::default();

        let outcome = apply_damage(&mut health, &mut hooks, DAMAGE_PER_HIT, Vec2::new(1.0, 2.0));

        assert_eq!(outcome, DamageOutcome::Hurt { remaining: 200 });
        assert_eq!(hooks.hurts, vec![Vec2::new(1.0, 2.0)]);
        assert_eq!(hooks.deaths, 0);
    }

    #[test]
    fn death_hook_fires_exactly_once() {
        let mut health = Health::new(150);
        let mut hooks = Recorder::default();

        assert_eq!(
            apply_damage(&mut health, &mut hooks, DAMAGE_PER_HIT, Vec2::ZERO),
            DamageOutcome::Hurt { remaining: 50 }
        );
        assert_eq!(
            apply_damage(&mut health, &mut hooks, DAMAGE_PER_HIT, Vec2::ZERO),
            DamageOutcome::Killed
        );
        for _ in 0..3 {
            assert_eq!(
                apply_damage(&mut health, &mut hooks, DAMAGE_PER_HIT, Vec2::ZERO),
                DamageOutcome::Ignored
            );
        }

        assert_eq!(hooks.deaths, 1);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn hp_stays_in_range_for_any_damage_sequence() {
        let mut health = Health::new(250);
        let mut hooks = Recorder::default();

        let mut last = health.current();
        for amount in [30, 0, -40, 500, 10, 1000] {
            apply_damage(&mut health, &mut hooks, amount, Vec2::ZERO);
            assert!((0..=health.max()).contains(&health.current()));
            if health.is_dead() {
                assert!(health.current() <= last);
            }
            last = health.current();
        }
        assert_eq!(hooks.deaths, 1);
    }

    #[test]
    fn invincible_targets_are_untouched() {
        let mut health = Health::new(100);
        let mut hooks = Recorder {
            invincible: true,
            ..default()
        };

        let outcome = apply_damage(&mut health, &mut hooks, DAMAGE_PER_HIT, Vec2::ZERO);

        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(health.current(), 100);
        assert!(hooks.hurts.is_empty());
    }
}
