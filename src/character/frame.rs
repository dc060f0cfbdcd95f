//! One character's view of the current frame.

use bevy::prelude::*;
use rand::RngCore;

use super::hit_stop::HitStop;
use super::knockback::{Knockback, KnockbackStep};
use super::surfaces::{CharacterRig, WorldProbe};

/// Everything a controller touches while stepping one character for a frame.
///
/// `position` is the character root's world position. Controllers may move
/// it (knockback does) and the caller writes it back afterwards.
pub struct CharacterFrame<'a> {
    pub delta: f32,
    pub position: Vec2,
    pub grounded: bool,
    pub hit_stop: &'a mut HitStop,
    pub knockback: &'a mut Knockback,
    pub rig: CharacterRig<'a>,
    pub probe: &'a dyn WorldProbe,
    pub rng: &'a mut dyn RngCore,
}

impl CharacterFrame<'_> {
    /// Run the hit reactions that come before state logic.
    ///
    /// While a hit-stop is running only the hit-stop advances and this
    /// returns false; the frame it expires on is still consumed by it.
    /// Otherwise knockback decays and this returns true.
    pub fn step_reactions(&mut self) -> bool {
        if self.hit_stop.is_active() {
            self.hit_stop
                .update(self.delta, self.grounded, &mut self.rig, &mut *self.rng);
            return false;
        }

        if self.knockback.update(self.delta, &mut self.position, self.probe) == KnockbackStep::BlockedByWall {
            debug!("knockback stopped by a wall at {:?}", self.position);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::character::hit_stop::HitStopRole;
    use crate::character::testing::{MockRig, MockWorld};

    #[test]
    fn hit_stop_consumes_the_frame_and_blocks_knockback() {
        let world = MockWorld::flat(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut mocks = MockRig::default();
        let mut hit_stop = HitStop::default();
        let mut knockback = Knockback::default();

        hit_stop.begin(0.1, 0.0, HitStopRole::Victim, &mut mocks.rig());
        knockback.begin(3.0, 15.0, 0.1, Vec2::new(-1.0, 0.0), Vec2::ZERO);

        let mut frame = CharacterFrame {
            delta: 0.05,
            position: Vec2::ZERO,
            grounded: true,
            hit_stop: &mut hit_stop,
            knockback: &mut knockback,
            rig: mocks.rig(),
            probe: &world,
            rng: &mut rng,
        };

        assert!(!frame.step_reactions());
        assert_eq!(frame.position, Vec2::ZERO);

        // Expiry frame is still swallowed.
        frame.delta = 0.06;
        assert!(!frame.step_reactions());
        assert!(!frame.hit_stop.is_active());

        assert!(frame.step_reactions());
        assert!(frame.position.x > 0.0);
    }
}
