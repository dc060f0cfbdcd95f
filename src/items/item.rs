//! Dropped pickups: lifetime, blink, magnet seek and one-shot collection.

use bevy::prelude::*;
use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::character::{Blink, CharacterStatus, RendererSurface};
use crate::player::PlayerWallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ItemKind {
    Gold,
    Exp,
}

/// Per-kind pickup tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    /// Seconds before the item disappears
    pub lifetime: f32,
    /// Remaining lifetime below which the item blinks
    pub blink_start: f32,
    pub blink_interval: f32,
    /// Distance (inclusive) at which the item starts flying to the player
    pub magnet_range: f32,
    pub seek_speed: f32,
    pub amount: u32,
    pub size: f32,
    pub color: (f32, f32, f32),
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            lifetime: 10.0,
            blink_start: 3.0,
            blink_interval: 0.08,
            magnet_range: 2.5,
            seek_speed: 5.0,
            amount: 10,
            size: 0.25,
            color: (1.0, 0.85, 0.2),
        }
    }
}

/// What an item's lifetime tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTick {
    Alive,
    Expired,
}

#[derive(Component, Debug, Clone)]
pub struct Item {
    kind: ItemKind,
    amount: u32,
    lifetime: f32,
    blink_start: f32,
    magnet_range: f32,
    seek_speed: f32,
    blink: Blink,
    collected: bool,
}

impl Item {
    pub fn new(kind: ItemKind, tuning: &ItemTuning) -> Self {
        Self {
            kind,
            amount: tuning.amount,
            lifetime: tuning.lifetime,
            blink_start: tuning.blink_start,
            magnet_range: tuning.magnet_range,
            seek_speed: tuning.seek_speed,
            blink: Blink::new(tuning.blink_interval),
            collected: false,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn remaining(&self) -> f32 {
        self.lifetime.max(0.0)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark the item collected. True only for the first caller.
    pub fn try_collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    /// Count the lifetime down and blink near the end.
    pub fn tick(&mut self, delta: f32, renderer: &mut dyn RendererSurface) -> ItemTick {
        if self.collected {
            return ItemTick::Alive;
        }

        self.lifetime -= delta;
        if self.lifetime <= 0.0 {
            return ItemTick::Expired;
        }

        if self.lifetime <= self.blink_start {
            self.blink.tick(delta, renderer);
        } else if !renderer.is_visible() {
            renderer.set_visible(true);
        }
        ItemTick::Alive
    }

    /// Velocity toward `target` when it is within magnet range.
    pub fn seek_velocity(&self, position: Vec2, target: Option<Vec2>) -> Option<Vec2> {
        let target = target?;
        if self.collected || position.distance(target) > self.magnet_range {
            return None;
        }
        Some((target - position).normalize_or_zero() * self.seek_speed)
    }
}

/// One pickup to spawn where an enemy died.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropSpawn {
    pub kind: ItemKind,
    /// Offset from the death position
    pub offset: Vec2,
    pub impulse: Vec2,
}

/// Roll an enemy's drops: one Exp plus `gold_min..=gold_max` Gold.
pub fn roll_drops(gold_min: u32, gold_max: u32, rng: &mut dyn RngCore) -> Vec<DropSpawn> {
    let mut drops = vec![DropSpawn {
        kind: ItemKind::Exp,
        offset: Vec2::new(rng.gen_range(-0.2..=0.2), rng.gen_range(0.3..=0.6)),
        impulse: Vec2::new(rng.gen_range(-0.3..=0.3), rng.gen_range(2.0..=3.0)),
    }];

    let gold_count = rng.gen_range(gold_min..=gold_max.max(gold_min));
    drops.extend((0..gold_count).map(|_| DropSpawn {
        kind: ItemKind::Gold,
        offset: Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(0.3..=0.8)),
        impulse: Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(2.0..=4.0)),
    }));
    drops
}

/// Credit a collected item. Returns the number of levels gained.
pub fn apply_pickup(
    kind: ItemKind,
    amount: u32,
    wallet: &mut PlayerWallet,
    status: &mut CharacterStatus,
    experience_growth: f32,
) -> u32 {
    match kind {
        ItemKind::Gold => {
            wallet.gold = wallet.gold.saturating_add(amount);
            0
        }
        ItemKind::Exp => status.gain_experience(amount, experience_growth),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::character::testing::MockRenderer;

    const DT: f32 = 0.125;

    fn gold() -> Item {
        Item::new(ItemKind::Gold, &ItemTuning::default())
    }

    #[test]
    fn magnet_range_is_inclusive() {
        let item = gold();

        let inside = item.seek_velocity(Vec2::ZERO, Some(Vec2::new(2.4, 0.0)));
        assert_eq!(inside, Some(Vec2::new(5.0, 0.0)));

        let edge = item.seek_velocity(Vec2::ZERO, Some(Vec2::new(0.0, 2.5)));
        assert_eq!(edge, Some(Vec2::new(0.0, 5.0)));

        assert_eq!(item.seek_velocity(Vec2::ZERO, Some(Vec2::new(2.6, 0.0))), None);
        assert_eq!(item.seek_velocity(Vec2::ZERO, None), None);
    }

    #[test]
    fn collection_happens_once() {
        let mut item = gold();

        assert!(item.try_collect());
        assert!(!item.try_collect());
        assert!(item.is_collected());
        assert_eq!(item.seek_velocity(Vec2::ZERO, Some(Vec2::X)), None);
    }

    #[test]
    fn blinks_near_the_end_then_expires() {
        let mut renderer = MockRenderer::default();
        let mut item = gold();

        // Solid until the remaining lifetime reaches 3 s.
        for _ in 0..55 {
            assert_eq!(item.tick(DT, &mut renderer), ItemTick::Alive);
        }
        assert_eq!(renderer.toggles, 0);

        // Blinking for the last 3 s.
        for _ in 0..24 {
            assert_eq!(item.tick(DT, &mut renderer), ItemTick::Alive);
        }
        assert!(renderer.toggles > 10);

        assert_eq!(item.tick(DT, &mut renderer), ItemTick::Expired);
    }

    #[test]
    fn drops_stay_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let drops = roll_drops(1, 3, &mut rng);
            let exp: Vec<_> = drops.iter().filter(|d| d.kind == ItemKind::Exp).collect();
            let gold: Vec<_> = drops.iter().filter(|d| d.kind == ItemKind::Gold).collect();

            assert_eq!(exp.len(), 1);
            assert!((1..=3).contains(&gold.len()));

            let exp = exp[0];
            assert!((-0.2..=0.2).contains(&exp.offset.x));
            assert!((0.3..=0.6).contains(&exp.offset.y));
            assert!((-0.3..=0.3).contains(&exp.impulse.x));
            assert!((2.0..=3.0).contains(&exp.impulse.y));

            for drop in gold {
                assert!((-0.5..=0.5).contains(&drop.offset.x));
                assert!((0.3..=0.8).contains(&drop.offset.y));
                assert!((-1.0..=1.0).contains(&drop.impulse.x));
                assert!((2.0..=4.0).contains(&drop.impulse.y));
            }
        }
    }

    #[test]
    fn inverted_gold_range_drops_the_minimum() {
        let mut rng = StdRng::seed_from_u64(1);
        let drops = roll_drops(2, 0, &mut rng);
        assert_eq!(drops.len(), 3);
    }

    #[test]
    fn pickups_credit_gold_and_experience() {
        let mut wallet = PlayerWallet::default();
        let mut status = CharacterStatus::default();

        assert_eq!(apply_pickup(ItemKind::Gold, 10, &mut wallet, &mut status, 1.5), 0);
        assert_eq!(wallet.gold, 10);

        for _ in 0..9 {
            assert_eq!(apply_pickup(ItemKind::Exp, 10, &mut wallet, &mut status, 1.5), 0);
        }
        assert_eq!(apply_pickup(ItemKind::Exp, 10, &mut wallet, &mut status, 1.5), 1);
        assert_eq!(status.level, 2);
        assert_eq!(status.experience, 0);
        assert_eq!(status.next_experience, 150);
    }
}
