//! Character status templates and live hit points.

use bevy::prelude::*;
use serde::Deserialize;

/// Per-archetype status template. Copied onto the entity at spawn and then
/// owned by it (experience and level change on the live copy only).
#[derive(Component, Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CharacterStatus {
    pub level: u32,
    pub hp_max: i32,
    pub speed: i32,
    pub experience: u32,
    pub next_experience: u32,
}

impl Default for CharacterStatus {
    fn default() -> Self {
        Self {
            level: 1,
            hp_max: 100,
            speed: 5,
            experience: 0,
            next_experience: 100,
        }
    }
}

impl CharacterStatus {
    /// Add experience and level up as many times as it covers.
    ///
    /// Each level-up carries the remainder over and grows the requirement by
    /// `growth`. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32, growth: f32) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.next_experience > 0 && self.experience >= self.next_experience {
            self.experience -= self.next_experience;
            self.level += 1;
            self.next_experience = ((self.next_experience as f32) * growth.max(1.0)).ceil() as u32;
            gained += 1;
        }
        gained
    }
}

/// Live hit points.
///
/// `current` stays within `0..=max` on every write. Once `dead` is set no
/// write is accepted until an explicit [`Health::revive`].
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
    dead: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn from_status(status: &CharacterStatus) -> Self {
        Self::new(status.hp_max)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn set(&mut self, value: i32) {
        if self.dead {
            return;
        }
        self.current = value.clamp(0, self.max);
    }

    pub fn add(&mut self, delta: i32) {
        self.set(self.current.saturating_add(delta));
    }

    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Bring a dead character back with `value` hit points (clamped).
    /// Returns false, leaving the character dead, when that would be zero.
    pub fn revive(&mut self, value: i32) -> bool {
        let value = value.clamp(0, self.max);
        if value == 0 {
            return false;
        }
        self.dead = false;
        self.current = value;
        true
    }

    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}
