//! Item components and configuration.

use bevy::prelude::*;
use serde::Deserialize;

use super::item::{ItemKind, ItemTuning};

/// Pickup trigger attached as a child of an item; points back at the item.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemSensor {
    pub item: Entity,
}

/// Item tuning, read from `assets/data/items/items.ron`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub gold: ItemTuning,
    pub exp: ItemTuning,
    /// Factor applied to the experience requirement on each level-up
    pub experience_growth: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            gold: ItemTuning::default(),
            exp: ItemTuning {
                color: (0.35, 0.95, 0.55),
                size: 0.2,
                ..default()
            },
            experience_growth: 1.2,
        }
    }
}

impl ItemConfig {
    pub const PATH: &'static str = "assets/data/items/items.ron";

    pub fn tuning(&self, kind: ItemKind) -> &ItemTuning {
        match kind {
            ItemKind::Gold => &self.gold,
            ItemKind::Exp => &self.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::read_ron;

    #[test]
    fn shipped_config_matches_the_defaults() {
        let config: ItemConfig = read_ron(ItemConfig::PATH).unwrap();
        assert_eq!(config, ItemConfig::default());
    }
}
