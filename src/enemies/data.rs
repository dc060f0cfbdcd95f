//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::enemy_001::Enemy001Tuning;
use crate::character::{CharacterStatus, EnemyKind};
use crate::core::read_ron;

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EnemyDefinition {
    pub name: String,
    pub kind: EnemyKind,
    pub status: CharacterStatus,
    pub tuning: Enemy001Tuning,
    /// Body width and height in world units
    pub size: (f32, f32),
    /// Placeholder sprite colour (sRGB)
    pub color: (f32, f32, f32),
    pub gold_min: u32,
    pub gold_max: u32,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        Self {
            name: "Enemy001".to_string(),
            kind: EnemyKind::Enemy001,
            status: CharacterStatus {
                hp_max: 300,
                speed: 2,
                ..default()
            },
            tuning: Enemy001Tuning::default(),
            size: (0.8, 0.9),
            color: (0.75, 0.25, 0.3),
            gold_min: 1,
            gold_max: 3,
        }
    }
}

impl EnemyDefinition {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1) * 0.5
    }

    pub fn sprite_color(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Get an enemy definition, falling back to the built-in one.
    pub fn get_or_default(&self, enemy_type: &str) -> EnemyDefinition {
        match self.get(enemy_type) {
            Some(definition) => definition.clone(),
            None => {
                warn!("No enemy definition for {}, using defaults", enemy_type);
                EnemyDefinition::default()
            }
        }
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let enemy_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match read_ron::<EnemyDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn partial_definitions_keep_the_remaining_defaults() {
        let definition: EnemyDefinition = parse_ron(
            "enemy_001.ron",
            r#"(
                name: "Crawler",
                status: (level: 2, hp_max: 500, speed: 2, experience: 0, next_experience: 100),
                tuning: (attack_range: 6.0, knockback: (power: 4.0, damping: 10.0, threshold: 0.2)),
                gold_max: 5,
            )"#,
        )
        .unwrap();

        assert_eq!(definition.name, "Crawler");
        assert_eq!(definition.kind, EnemyKind::Enemy001);
        assert_eq!(definition.status.hp_max, 500);
        assert_eq!(definition.tuning.attack_range, 6.0);
        assert_eq!(definition.tuning.attack_cooldown, 5.0);
        assert_eq!(definition.tuning.knockback.power, 4.0);
        assert_eq!(definition.tuning.knockback.resistance, 0.0);
        assert_eq!(definition.gold_min, 1);
        assert_eq!(definition.gold_max, 5);
    }

    #[test]
    fn missing_definitions_fall_back() {
        let registry = EnemyRegistry::default();
        assert_eq!(registry.get_or_default("enemy_404"), EnemyDefinition::default());
    }

    #[test]
    fn shipped_definition_matches_the_defaults() {
        let definition: EnemyDefinition = read_ron("assets/data/enemies/enemy_001.ron").unwrap();
        assert_eq!(definition, EnemyDefinition::default());
    }
}
