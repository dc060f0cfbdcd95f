//! Arena layout data and RON loading.

use bevy::prelude::*;
use serde::Deserialize;

use crate::character::{EnemyKind, GroundEffect, GroundType, WallKind, WallType};

/// What a map block is to the characters touching it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum BlockKind {
    Ground(GroundType),
    Wall(WallType),
}

/// One static box of map geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockDef {
    /// Centre in world units
    pub position: (f32, f32),
    pub size: (f32, f32),
    /// Counter-clockwise tilt in degrees
    #[serde(default)]
    pub angle: f32,
    pub kind: BlockKind,
}

impl BlockDef {
    fn ground(position: (f32, f32), size: (f32, f32)) -> Self {
        Self {
            position,
            size,
            angle: 0.0,
            kind: BlockKind::Ground(GroundType::default()),
        }
    }

    fn wall(position: (f32, f32), size: (f32, f32), wall: WallType) -> Self {
        Self {
            position,
            size,
            angle: 0.0,
            kind: BlockKind::Wall(wall),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.0, self.position.1)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1) * 0.5
    }

    pub fn color(&self) -> Color {
        match &self.kind {
            BlockKind::Ground(ground) => match ground.effect {
                GroundEffect::Slow => Color::srgb(0.25, 0.35, 0.55),
                GroundEffect::Boost => Color::srgb(0.7, 0.55, 0.2),
                _ => Color::srgb(0.3, 0.42, 0.25),
            },
            BlockKind::Wall(wall) => match wall.kind {
                WallKind::Wall => Color::srgb(0.35, 0.33, 0.38),
                WallKind::PlayerOnly => Color::srgba(0.3, 0.5, 0.9, 0.5),
                WallKind::EnemyOnly => Color::srgba(0.9, 0.3, 0.3, 0.25),
            },
        }
    }
}

/// Where an enemy of a registered type starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemySpawn {
    /// File stem of the definition under `assets/data/enemies/`
    pub enemy_type: String,
    pub position: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WarpGateDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

/// Arena layout, read from `assets/data/levels/arena.ron`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaDefinition {
    pub name: String,
    /// World units per screen pixel
    pub camera_scale: f32,
    pub blocks: Vec<BlockDef>,
    pub enemies: Vec<EnemySpawn>,
    pub warp_gate: Option<WarpGateDef>,
}

impl Default for ArenaDefinition {
    fn default() -> Self {
        Self {
            name: "Arena".to_string(),
            camera_scale: 1.0 / 48.0,
            blocks: vec![
                BlockDef::ground((0.0, -0.5), (40.0, 1.0)),
                BlockDef {
                    kind: BlockKind::Ground(GroundType::with_effect(GroundEffect::Slow)),
                    ..BlockDef::ground((-12.0, 0.05), (4.0, 0.1))
                },
                BlockDef {
                    angle: 20.0,
                    ..BlockDef::ground((9.0, 0.4), (4.0, 0.4))
                },
                BlockDef::ground((13.5, 1.2), (5.0, 0.4)),
                BlockDef::wall((-20.5, 4.0), (1.0, 10.0), WallType::new(WallKind::Wall)),
                BlockDef::wall((20.5, 4.0), (1.0, 10.0), WallType::new(WallKind::Wall)),
                BlockDef::wall((16.15, 2.4), (0.3, 2.0), WallType::new(WallKind::PlayerOnly)),
                BlockDef::wall(
                    (-3.0, 1.0),
                    (0.2, 2.0),
                    WallType::for_enemies([EnemyKind::Enemy001]),
                ),
            ],
            enemies: vec![
                EnemySpawn {
                    enemy_type: "enemy_001".to_string(),
                    position: (4.0, 0.6),
                },
                EnemySpawn {
                    enemy_type: "enemy_001".to_string(),
                    position: (14.0, 2.0),
                },
            ],
            warp_gate: Some(WarpGateDef {
                position: (-18.5, 1.0),
                size: (1.0, 2.0),
            }),
        }
    }
}

impl ArenaDefinition {
    pub const PATH: &'static str = "assets/data/levels/arena.ron";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_ron, read_ron};

    #[test]
    fn parses_blocks_and_spawns() {
        let arena: ArenaDefinition = parse_ron(
            ArenaDefinition::PATH,
            r#"(
                name: "Test",
                blocks: [
                    (position: (0.0, -0.5), size: (10.0, 1.0), kind: Ground((effect: Boost))),
                    (position: (3.0, 1.0), size: (0.2, 2.0), kind: Wall((kind: EnemyOnly, enemy_kinds: [Enemy001]))),
                ],
                enemies: [(enemy_type: "enemy_001", position: (2.0, 0.5))],
            )"#,
        )
        .unwrap();

        assert_eq!(arena.name, "Test");
        assert_eq!(arena.blocks.len(), 2);
        assert_eq!(
            arena.blocks[0].kind,
            BlockKind::Ground(GroundType::with_effect(GroundEffect::Boost))
        );
        assert_eq!(
            arena.blocks[1].kind,
            BlockKind::Wall(WallType::for_enemies([EnemyKind::Enemy001]))
        );
        assert_eq!(arena.enemies[0].enemy_type, "enemy_001");
        // Omitted fields come from the built-in arena.
        assert_eq!(arena.warp_gate, ArenaDefinition::default().warp_gate);
        assert_eq!(arena.camera_scale, 1.0 / 48.0);
    }

    #[test]
    fn shipped_arena_matches_the_built_in_layout() {
        let shipped: ArenaDefinition = read_ron(ArenaDefinition::PATH).unwrap();
        let built_in = ArenaDefinition::default();

        assert_eq!(shipped.blocks, built_in.blocks);
        assert_eq!(shipped.enemies, built_in.enemies);
        assert_eq!(shipped.warp_gate, built_in.warp_gate);
        assert!((shipped.camera_scale - built_in.camera_scale).abs() < 1e-6);
    }
}
