//! Team membership and map surface classification.
//!
//! Walls decide who they stop; ground tiles carry material, state and effect
//! data for whoever stands on them.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use serde::Deserialize;

/// Static map geometry (walls, floors, slopes).
pub const MAP_GROUP: Group = Group::GROUP_1;
pub const PLAYER_GROUP: Group = Group::GROUP_2;
pub const ENEMY_GROUP: Group = Group::GROUP_3;
pub const BULLET_GROUP: Group = Group::GROUP_4;
pub const ITEM_GROUP: Group = Group::GROUP_5;
/// Membership used by scene queries (knockback and ground probes).
pub const PROBE_GROUP: Group = Group::GROUP_6;
/// Trigger volumes such as warp gates.
pub const TRIGGER_GROUP: Group = Group::GROUP_7;

/// Which side a character fights on. Set once at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Team {
    #[default]
    None,
    Player,
    Enemy,
}

impl Team {
    pub fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Player, Team::Enemy) | (Team::Enemy, Team::Player)
        )
    }

    /// Collision groups for a character body of this team.
    pub fn body_groups(self) -> CollisionGroups {
        match self {
            Team::Player => CollisionGroups::new(
                PLAYER_GROUP,
                MAP_GROUP | ENEMY_GROUP | BULLET_GROUP | ITEM_GROUP | TRIGGER_GROUP,
            ),
            Team::Enemy => CollisionGroups::new(
                ENEMY_GROUP,
                MAP_GROUP | PLAYER_GROUP | ENEMY_GROUP | BULLET_GROUP,
            ),
            Team::None => CollisionGroups::new(Group::NONE, MAP_GROUP),
        }
    }
}

/// Enemy archetypes a wall can be configured to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EnemyKind {
    Enemy000,
    Enemy001,
    Boss000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum WallKind {
    /// Stops everyone.
    #[default]
    Wall,
    /// Solid for the player only.
    PlayerOnly,
    /// Barrier for the listed enemy kinds; nobody else notices it.
    EnemyOnly,
}

/// Wall classification attached to map colliders.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WallType {
    pub kind: WallKind,
    /// Enemy kinds stopped by an `EnemyOnly` wall.
    #[serde(default)]
    pub enemy_kinds: Vec<EnemyKind>,
}

impl WallType {
    pub fn new(kind: WallKind) -> Self {
        Self {
            kind,
            enemy_kinds: Vec::new(),
        }
    }

    pub fn for_enemies(kinds: impl IntoIterator<Item = EnemyKind>) -> Self {
        Self {
            kind: WallKind::EnemyOnly,
            enemy_kinds: kinds.into_iter().collect(),
        }
    }

    pub fn hits_enemy_kind(&self, kind: Option<EnemyKind>) -> bool {
        kind.is_some_and(|kind| self.enemy_kinds.contains(&kind))
    }

    /// Whether a character of `team` (and `enemy_kind`, for enemies) may not
    /// pass through this wall.
    pub fn blocks(&self, team: Team, enemy_kind: Option<EnemyKind>) -> bool {
        match (team, self.kind) {
            (Team::None, _) => false,
            (_, WallKind::Wall) => true,
            (Team::Player, WallKind::PlayerOnly) => true,
            (Team::Player, WallKind::EnemyOnly) => false,
            (Team::Enemy, WallKind::EnemyOnly) => self.hits_enemy_kind(enemy_kind),
            (Team::Enemy, WallKind::PlayerOnly) => false,
        }
    }

    /// Physical collision groups. Enemy-only barriers are not physical: they
    /// are only seen by probes and enforced by enemy movement.
    pub fn collision_groups(&self) -> CollisionGroups {
        let filter = match self.kind {
            WallKind::Wall => Group::ALL,
            WallKind::PlayerOnly => PLAYER_GROUP | PROBE_GROUP,
            WallKind::EnemyOnly => PROBE_GROUP,
        };
        CollisionGroups::new(MAP_GROUP, filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum GroundMaterial {
    Fire,
    Ice,
    Thunder,
    Wind,
    Dark,
    Water,
    #[default]
    Grass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum GroundState {
    #[default]
    Normal,
    Slippery,
    Sticky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum GroundEffect {
    #[default]
    None,
    Slow,
    Boost,
    Damage,
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum GroundKind {
    #[default]
    Ground,
    Wall,
    Ceiling,
    PassThroughPlatform,
}

/// Ground classification attached to floor colliders.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct GroundType {
    #[serde(default)]
    pub material: GroundMaterial,
    #[serde(default)]
    pub state: GroundState,
    #[serde(default)]
    pub effect: GroundEffect,
    #[serde(default)]
    pub kind: GroundKind,
}

impl GroundType {
    pub fn with_effect(effect: GroundEffect) -> Self {
        Self {
            effect,
            ..default()
        }
    }

    /// Horizontal move speed scale for characters standing on this ground.
    pub fn speed_multiplier(&self) -> f32 {
        match self.effect {
            GroundEffect::Slow => 0.5,
            GroundEffect::Boost => 1.5,
            _ => 1.0,
        }
    }
}
