//! World module - arena layout, map geometry, and the warp gate.

mod arena;
mod data;
mod plugin;
mod warp;

pub use arena::ArenaEntity;
pub use data::{ArenaDefinition, BlockDef, BlockKind, EnemySpawn, WarpGateDef};
pub use plugin::WorldPlugin;
pub use warp::WarpGate;
