//! Items module - gold and experience pickups dropped by enemies.

mod components;
pub mod item;
mod plugin;
mod systems;

pub use components::*;
pub use item::{roll_drops, DropSpawn, Item, ItemKind, ItemTick, ItemTuning};
pub use plugin::ItemPlugin;
pub use systems::spawn_item;
