//! Player module - player entity, controller, and camera follow.

mod components;
pub mod controller;
mod plugin;
mod systems;

pub use components::*;
pub use controller::{PlayerController, PlayerInput, PlayerState};
pub use plugin::PlayerPlugin;
pub use systems::spawn_player;
