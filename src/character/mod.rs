//! Character module - the combat core shared by the player and enemies.
//!
//! Status, team and surface classification, hit-stop, knockback, the state
//! machine container and the collaborator surfaces the controllers drive.

mod blink;
mod components;
mod frame;
mod hit_stop;
mod knockback;
mod plugin;
mod registry;
mod state_machine;
mod status;
mod surfaces;
mod team;

#[cfg(test)]
pub(crate) mod testing;

pub use blink::Blink;
pub use components::*;
pub use frame::CharacterFrame;
pub use hit_stop::{HitStop, HitStopRole};
pub use knockback::{Knockback, KnockbackStep};
pub use plugin::CharacterPlugin;
pub use registry::{PlayerRegistry, RegistryError};
pub use state_machine::StateMachine;
pub use status::{CharacterStatus, Health};
pub use surfaces::*;
pub use team::*;
