//! Combat module - damage resolution, invincibility, bullets.

mod bullets;
mod components;
mod plugin;
mod resolver;
mod systems;

pub use bullets::{spawn_bullet, BulletShot};
pub use components::*;
pub use plugin::CombatPlugin;
pub use resolver::{apply_damage, CombatHooks, DamageOutcome, DAMAGE_PER_HIT};
