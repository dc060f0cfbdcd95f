//! User interface - title, pause and game over menus, the HUD and the
//! warp fade overlay.

mod fade;
mod hud;
mod plugin;

pub use plugin::UiPlugin;
