//! Full-screen overlay driven by the screen fade.

use bevy::prelude::*;

use crate::core::ScreenFade;

#[derive(Component)]
pub struct FadeOverlay;

pub fn setup_fade_systems(app: &mut App) {
    app.add_systems(Startup, spawn_fade_overlay)
        .add_systems(Update, update_fade_overlay);
}

/// The overlay lives for the whole session so a fade survives menus.
fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::NONE),
        GlobalZIndex(i32::MAX),
        FadeOverlay,
    ));
}

fn update_fade_overlay(
    fade: Res<ScreenFade>,
    mut overlay: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    if !fade.is_changed() {
        return;
    }
    for mut background in overlay.iter_mut() {
        background.0 = Color::BLACK.with_alpha(fade.alpha());
    }
}
