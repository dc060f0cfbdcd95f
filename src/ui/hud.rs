//! In-game HUD - health, experience, gold and the warp prompt.

use bevy::prelude::*;

use crate::character::{CharacterStatus, Health};
use crate::core::GameState;
use crate::player::{Player, PlayerController, PlayerWallet};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for experience bar fill.
#[derive(Component)]
pub struct ExperienceBar;

/// Level and gold readout.
#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct WarpPrompt;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (
                update_health_bar,
                update_experience_bar,
                update_status_text,
                update_warp_prompt,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Bars and readout (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, "HP", Color::srgb(0.8, 0.2, 0.2), HealthBar);
            spawn_bar(parent, "EXP", Color::srgb(0.3, 0.6, 0.95), ExperienceBar);

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.4)),
                StatusText,
            ));
        });

    // Warp prompt (bottom centre)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::bottom(Val::Px(60.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Press E to warp"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.75, 1.0)),
                Visibility::Hidden,
                WarpPrompt,
            ));
        });
}

/// Helper to spawn a labelled bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(40.0),
                    ..default()
                },
            ));

            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(180.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

/// Fraction of the way to the next level.
fn experience_fraction(status: &CharacterStatus) -> f32 {
    if status.next_experience == 0 {
        return 0.0;
    }
    (status.experience as f32 / status.next_experience as f32).clamp(0.0, 1.0)
}

fn update_experience_bar(
    player_query: Query<&CharacterStatus, With<Player>>,
    mut bar_query: Query<&mut Node, With<ExperienceBar>>,
) {
    let Ok(status) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(experience_fraction(status) * 100.0);
}

fn update_status_text(
    player_query: Query<(&CharacterStatus, &PlayerWallet), With<Player>>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let Ok((status, wallet)) = player_query.get_single() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    **text = format!("Lv {}   Gold {}", status.level, wallet.gold);
}

fn update_warp_prompt(
    player_query: Query<&PlayerController, With<Player>>,
    mut prompt_query: Query<&mut Visibility, With<WarpPrompt>>,
) {
    let show = player_query
        .get_single()
        .map(|controller| controller.in_warp_range() && controller.can_control())
        .unwrap_or(false);

    for mut visibility in prompt_query.iter_mut() {
        let wanted = if show {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_fraction_is_clamped() {
        let mut status = CharacterStatus::default();
        status.experience = 50;
        status.next_experience = 100;
        assert_eq!(experience_fraction(&status), 0.5);

        status.next_experience = 0;
        assert_eq!(experience_fraction(&status), 0.0);

        status.experience = 300;
        status.next_experience = 100;
        assert_eq!(experience_fraction(&status), 1.0);
    }
}
