//! UI plugin - menus, HUD, and interface elements.

use bevy::prelude::*;

use super::{fade, hud};
use crate::core::GameState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        fade::setup_fade_systems(app);

        app
            // Title screen
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, main_menu_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)

            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(GameState::Paused)))
            .add_systems(OnExit(GameState::Paused), cleanup_menu::<PauseMenuUi>)

            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(Update, game_over_input.run_if(in_state(GameState::GameOver)))
            .add_systems(OnExit(GameState::GameOver), cleanup_menu::<GameOverUi>);
    }
}

/// Marker for title screen UI entities.
#[derive(Component)]
struct MainMenuUi;

/// Camera for the title screen, where no arena camera exists.
#[derive(Component)]
struct MenuCamera;

#[derive(Component)]
struct PauseMenuUi;

#[derive(Component)]
struct GameOverUi;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    NewGame,
    Quit,
    Resume,
    MainMenu,
    Retry,
}

impl MenuButton {
    /// Where pressing this button leads. `None` quits the app.
    fn target(self) -> Option<GameState> {
        match self {
            MenuButton::NewGame | MenuButton::Resume | MenuButton::Retry => Some(GameState::InGame),
            MenuButton::MainMenu => Some(GameState::MainMenu),
            MenuButton::Quit => None,
        }
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

fn setup_main_menu(mut commands: Commands) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((
            menu_root(),
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            MainMenuUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, "FXDX", 80.0, Color::srgb(0.95, 0.75, 0.35), 30.0);
            spawn_title(
                parent,
                "A/D move  Space jump  Arrows shoot  E warp",
                18.0,
                Color::srgb(0.5, 0.5, 0.55),
                60.0,
            );

            spawn_menu_button(parent, "New Game", MenuButton::NewGame);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            menu_root(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, "PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 40.0);
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// The arena camera is still alive here, so no menu camera is needed.
fn setup_game_over(mut commands: Commands) {
    commands
        .spawn((
            menu_root(),
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.8)),
            GameOverUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, "GAME OVER", 72.0, Color::srgb(0.8, 0.2, 0.2), 60.0);
            spawn_menu_button(parent, "Retry", MenuButton::Retry);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

fn menu_root() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn spawn_title(parent: &mut ChildBuilder, text: &str, size: f32, color: Color, margin: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(margin)),
            ..default()
        },
    ));
}

fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Shared button handling: highlight, then switch state or quit on press.
fn handle_buttons(
    interaction_query: &mut Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    next_state: &mut NextState<GameState>,
    mut exit: Option<&mut EventWriter<AppExit>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button.target() {
                    Some(state) => next_state.set(state),
                    None => {
                        if let Some(exit) = exit.as_deref_mut() {
                            exit.send(AppExit::Success);
                        }
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

fn main_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    handle_buttons(&mut interaction_query, &mut next_state, Some(&mut exit));
}

fn pause_menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    handle_buttons(&mut interaction_query, &mut next_state, None);
}

fn game_over_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    handle_buttons(&mut interaction_query, &mut next_state, None);
}

fn cleanup_main_menu(
    mut commands: Commands,
    ui_query: Query<Entity, Or<(With<MainMenuUi>, With<MenuCamera>)>>,
) {
    for entity in ui_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn cleanup_menu<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_lead_to_their_states() {
        assert_eq!(MenuButton::NewGame.target(), Some(GameState::InGame));
        assert_eq!(MenuButton::Retry.target(), Some(GameState::InGame));
        assert_eq!(MenuButton::Resume.target(), Some(GameState::InGame));
        assert_eq!(MenuButton::MainMenu.target(), Some(GameState::MainMenu));
        assert_eq!(MenuButton::Quit.target(), None);
    }
}
