//! Warp gate: fade out, move the player back to the start, fade in.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::arena::ArenaEntity;
use super::data::WarpGateDef;
use crate::character::{PLAYER_GROUP, TRIGGER_GROUP};
use crate::core::{FadeSignal, PlayState, ScreenFade};
use crate::player::{Player, PlayerController};

/// Trigger volume that lets the player warp while standing in it.
#[derive(Component, Debug, Default)]
pub struct WarpGate;

pub fn spawn_warp_gate(commands: &mut Commands, gate: &WarpGateDef) -> Entity {
    let size = Vec2::new(gate.size.0, gate.size.1);
    commands
        .spawn((
            Name::new("WarpGate"),
            WarpGate,
            Sprite::from_color(Color::srgba(0.6, 0.4, 1.0, 0.35), size),
            Transform::from_xyz(gate.position.0, gate.position.1, 0.5),
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            Sensor,
            CollisionGroups::new(TRIGGER_GROUP, PLAYER_GROUP),
            ActiveEvents::COLLISION_EVENTS,
            ArenaEntity,
        ))
        .id()
}

/// Track whether the player is standing in a warp gate.
pub fn detect_warp_range(
    mut collision_events: EventReader<CollisionEvent>,
    gates: Query<(), With<WarpGate>>,
    mut players: Query<&mut PlayerController, With<Player>>,
) {
    for event in collision_events.read() {
        let (a, b, entered) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };

        for (gate, other) in [(a, b), (b, a)] {
            if !gates.contains(gate) {
                continue;
            }
            if let Ok(mut controller) = players.get_mut(other) {
                controller.set_in_warp_range(entered);
            }
        }
    }
}

/// E inside a gate starts the warp.
pub fn start_warp(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut fade: ResMut<ScreenFade>,
    mut next_state: ResMut<NextState<PlayState>>,
    mut players: Query<&mut PlayerController, With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    for mut controller in players.iter_mut() {
        if !controller.in_warp_range() || !controller.can_control() {
            continue;
        }

        controller.set_can_control(false);
        fade.start();
        next_state.set(PlayState::Warping);
        info!("Warp started");
    }
}

/// Advance the fade and act on its milestones.
pub fn run_warp_sequence(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    mut next_state: ResMut<NextState<PlayState>>,
    mut players: Query<(&mut PlayerController, &mut Transform, &mut Velocity), With<Player>>,
) {
    match fade.tick(time.delta_secs()) {
        FadeSignal::Covered => {
            for (controller, mut transform, mut velocity) in players.iter_mut() {
                let start = controller.initial_position();
                transform.translation.x = start.x;
                transform.translation.y = start.y;
                velocity.linvel = Vec2::ZERO;
            }
            debug!("Warp target reached");
        }
        FadeSignal::Finished => {
            for (mut controller, _, _) in players.iter_mut() {
                if !controller.is_dead() {
                    controller.set_can_control(true);
                }
            }
            next_state.set(PlayState::Exploring);
            info!("Warp finished");
        }
        FadeSignal::None => {}
    }
}
