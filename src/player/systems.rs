//! Player systems: keyboard input, body control, damage and camera follow.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::controller::{PlayerCommand, PlayerController, PlayerHit, PlayerInput};
use crate::character::{
    ActionPaused, Animator, CharacterSprite, GroundSensor, Health, PlayerRegistry, RapierBody,
    SpriteLink, SpriteRig, Team,
};
use crate::combat::{apply_damage, spawn_bullet, BulletShot, DamageOutcome};
use crate::core::{load_or_default, DamageEvent, DeathEvent, GameState, GameplaySet, PlayState};
use crate::world::ArenaEntity;

type PlayerSprites<'w, 's> = Query<
    'w,
    's,
    (&'static mut Sprite, &'static mut Visibility, &'static mut Transform),
    (With<CharacterSprite>, Without<Player>),
>;

/// Set up player systems.
pub fn setup_player_systems(app: &mut App) {
    app.add_systems(Startup, load_player_config)
        // Registration follows the player's lifetime in any state
        .add_systems(
            Update,
            (register_player, unregister_player).before(GameplaySet::Sense),
        )
        .add_systems(
            Update,
            (sense_player_ground, read_player_input)
                .chain()
                .in_set(GameplaySet::Input)
                .run_if(in_state(PlayState::Exploring)),
        )
        .add_systems(
            Update,
            update_player
                .in_set(GameplaySet::Act)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            receive_player_damage
                .in_set(GameplaySet::Damage)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            camera_follow
                .in_set(GameplaySet::Feedback)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            drive_player_body.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            OnTransition {
                exited: GameState::GameOver,
                entered: GameState::InGame,
            },
            revive_player,
        );
}

fn load_player_config(mut commands: Commands) {
    commands.insert_resource(load_or_default::<PlayerConfig>(PlayerConfig::PATH));
}

/// Spawn the player with its sprite child.
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig) -> Entity {
    let half = config.half_extents();
    let position = config.spawn_position();

    let sprite = commands
        .spawn((
            CharacterSprite,
            Animator::default(),
            Sprite::from_color(config.sprite_color(), half * 2.0),
            Transform::default(),
            Visibility::Inherited,
        ))
        .id();

    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerController::new(*config, position),
            PlayerWallet::default(),
            Team::Player,
            config.status,
            Health::from_status(&config.status),
            Animator::default(),
            GroundSensor::new(half, config.ground_check_distance),
            SpriteLink(sprite),
            ArenaEntity,
        ))
        .insert((
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            ExternalImpulse::default(),
            Friction::coefficient(0.0),
            Ccd::enabled(),
            Team::Player.body_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .add_child(sprite)
        .id()
}

fn register_player(mut registry: ResMut<PlayerRegistry>, added: Query<Entity, Added<Player>>) {
    for entity in added.iter() {
        match registry.register(entity) {
            Ok(()) => info!("Player {:?} registered", entity),
            Err(e) => warn!("{}", e),
        }
    }
}

fn unregister_player(mut registry: ResMut<PlayerRegistry>, mut removed: RemovedComponents<Player>) {
    for entity in removed.read() {
        if registry.unregister(entity) {
            info!("Player {:?} unregistered", entity);
        }
    }
}

fn sense_player_ground(mut players: Query<(&GroundSensor, &mut PlayerController)>) {
    for (sensor, mut controller) in players.iter_mut() {
        controller.set_grounded(sensor.grounded, sensor.ground);
    }
}

/// A/D move, Space jumps (grounded) or hovers (held in the air), arrow keys aim.
fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut PlayerController, Without<ActionPaused>>,
) {
    let axis = |negative: KeyCode, positive: KeyCode| {
        let mut value = 0.0;
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        value
    };

    let input = PlayerInput {
        move_x: axis(KeyCode::KeyA, KeyCode::KeyD),
        jump: keyboard.just_pressed(KeyCode::Space),
        hover: keyboard.pressed(KeyCode::Space),
        aim: Vec2::new(
            axis(KeyCode::ArrowLeft, KeyCode::ArrowRight),
            axis(KeyCode::ArrowDown, KeyCode::ArrowUp),
        )
        .normalize_or_zero(),
    };

    for mut controller in players.iter_mut() {
        controller.apply_input(input);
    }
}

/// Per-frame player update: shooting, blink and animator parameters.
fn update_player(
    mut commands: Commands,
    time: Res<Time>,
    mut players: Query<
        (Entity, &mut PlayerController, &mut Animator, &Transform, &SpriteLink),
        (With<Player>, Without<ActionPaused>),
    >,
    mut sprites: PlayerSprites,
) {
    for (entity, mut controller, mut animator, transform, link) in players.iter_mut() {
        let Ok((mut sprite, mut visibility, mut sprite_transform)) = sprites.get_mut(link.0) else {
            continue;
        };
        let mut renderer = SpriteRig {
            sprite: &mut sprite,
            visibility: &mut visibility,
            transform: &mut sprite_transform,
        };

        let position = transform.translation.truncate();
        let command = controller.update(time.delta_secs(), position, &mut renderer, &mut *animator);

        if let Some(PlayerCommand::Fire {
            origin,
            direction,
            speed,
            lifetime,
        }) = command
        {
            spawn_bullet(
                &mut commands,
                BulletShot {
                    team: Team::Player,
                    shooter: entity,
                    origin,
                    direction,
                    speed,
                    lifetime,
                },
            );
        }
    }
}

/// Apply latched input to the player's body on the physics clock.
fn drive_player_body(
    time: Res<Time>,
    mut players: Query<(&mut PlayerController, &mut Velocity, &mut ExternalImpulse), With<Player>>,
) {
    for (mut controller, mut velocity, mut impulse) in players.iter_mut() {
        let mut body = RapierBody {
            velocity: &mut velocity,
            impulse: &mut impulse,
        };
        controller.fixed_update(time.delta_secs(), &mut body);
    }
}

/// Resolve damage events aimed at the player.
fn receive_player_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut death_events: EventWriter<DeathEvent>,
    mut players: Query<(&mut PlayerController, &mut Health), With<Player>>,
) {
    for event in damage_events.read() {
        let Ok((mut controller, mut health)) = players.get_mut(event.target) else {
            continue;
        };

        let mut hooks = PlayerHit {
            controller: &mut controller,
        };
        match apply_damage(&mut health, &mut hooks, event.amount, event.hit_position) {
            DamageOutcome::Killed => {
                info!("Player killed by {:?}", event.source);
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: Some(event.source),
                });
            }
            DamageOutcome::Hurt { remaining } => {
                debug!("Player hit, {} HP left", remaining);
            }
            DamageOutcome::Ignored => {}
        }
    }
}

/// Bring the player back at full health where it started.
fn revive_player(
    mut players: Query<
        (
            &mut PlayerController,
            &mut Health,
            &mut Transform,
            &mut Velocity,
            &SpriteLink,
        ),
        With<Player>,
    >,
    mut sprites: PlayerSprites,
) {
    for (mut controller, mut health, mut transform, mut velocity, link) in players.iter_mut() {
        let Ok((mut sprite, mut visibility, mut sprite_transform)) = sprites.get_mut(link.0) else {
            warn!("Player sprite {:?} is missing, not reviving", link.0);
            continue;
        };

        let max = health.max();
        if !health.revive(max) {
            warn!("Player has no hit points to revive with");
            continue;
        }

        let mut renderer = SpriteRig {
            sprite: &mut sprite,
            visibility: &mut visibility,
            transform: &mut sprite_transform,
        };
        controller.revive(&mut renderer);

        let start = controller.initial_position();
        transform.translation.x = start.x;
        transform.translation.y = start.y;
        velocity.linvel = Vec2::ZERO;
        info!("Player revived with {} HP", max);
    }
}

/// Keep the camera centred on the player.
fn camera_follow(
    players: Query<&Transform, (With<Player>, Without<PlayerCamera>)>,
    mut cameras: Query<(&mut Transform, &PlayerCamera), Without<Player>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };

    for (mut transform, camera) in cameras.iter_mut() {
        let target = player.translation.truncate() + camera.offset;
        transform.translation.x = target.x;
        transform.translation.y = target.y;
    }
}
