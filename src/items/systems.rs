//! Item systems - drops, lifetime, magnet and pickup.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ItemConfig, ItemSensor};
use super::item::{apply_pickup, roll_drops, Item, ItemKind, ItemTick};
use crate::character::{
    CharacterStatus, PlayerRegistry, SpriteRig, ITEM_GROUP, MAP_GROUP, PLAYER_GROUP,
};
use crate::core::{
    load_or_default, GameRng, GameState, GameplaySet, ItemDropEvent, ItemPickupEvent, LevelUpEvent,
};
use crate::player::{Player, PlayerWallet};
use crate::world::ArenaEntity;

/// Configure item systems.
pub fn setup_item_systems(app: &mut App) {
    app.add_systems(Startup, load_item_config)
        .add_systems(
            Update,
            (tick_items, magnetize_items)
                .in_set(GameplaySet::Act)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            detect_item_pickups
                .in_set(GameplaySet::Collide)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (apply_item_pickups, spawn_item_drops)
                .in_set(GameplaySet::Feedback)
                .run_if(in_state(GameState::InGame)),
        );
}

fn load_item_config(mut commands: Commands) {
    commands.insert_resource(load_or_default::<ItemConfig>(ItemConfig::PATH));
}

/// Spawn a pickup with a physical body and a player-only trigger child.
pub fn spawn_item(
    commands: &mut Commands,
    config: &ItemConfig,
    kind: ItemKind,
    position: Vec2,
    impulse: Vec2,
) -> Entity {
    let tuning = config.tuning(kind);
    let half = tuning.size * 0.5;
    let color = Color::srgb(tuning.color.0, tuning.color.1, tuning.color.2);

    let item = commands
        .spawn((
            Name::new(format!("{:?}", kind)),
            Item::new(kind, tuning),
            Sprite::from_color(color, Vec2::splat(tuning.size)),
            Transform::from_translation(position.extend(1.5)),
            Visibility::Inherited,
            RigidBody::Dynamic,
            Collider::ball(half),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            ExternalImpulse {
                impulse,
                ..default()
            },
            CollisionGroups::new(ITEM_GROUP, MAP_GROUP),
            ArenaEntity,
        ))
        .id();

    commands.entity(item).with_children(|parent| {
        parent.spawn((
            ItemSensor { item },
            Transform::default(),
            Collider::ball(half * 1.5),
            Sensor,
            CollisionGroups::new(ITEM_GROUP, PLAYER_GROUP),
            ActiveEvents::COLLISION_EVENTS,
        ));
    });

    item
}

/// Count item lifetimes down, blink near the end and despawn expired ones.
fn tick_items(
    mut commands: Commands,
    time: Res<Time>,
    mut items: Query<(Entity, &mut Item, &mut Sprite, &mut Visibility, &mut Transform)>,
) {
    for (entity, mut item, mut sprite, mut visibility, mut transform) in items.iter_mut() {
        let mut renderer = SpriteRig {
            sprite: &mut sprite,
            visibility: &mut visibility,
            transform: &mut transform,
        };
        if item.tick(time.delta_secs(), &mut renderer) == ItemTick::Expired {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Pull items within magnet range toward the registered player.
fn magnetize_items(
    registry: Res<PlayerRegistry>,
    players: Query<&Transform, (With<Player>, Without<Item>)>,
    mut items: Query<(&Item, &Transform, &mut Velocity)>,
) {
    let target = registry
        .current()
        .and_then(|player| players.get(player).ok())
        .map(|transform| transform.translation.truncate());

    for (item, transform, mut velocity) in items.iter_mut() {
        if let Some(seek) = item.seek_velocity(transform.translation.truncate(), target) {
            velocity.linvel = seek;
        }
    }
}

/// Collect items whose trigger touched the player.
fn detect_item_pickups(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    sensors: Query<&ItemSensor>,
    players: Query<(), With<Player>>,
    mut items: Query<&mut Item>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        for (sensor_entity, other) in [(*a, *b), (*b, *a)] {
            let Ok(sensor) = sensors.get(sensor_entity) else {
                continue;
            };
            if !players.contains(other) {
                continue;
            }
            let Ok(mut item) = items.get_mut(sensor.item) else {
                continue;
            };
            if !item.try_collect() {
                continue;
            }

            pickup_events.send(ItemPickupEvent {
                item: sensor.item,
                player: other,
                kind: item.kind(),
                amount: item.amount(),
            });
            commands.entity(sensor.item).despawn_recursive();
        }
    }
}

/// Credit collected items to the player.
fn apply_item_pickups(
    config: Res<ItemConfig>,
    mut pickup_events: EventReader<ItemPickupEvent>,
    mut players: Query<(&mut PlayerWallet, &mut CharacterStatus), With<Player>>,
    mut level_events: EventWriter<LevelUpEvent>,
) {
    for event in pickup_events.read() {
        let Ok((mut wallet, mut status)) = players.get_mut(event.player) else {
            continue;
        };

        let levels = apply_pickup(
            event.kind,
            event.amount,
            &mut wallet,
            &mut status,
            config.experience_growth,
        );
        debug!("Picked up {:?} +{}", event.kind, event.amount);

        if levels > 0 {
            info!("Player reached level {}", status.level);
            level_events.send(LevelUpEvent {
                player: event.player,
                new_level: status.level,
            });
        }
    }
}

/// Scatter loot where enemies died.
fn spawn_item_drops(
    mut commands: Commands,
    config: Res<ItemConfig>,
    mut rng: ResMut<GameRng>,
    mut drop_events: EventReader<ItemDropEvent>,
) {
    for event in drop_events.read() {
        for drop in roll_drops(event.gold_min, event.gold_max, &mut rng.0) {
            spawn_item(
                &mut commands,
                &config,
                drop.kind,
                event.position + drop.offset,
                drop.impulse,
            );
        }
    }
}
