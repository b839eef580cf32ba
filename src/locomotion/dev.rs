//! Locomotion domain: player spawn and sandbox room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::energy::{EnergyPickup, PlayerEnergy};
use crate::health::{Hazard, Health, Invulnerable};
use crate::locomotion::{
    ContactState, GameLayer, Ground, JumpBudget, LocomotionState, LocomotionTimers,
    LocomotionTuning, Player, Pushable, Wall, WallDebounce,
};

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<LocomotionTuning>) {
    commands.spawn((
        // Identity & locomotion
        (
            Player,
            LocomotionState::default(),
            ContactState::default(),
            LocomotionTimers::default(),
            JumpBudget {
                double_jumps_remaining: tuning.max_double_jumps,
                ..default()
            },
            WallDebounce::default(),
        ),
        // Vitals
        (Health::new(10.0), Invulnerable::default(), PlayerEnergy::new(100)),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -100.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(24.0, 48.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Pushable,
                    GameLayer::Pickup,
                    GameLayer::Hazard,
                ],
            ),
        ),
    ));
}

pub(crate) fn spawn_sandbox(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let crate_color = Color::srgb(0.7, 0.55, 0.3);
    let pickup_color = Color::srgb(0.95, 0.9, 0.4);
    let hazard_color = Color::srgb(0.8, 0.25, 0.25);

    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Pushable]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Pushable]);

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(800.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(800.0, 40.0),
        ground_layers,
    ));

    // Left wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(-420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Right wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Platforms
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(-250.0, -50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        ground_layers,
    ));
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(250.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        ground_layers,
    ));

    // Pillar for wall practice
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(30.0, 200.0)),
            ..default()
        },
        Transform::from_xyz(-100.0, -80.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(30.0, 200.0),
        wall_layers,
    ));

    // Pushable crate
    commands.spawn((
        Pushable {
            grabbed_friction: 0.05,
        },
        Sprite {
            color: crate_color,
            custom_size: Some(Vec2::new(40.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(120.0, -160.0, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(40.0, 40.0),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        Friction::new(0.9),
        CollisionLayers::new(
            GameLayer::Pushable,
            [
                GameLayer::Ground,
                GameLayer::Wall,
                GameLayer::Player,
                GameLayer::Pushable,
            ],
        ),
    ));

    // Energy pickups
    for x in [-250.0, 0.0, 250.0] {
        commands.spawn((
            EnergyPickup { amount: 25 },
            Sprite {
                color: pickup_color,
                custom_size: Some(Vec2::new(14.0, 14.0)),
                ..default()
            },
            Transform::from_xyz(x, 110.0, 0.0),
            RigidBody::Static,
            Collider::circle(7.0),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Pickup, [GameLayer::Player]),
        ));
    }

    // Spike strip
    commands.spawn((
        Hazard { damage: 2.0 },
        Sprite {
            color: hazard_color,
            custom_size: Some(Vec2::new(80.0, 12.0)),
            ..default()
        },
        Transform::from_xyz(330.0, -174.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(80.0, 12.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
    ));
}
