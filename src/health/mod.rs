//! Health domain: damage, stun and invincibility windows, death.
//!
//! What happens after death (scene reload, respawn) belongs to the
//! host; this module only emits the event and disables the controller.


use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::locomotion::{ControllerDisabled, LocomotionTimers, Player};

#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Invulnerability frames after surviving a hit
#[derive(Component, Debug, Default)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }
}

/// Deals contact damage to the player
#[derive(Component, Debug)]
pub struct Hazard {
    pub damage: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct HealthTuning {
    /// Move lock applied on surviving a hit
    pub stun_time: f32,
    pub invulnerable_time: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            stun_time: 0.25,
            invulnerable_time: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct PlayerDiedEvent;

impl Message for PlayerDiedEvent {}

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HealthTuning>()
            .add_message::<DamageEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_systems(
                Update,
                (detect_hazard_contact, apply_damage, tick_invulnerability).chain(),
            );
    }
}

fn detect_hazard_contact(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    player_query: Query<Entity, With<Player>>,
    hazard_query: Query<&Hazard>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, hazard_entity) in pairs {
            let Ok(player) = player_query.get(player_entity) else {
                continue;
            };
            let Ok(hazard) = hazard_query.get(hazard_entity) else {
                continue;
            };

            damage_events.write(DamageEvent {
                target: player,
                amount: hazard.damage,
            });
        }
    }
}

fn apply_damage(
    mut commands: Commands,
    tuning: Res<HealthTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut died_events: MessageWriter<PlayerDiedEvent>,
    mut query: Query<
        (
            &mut Health,
            &mut Invulnerable,
            &mut LocomotionTimers,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut invulnerable, mut timers, mut velocity)) =
            query.get_mut(event.target)
        else {
            continue;
        };

        if invulnerable.is_invulnerable() {
            continue;
        }

        health.take_damage(event.amount);

        if health.is_dead() {
            velocity.x = 0.0;
            commands.entity(event.target).insert(ControllerDisabled);
            died_events.write(PlayerDiedEvent);
            info!("Player died");
        } else {
            timers.move_lock = timers.move_lock.max(tuning.stun_time);
            invulnerable.timer = tuning.invulnerable_time;
            debug!("Player hit: {}/{}", health.current, health.max);
        }
    }
}

fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Invulnerable>) {
    let dt = time.delta_secs();

    for mut invulnerable in &mut query {
        invulnerable.timer = (invulnerable.timer - dt).max(0.0);
    }
}
