//! Energy domain: player energy counter and pickups.


use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::locomotion::Player;

#[derive(Component, Debug)]
pub struct PlayerEnergy {
    pub current: u32,
    pub max: u32,
}

impl PlayerEnergy {
    pub fn new(max: u32) -> Self {
        Self { current: 0, max }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Adds energy, clamped at max. Returns whether anything changed.
    pub fn add(&mut self, amount: u32) -> bool {
        if amount == 0 || self.current >= self.max {
            return false;
        }
        self.current = (self.current + amount).min(self.max);
        true
    }

    /// Spends the whole bar at once; only possible when full.
    pub fn try_consume_all(&mut self) -> bool {
        if !self.is_full() {
            return false;
        }
        self.current = 0;
        true
    }

    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Collectible that fills the energy bar on contact
#[derive(Component, Debug)]
pub struct EnergyPickup {
    pub amount: u32,
}

#[derive(Debug)]
pub struct EnergyChangedEvent {
    pub current: u32,
    pub max: u32,
}

impl Message for EnergyChangedEvent {}

#[derive(Debug)]
pub struct EnergyFullEvent;

impl Message for EnergyFullEvent {}

pub struct EnergyPlugin;

impl Plugin for EnergyPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EnergyChangedEvent>()
            .add_message::<EnergyFullEvent>()
            .add_systems(Update, collect_pickups);
    }
}

fn collect_pickups(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut changed_events: MessageWriter<EnergyChangedEvent>,
    mut full_events: MessageWriter<EnergyFullEvent>,
    mut player_query: Query<&mut PlayerEnergy, With<Player>>,
    pickup_query: Query<&EnergyPickup>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, pickup_entity) in pairs {
            let Ok(mut energy) = player_query.get_mut(player_entity) else {
                continue;
            };
            let Ok(pickup) = pickup_query.get(pickup_entity) else {
                continue;
            };

            let was_full = energy.is_full();
            if energy.add(pickup.amount) {
                changed_events.write(EnergyChangedEvent {
                    current: energy.current,
                    max: energy.max,
                });
            }
            if !was_full && energy.is_full() {
                full_events.write(EnergyFullEvent);
            }
            commands.entity(pickup_entity).despawn();
            debug!("Energy pickup: {}/{}", energy.current, energy.max);
        }
    }
}
