//! UI domain: HUD bars for health and energy.

use bevy::prelude::*;

use crate::energy::{EnergyChangedEvent, PlayerEnergy};
use crate::health::Health;
use crate::locomotion::Player;

use bevy::ecs::message::MessageReader;

pub(crate) const HUD_BAR_WIDTH: f32 = 200.0;
pub(crate) const HUD_BAR_HEIGHT: f32 = 16.0;
pub(crate) const HUD_PADDING: f32 = 16.0;

/// Marker for the health bar fill element
#[derive(Component)]
pub struct HealthBarFill;

/// Marker for the energy bar fill element
#[derive(Component)]
pub struct EnergyBarFill;

pub(crate) fn spawn_hud_bars(mut commands: Commands) {
    spawn_bar(
        &mut commands,
        HUD_PADDING,
        Color::srgb(0.2, 0.8, 0.3),
        HealthBarFill,
        Val::Percent(100.0),
    );
    spawn_bar(
        &mut commands,
        HUD_PADDING + HUD_BAR_HEIGHT + 8.0,
        Color::srgb(0.9, 0.85, 0.3),
        EnergyBarFill,
        Val::Percent(0.0),
    );
}

fn spawn_bar(
    commands: &mut Commands,
    top: f32,
    fill_color: Color,
    fill_marker: impl Component,
    initial_width: Val,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(top),
                width: Val::Px(HUD_BAR_WIDTH),
                height: Val::Px(HUD_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                fill_marker,
                Node {
                    width: initial_width,
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(fill_color),
            ));
        });
}

pub(crate) fn update_health_bar(
    player_query: Query<&Health, (With<Player>, Changed<Health>)>,
    mut fill_query: Query<&mut Node, With<HealthBarFill>>,
) {
    let Ok(health) = player_query.single() else {
        return;
    };

    for mut node in &mut fill_query {
        node.width = Val::Percent(health.percent().clamp(0.0, 1.0) * 100.0);
    }
}

pub(crate) fn update_energy_bar(
    mut changed_events: MessageReader<EnergyChangedEvent>,
    player_query: Query<&PlayerEnergy, With<Player>>,
    mut fill_query: Query<&mut Node, With<EnergyBarFill>>,
) {
    if changed_events.read().next().is_none() {
        return;
    }

    let Ok(energy) = player_query.single() else {
        return;
    };

    for mut node in &mut fill_query {
        node.width = Val::Percent(energy.percent() * 100.0);
    }
}
