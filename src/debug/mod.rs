//! Debug overlay for fast iteration: live locomotion state readout,
//! toggled with F3. Compiled only with the `dev-tools` feature.

use bevy::prelude::*;

use crate::locomotion::{JumpBudget, LocomotionState, LocomotionTimers, Player, WallState};

/// Marker for the overlay text
#[derive(Component, Debug)]
pub struct DebugOverlayText;

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub overlay_visible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Startup, spawn_overlay)
            .add_systems(Update, (toggle_overlay, update_overlay));
    }
}

fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        DebugOverlayText,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.7, 0.9, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn toggle_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugState>,
    mut query: Query<&mut Visibility, With<DebugOverlayText>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    state.overlay_visible = !state.overlay_visible;
    for mut visibility in &mut query {
        *visibility = if state.overlay_visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

fn update_overlay(
    state: Res<DebugState>,
    player_query: Query<(&LocomotionState, &LocomotionTimers, &JumpBudget), With<Player>>,
    mut text_query: Query<&mut Text, With<DebugOverlayText>>,
) {
    if !state.overlay_visible {
        return;
    }

    let Ok((locomotion, timers, budget)) = player_query.single() else {
        return;
    };

    let wall = match locomotion.wall {
        WallState::None => "none".to_string(),
        WallState::Clinging { side, .. } => format!("clinging({side})"),
        WallState::Sliding { side, .. } => format!("sliding({side})"),
    };

    for mut text in &mut text_query {
        text.0 = format!(
            "grounded: {}\nwall: {}\ndashing: {}\ndouble jumps: {}\nwall jumps used: {} (locked: {})\nmove lock: {:.2}\ncoyote: {:.2}",
            locomotion.grounded,
            wall,
            locomotion.dashing,
            budget.double_jumps_remaining,
            budget.wall_jumps_used,
            budget.wall_jump_locked,
            timers.move_lock,
            timers.coyote,
        );
    }
}
