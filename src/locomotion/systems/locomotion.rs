//! Locomotion domain: timers, jumps, dash, horizontal drive, fall clamp.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::locomotion::{
    AXIS_DEADZONE, ControllerDisabled, Facing, GrabLink, JumpBudget, LocomotionState,
    LocomotionTimers, LocomotionTuning, Player, PlayerIntent,
};

pub(crate) fn tick_timers(time: Res<Time>, mut query: Query<&mut LocomotionTimers, With<Player>>) {
    let dt = time.delta_secs();

    for mut timers in &mut query {
        timers.tick(dt);
    }
}

pub(crate) fn apply_jumps(
    mut intent: ResMut<PlayerIntent>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<
        (
            &mut LocomotionState,
            &mut JumpBudget,
            &LocomotionTimers,
            &mut LinearVelocity,
            Option<&GrabLink>,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    for (mut state, mut budget, timers, mut velocity, grab) in &mut query {
        // Variable jump height: releasing jump cuts the remaining ascent.
        // Skipped during the wall-jump move lock so the arc survives.
        if !intent.jump_held && !state.grounded && velocity.y > 0.0 && timers.can_move() {
            velocity.y *= 0.5;
        }

        if !intent.jump || grab.is_some() || !timers.can_move() {
            continue;
        }

        if state.grounded {
            ground_jump(&mut state, &mut budget, &mut velocity, &tuning);
            intent.jump = false;
            debug!("Ground jump: vy={}", velocity.y);
            continue;
        }

        // A pending wall-jump opportunity (sub-state or an open coyote
        // window) takes the edge; the wall module decides what it buys.
        if !state.wall.is_none() || timers.coyote > 0.0 {
            continue;
        }

        if budget.double_jumps_remaining > 0 {
            double_jump(&mut budget, &mut velocity, &tuning);
            intent.jump = false;
            debug!(
                "Double jump: vy={}, remaining={}",
                velocity.y, budget.double_jumps_remaining
            );
        }
    }
}

/// Ground jump: the vertical velocity is floored at zero before the
/// impulse so takeoff height is identical regardless of prior fall speed.
pub(crate) fn ground_jump(
    state: &mut LocomotionState,
    budget: &mut JumpBudget,
    velocity: &mut LinearVelocity,
    tuning: &LocomotionTuning,
) {
    if velocity.y < 0.0 {
        velocity.y = 0.0;
    }
    velocity.y += tuning.jump_impulse;
    state.grounded = false;
    budget.double_jumps_remaining = tuning.max_double_jumps;
}

/// Air jump at reduced strength; vertical velocity is reset first so the
/// boost is constant.
pub(crate) fn double_jump(
    budget: &mut JumpBudget,
    velocity: &mut LinearVelocity,
    tuning: &LocomotionTuning,
) {
    velocity.y = 0.0;
    velocity.y += tuning.jump_impulse / 1.2;
    budget.double_jumps_remaining -= 1;
}

pub(crate) fn apply_dash(
    intent: Res<PlayerIntent>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<
        (
            &mut LocomotionState,
            &mut LocomotionTimers,
            &mut LinearVelocity,
            Option<&GrabLink>,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    for (mut state, mut timers, mut velocity, grab) in &mut query {
        if intent.dash {
            try_start_dash(&mut state, &mut timers, &tuning, grab.is_some());
        }

        if state.dashing {
            if timers.dash_active <= 0.0 {
                state.dashing = false;
            } else {
                // Horizontal override only; gravity keeps acting on the
                // vertical axis
                velocity.x = state.dash_direction * tuning.dash_force;
            }
        }
    }
}

/// Starts a dash if nothing refuses it. Refusals (cooldown, wall
/// sub-state, grabbing, move lock) are silent no-ops.
pub(crate) fn try_start_dash(
    state: &mut LocomotionState,
    timers: &mut LocomotionTimers,
    tuning: &LocomotionTuning,
    grabbing: bool,
) -> bool {
    if grabbing || !timers.can_move() || !timers.dash_ready() || !state.wall.is_none() {
        return false;
    }

    state.dashing = true;
    state.dash_direction = state.facing.sign();
    timers.dash_active = tuning.dash_time;
    // The cooldown spans the active window too, so the next dash is
    // refused until both have elapsed
    timers.dash_cooldown = tuning.dash_time + tuning.dash_cooldown;
    true
}

pub(crate) fn apply_horizontal(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<
        (
            &mut LocomotionState,
            &LocomotionTimers,
            &mut LinearVelocity,
            Option<&GrabLink>,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    let dt = time.delta_secs();

    for (mut state, timers, mut velocity, grab) in &mut query {
        // Horizontal velocity is frozen while the wall-jump arc lock is
        // active, and the wall module owns it during cling/slide
        if state.dashing || !state.wall.is_none() || !timers.can_move() {
            continue;
        }
        if !state.grounded && !tuning.air_control {
            continue;
        }

        let axis = scaled_move_axis(intent.move_axis, grab.is_some(), &tuning);
        let target = axis * tuning.move_speed;
        let (vx, damp) = smooth_damp(
            velocity.x,
            target,
            state.damp_velocity,
            tuning.movement_smoothing,
            dt,
        );
        velocity.x = vx;
        state.damp_velocity = damp;

        if axis.abs() > AXIS_DEADZONE && grab.is_none() {
            let wants = if axis > 0.0 { Facing::Right } else { Facing::Left };
            state.facing = wants;
        }
    }
}

/// Lateral intent scaling while pushing or pulling a grabbed obstacle.
pub(crate) fn scaled_move_axis(axis: f32, grabbing: bool, tuning: &LocomotionTuning) -> f32 {
    if grabbing {
        axis * tuning.grab_move_multiplier
    } else {
        axis
    }
}

pub(crate) fn clamp_fall_speed(
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&LocomotionState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        if !state.grounded && velocity.y < -tuning.limit_fall_speed {
            velocity.y = -tuning.limit_fall_speed;
        }
    }
}

/// Critically damped smoothing toward a target, returning the new value
/// and the updated smoothing velocity. The approach rate is bounded by
/// the time constant; there is no instantaneous set.
pub(crate) fn smooth_damp(
    current: f32,
    target: f32,
    velocity: f32,
    smooth_time: f32,
    dt: f32,
) -> (f32, f32) {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (velocity + omega * change) * dt;
    let new_velocity = (velocity - omega * temp) * exp;
    (target + (change + temp) * exp, new_velocity)
}

pub(crate) fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
