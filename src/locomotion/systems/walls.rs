//! Locomotion domain: wall interaction. Cling, slide, wall jump, wall
//! tap, and the anti-repeat debounce.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::locomotion::systems::locomotion::move_towards;
use crate::locomotion::{
    AXIS_DEADZONE, ContactState, ControllerDisabled, Facing, GrabLink, JumpBudget,
    LocomotionState, LocomotionTimers, LocomotionTuning, Player, PlayerIntent, WallDebounce,
    WallState,
};

pub(crate) fn wall_interactions(
    time: Res<Time>,
    mut intent: ResMut<PlayerIntent>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<
        (
            &Transform,
            &ContactState,
            &mut LocomotionState,
            &mut LocomotionTimers,
            &mut JumpBudget,
            &mut WallDebounce,
            &mut LinearVelocity,
            &mut GravityScale,
            Option<&GrabLink>,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (
        transform,
        contact,
        mut state,
        mut timers,
        mut budget,
        mut debounce,
        mut velocity,
        mut gravity,
        grab,
    ) in &mut query
    {
        if state.grounded {
            continue;
        }

        let position = transform.translation.truncate();

        // Entry: falling (or dashing) into a wall starts a cling, unless
        // the no-re-cling window or the debounce refuses it. Wall contact
        // always cancels an active dash.
        if state.wall.is_none() {
            if let Some(hit) = contact.wall {
                let was_dashing = state.dashing;
                if state.dashing {
                    state.dashing = false;
                    timers.dash_active = 0.0;
                }

                if (velocity.y <= 0.0 || was_dashing)
                    && timers.post_wall_jump <= 0.0
                    && debounce.allows_reattach(
                        hit.collider,
                        now,
                        position,
                        tuning.regrab_cooldown,
                        tuning.min_separation,
                    )
                {
                    enter_cling(
                        &mut state,
                        &mut timers,
                        &mut budget,
                        &mut velocity,
                        &mut gravity,
                        &tuning,
                        hit.side,
                        hit.collider,
                        grab.is_some(),
                    );
                    debug!("Wall cling: side={}", hit.side);
                }
            }
        } else if contact.wall.is_none() {
            // Contact lost: drop the sub-state and open the coyote window
            if let WallState::Clinging { side, collider } | WallState::Sliding { side, collider } =
                state.wall
            {
                state.wall = WallState::None;
                gravity.0 = 1.0;
                timers.wall_cling = 0.0;
                timers.coyote = tuning.coyote_time;
                budget.double_jumps_remaining = tuning.max_double_jumps;
                debounce.record_detach(collider, now, position, side);
                debug!("Wall detached: side={}", side);
            }
        }

        // Cling hold; slide once the hold expires
        if let WallState::Clinging { side, collider } = state.wall {
            gravity.0 = 0.0;
            velocity.0 = Vec2::ZERO;
            if timers.wall_cling <= 0.0 {
                begin_slide(&mut state, &mut gravity, &tuning, side, collider);
            }
        }

        if let WallState::Sliding { side, .. } = state.wall {
            apply_slide_effects(&mut velocity, side, &tuning, dt);
        }

        if intent.jump {
            let context = match state.wall {
                WallState::Clinging { side, collider } | WallState::Sliding { side, collider } => {
                    Some((side, collider))
                }
                WallState::None if timers.coyote > 0.0 => {
                    debounce.record.map(|rec| (rec.side, rec.collider))
                }
                WallState::None => None,
            };

            if let Some((side, collider)) = context {
                // The edge belongs to the wall module here; a refused
                // request stays a silent no-op
                intent.jump = false;

                let input_ok = !tuning.require_wall_input
                    || intent.move_axis * side as f32 > AXIS_DEADZONE;
                if grab.is_none()
                    && timers.can_move()
                    && input_ok
                    && wall_jump_allowed(&budget, &tuning)
                {
                    perform_wall_jump(
                        &mut state,
                        &mut timers,
                        &mut budget,
                        &mut debounce,
                        &mut velocity,
                        &mut gravity,
                        &tuning,
                        side,
                        collider,
                        now,
                        position,
                    );
                    debug!("Wall jump: side={}, used={}", side, budget.wall_jumps_used);
                }
            }
        } else if timers.wall_tap_cooldown <= 0.0 && timers.can_move() && grab.is_none() {
            // Tap off: directional input away from the wall, no jump edge
            if let WallState::Clinging { side, collider } | WallState::Sliding { side, collider } =
                state.wall
            {
                if (intent.move_axis * side as f32) < -AXIS_DEADZONE {
                    perform_wall_tap(
                        &mut state,
                        &mut timers,
                        &mut budget,
                        &mut debounce,
                        &mut velocity,
                        &mut gravity,
                        &tuning,
                        side,
                        collider,
                        now,
                        position,
                    );
                    debug!("Wall tap: side={}", side);
                }
            }
        }

        // Outside every wall sub-state the default gravity applies
        if state.wall.is_none() && gravity.0 != 1.0 {
            gravity.0 = 1.0;
        }
    }
}

/// Suspend against the wall: zero gravity, zero velocity, cling timer
/// armed, facing turned away (unless grabbing), air-jump budget
/// refreshed.
pub(crate) fn enter_cling(
    state: &mut LocomotionState,
    timers: &mut LocomotionTimers,
    budget: &mut JumpBudget,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    tuning: &LocomotionTuning,
    side: i8,
    collider: Entity,
    grabbing: bool,
) {
    state.wall = WallState::Clinging { side, collider };
    state.dashing = false;
    if !grabbing {
        state.facing = Facing::away_from(side);
    }
    timers.dash_active = 0.0;
    timers.wall_cling = tuning.wall_cling_duration;
    gravity.0 = 0.0;
    velocity.0 = Vec2::ZERO;
    budget.double_jumps_remaining = tuning.max_double_jumps;
}

/// Cling hold expired: reduced-gravity descent along the wall.
pub(crate) fn begin_slide(
    state: &mut LocomotionState,
    gravity: &mut GravityScale,
    tuning: &LocomotionTuning,
    side: i8,
    collider: Entity,
) {
    state.wall = WallState::Sliding { side, collider };
    gravity.0 = tuning.slide_gravity_fraction;
}

/// Per-tick slide effects: clamp the descent and pull toward the wall.
pub(crate) fn apply_slide_effects(
    velocity: &mut LinearVelocity,
    side: i8,
    tuning: &LocomotionTuning,
    dt: f32,
) {
    if velocity.y < -tuning.wall_slide_max_fall {
        velocity.y = -tuning.wall_slide_max_fall;
    }
    velocity.x = move_towards(
        velocity.x,
        side as f32 * tuning.wall_pull_speed,
        tuning.wall_pull_accel * dt,
    );
}

/// Quota and lock gates for a wall jump.
pub(crate) fn wall_jump_allowed(budget: &JumpBudget, tuning: &LocomotionTuning) -> bool {
    if tuning.require_ground_after_wall_jump && budget.wall_jump_locked {
        return false;
    }
    if tuning.limit_wall_jumps && budget.wall_jumps_used >= tuning.max_wall_jumps {
        return false;
    }
    true
}

pub(crate) fn perform_wall_jump(
    state: &mut LocomotionState,
    timers: &mut LocomotionTimers,
    budget: &mut JumpBudget,
    debounce: &mut WallDebounce,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    tuning: &LocomotionTuning,
    side: i8,
    collider: Entity,
    now: f32,
    position: Vec2,
) {
    state.wall = WallState::None;
    gravity.0 = 1.0;
    velocity.0 = Vec2::new(
        -(side as f32) * tuning.jump_impulse * 1.15,
        tuning.jump_impulse,
    );
    timers.move_lock = tuning.wall_jump_move_lock;
    timers.post_wall_jump = tuning.no_recling_time;
    timers.wall_cling = 0.0;
    timers.coyote = 0.0;
    budget.wall_jumps_used += 1;
    if tuning.require_ground_after_wall_jump {
        budget.wall_jump_locked = true;
    }
    budget.double_jumps_remaining = tuning.max_double_jumps;
    debounce.record_detach(collider, now, position, side);
}

/// Small repositioning impulse off the wall. Does not touch the
/// wall-jump quota; refreshes the air jump and opens a brief coyote
/// window.
pub(crate) fn perform_wall_tap(
    state: &mut LocomotionState,
    timers: &mut LocomotionTimers,
    budget: &mut JumpBudget,
    debounce: &mut WallDebounce,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    tuning: &LocomotionTuning,
    side: i8,
    collider: Entity,
    now: f32,
    position: Vec2,
) {
    state.wall = WallState::None;
    gravity.0 = 1.0;
    velocity.0 = Vec2::new(
        -(side as f32) * tuning.wall_tap_impulse,
        tuning.jump_impulse * tuning.wall_tap_up_factor,
    );
    timers.wall_cling = 0.0;
    timers.wall_tap_cooldown = tuning.wall_tap_cooldown;
    timers.coyote = tuning.coyote_time;
    budget.double_jumps_remaining = tuning.max_double_jumps;
    debounce.record_detach(collider, now, position, side);
}
