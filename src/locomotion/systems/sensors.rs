//! Locomotion domain: ground and wall contact sensors.
//!
//! Pure queries against the physics world, evaluated once per fixed
//! tick before anything else runs. A degenerate probe configuration
//! makes the corresponding sensor report no contact permanently.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::locomotion::{
    ContactState, GameLayer, JumpBudget, LandedEvent, LocomotionState, LocomotionTimers,
    LocomotionTuning, Player, WallHit, WallState,
};

pub(crate) fn probe_ground(
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    mut landed_events: MessageWriter<LandedEvent>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &mut ContactState,
            &mut LocomotionState,
            &mut JumpBudget,
            &mut LocomotionTimers,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider, mut contact, mut state, mut budget, mut timers, mut gravity) in
        &mut query
    {
        let was_grounded = state.grounded;

        if tuning.ground_probe_radius <= 0.0 {
            contact.on_ground = false;
            state.grounded = false;
            continue;
        }

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let probe_center = transform.translation.truncate()
            - Vec2::new(0.0, half_height + tuning.ground_probe_reach);
        let filter = ground_filter.clone().with_excluded_entities([entity]);

        let hits = spatial_query.shape_intersections(
            &Collider::circle(tuning.ground_probe_radius),
            probe_center,
            0.0,
            &filter,
        );

        contact.on_ground = !hits.is_empty();
        state.grounded = contact.on_ground;

        if state.grounded && !was_grounded {
            apply_landing(&mut state, &mut budget, &mut timers, &mut gravity, &tuning);
            landed_events.write(LandedEvent { entity });
            debug!(
                "Landed: double_jumps={}, wall_jumps_used reset",
                budget.double_jumps_remaining
            );
        }
    }
}

/// Rising-edge landing reset: refill the air-jump budget, clear the
/// wall-jump quota and lock, drop any wall sub-state and its timers,
/// and restore default gravity.
pub(crate) fn apply_landing(
    state: &mut LocomotionState,
    budget: &mut JumpBudget,
    timers: &mut LocomotionTimers,
    gravity: &mut GravityScale,
    tuning: &LocomotionTuning,
) {
    budget.double_jumps_remaining = tuning.max_double_jumps;
    budget.wall_jumps_used = 0;
    budget.wall_jump_locked = false;
    state.wall = WallState::None;
    gravity.0 = 1.0;
    timers.coyote = 0.0;
    timers.wall_cling = 0.0;
    timers.post_wall_jump = 0.0;
}

pub(crate) fn probe_walls(
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(Entity, &Transform, &Collider, &LocomotionState, &mut ContactState), With<Player>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (entity, transform, collider, state, mut contact) in &mut query {
        // Grounded characters are never wall-adjacent
        if state.grounded || tuning.wall_probe_reach <= 0.0 {
            contact.wall = None;
            continue;
        }

        let half_width = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.x,
            None => 12.0,
        };

        let origin =
            transform.translation.truncate() + Vec2::new(0.0, tuning.wall_probe_height);
        let max_distance = half_width + tuning.wall_probe_reach;
        let filter = wall_filter.clone().with_excluded_entities([entity]);

        let left_hit = spatial_query.cast_ray(origin, Dir2::NEG_X, max_distance, true, &filter);
        let right_hit = spatial_query.cast_ray(origin, Dir2::X, max_distance, true, &filter);

        contact.wall = match (left_hit, right_hit) {
            (Some(hit), None) => Some(WallHit {
                side: -1,
                collider: hit.entity,
            }),
            (None, Some(hit)) => Some(WallHit {
                side: 1,
                collider: hit.entity,
            }),
            _ => None,
        };
    }
}
