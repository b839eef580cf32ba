//! Locomotion domain: tests for timers, jumps, wall interaction,
//! debounce, dash, and grab rules.

use avian2d::prelude::{Friction, GravityScale, LinearVelocity};
use bevy::prelude::{Entity, Vec2};

use super::components::{
    Facing, JumpBudget, LocomotionState, LocomotionTimers, WallDebounce, WallState,
};
use super::resources::LocomotionTuning;
use super::systems::grabbing::{grab_permitted, link_overstressed};
use super::systems::locomotion::{
    double_jump, ground_jump, move_towards, scaled_move_axis, smooth_damp, try_start_dash,
};
use super::systems::sensors::apply_landing;
use super::systems::walls::{
    apply_slide_effects, begin_slide, enter_cling, perform_wall_jump, perform_wall_tap,
    wall_jump_allowed,
};

const DT: f32 = 1.0 / 60.0;

fn wall_entity() -> Entity {
    Entity::from_bits(42)
}

fn airborne_kit() -> (
    LocomotionState,
    LocomotionTimers,
    JumpBudget,
    WallDebounce,
    LinearVelocity,
    GravityScale,
) {
    (
        LocomotionState::default(),
        LocomotionTimers::default(),
        JumpBudget::default(),
        WallDebounce::default(),
        LinearVelocity::default(),
        GravityScale(1.0),
    )
}

// -----------------------------------------------------------------------------
// Timer tests
// -----------------------------------------------------------------------------

#[test]
fn test_timers_tick_decrements_and_clamps() {
    let mut timers = LocomotionTimers {
        coyote: 0.1,
        wall_cling: 1.0,
        move_lock: 0.05,
        ..Default::default()
    };

    timers.tick(0.06);

    assert!((timers.coyote - 0.04).abs() < 1e-6);
    assert!((timers.wall_cling - 0.94).abs() < 1e-6);
    assert_eq!(timers.move_lock, 0.0);

    timers.tick(10.0);

    assert_eq!(timers.coyote, 0.0);
    assert_eq!(timers.wall_cling, 0.0);
}

#[test]
fn test_move_lock_gates_can_move() {
    let mut timers = LocomotionTimers::default();
    assert!(timers.can_move());

    timers.move_lock = 0.1;
    assert!(!timers.can_move());

    timers.tick(0.2);
    assert!(timers.can_move());
}

// -----------------------------------------------------------------------------
// Landing tests
// -----------------------------------------------------------------------------

#[test]
fn test_landing_resets_budget_wall_state_and_gravity() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState {
        wall: WallState::Sliding {
            side: 1,
            collider: wall_entity(),
        },
        ..Default::default()
    };
    let mut budget = JumpBudget {
        double_jumps_remaining: 0,
        wall_jumps_used: 2,
        wall_jump_locked: true,
    };
    let mut timers = LocomotionTimers {
        coyote: 0.05,
        wall_cling: 0.4,
        post_wall_jump: 0.2,
        ..Default::default()
    };
    let mut gravity = GravityScale(0.6);

    apply_landing(&mut state, &mut budget, &mut timers, &mut gravity, &tuning);

    assert_eq!(budget.double_jumps_remaining, tuning.max_double_jumps);
    assert_eq!(budget.wall_jumps_used, 0);
    assert!(!budget.wall_jump_locked);
    assert_eq!(state.wall, WallState::None);
    assert_eq!(gravity.0, 1.0);
    assert_eq!(timers.coyote, 0.0);
    assert_eq!(timers.wall_cling, 0.0);
    assert_eq!(timers.post_wall_jump, 0.0);
}

// -----------------------------------------------------------------------------
// Ground jump tests (scenario: grounded + jump edge)
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_applies_full_impulse() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState {
        grounded: true,
        ..Default::default()
    };
    let mut budget = JumpBudget::default();
    let mut velocity = LinearVelocity(Vec2::new(120.0, 0.0));

    ground_jump(&mut state, &mut budget, &mut velocity, &tuning);

    assert_eq!(velocity.y, tuning.jump_impulse);
    assert_eq!(velocity.x, 120.0);
    assert!(!state.grounded);
    assert_eq!(budget.double_jumps_remaining, tuning.max_double_jumps);
}

#[test]
fn test_ground_jump_floors_residual_fall_speed() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState {
        grounded: true,
        ..Default::default()
    };
    let mut budget = JumpBudget::default();
    let mut velocity = LinearVelocity(Vec2::new(0.0, -300.0));

    ground_jump(&mut state, &mut budget, &mut velocity, &tuning);

    // Takeoff height is identical regardless of prior fall speed
    assert_eq!(velocity.y, tuning.jump_impulse);
}

// -----------------------------------------------------------------------------
// Double jump tests (scenario: airborne, budget available, no wall)
// -----------------------------------------------------------------------------

#[test]
fn test_double_jump_reduced_impulse_and_budget() {
    let tuning = LocomotionTuning::default();
    let mut budget = JumpBudget {
        double_jumps_remaining: 1,
        ..Default::default()
    };
    let mut velocity = LinearVelocity(Vec2::new(50.0, -200.0));

    double_jump(&mut budget, &mut velocity, &tuning);

    assert_eq!(velocity.y, tuning.jump_impulse / 1.2);
    assert_eq!(budget.double_jumps_remaining, 0);
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_starts_and_spans_cooldown() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::default();
    let mut timers = LocomotionTimers::default();

    assert!(try_start_dash(&mut state, &mut timers, &tuning, false));
    assert!(state.dashing);
    assert_eq!(state.dash_direction, Facing::Right.sign());
    assert_eq!(timers.dash_active, tuning.dash_time);
    assert_eq!(timers.dash_cooldown, tuning.dash_time + tuning.dash_cooldown);
}

#[test]
fn test_dash_refused_until_active_plus_cooldown_elapsed() {
    let tuning = LocomotionTuning::default();
    let mut state = LocomotionState::default();
    let mut timers = LocomotionTimers::default();

    assert!(try_start_dash(&mut state, &mut timers, &tuning, false));

    // Active window over, cooldown still running
    timers.tick(tuning.dash_time);
    state.dashing = false;
    assert!(!try_start_dash(&mut state, &mut timers, &tuning, false));

    // Almost through the cooldown
    timers.tick(tuning.dash_cooldown - 0.01);
    assert!(!try_start_dash(&mut state, &mut timers, &tuning, false));

    timers.tick(0.02);
    assert!(try_start_dash(&mut state, &mut timers, &tuning, false));
}

#[test]
fn test_dash_refused_in_wall_states_and_while_grabbing() {
    let tuning = LocomotionTuning::default();
    let mut timers = LocomotionTimers::default();

    let mut clinging = LocomotionState {
        wall: WallState::Clinging {
            side: 1,
            collider: wall_entity(),
        },
        ..Default::default()
    };
    assert!(!try_start_dash(&mut clinging, &mut timers, &tuning, false));

    let mut free = LocomotionState::default();
    assert!(!try_start_dash(&mut free, &mut timers, &tuning, true));
    assert_eq!(timers.dash_active, 0.0);
}

// -----------------------------------------------------------------------------
// Wall cling and slide tests
// -----------------------------------------------------------------------------

#[test]
fn test_cling_suspends_then_slides_with_reduced_gravity() {
    let tuning = LocomotionTuning::default();
    let (mut state, mut timers, mut budget, _, mut velocity, mut gravity) = airborne_kit();
    velocity.0 = Vec2::new(40.0, -180.0);
    budget.double_jumps_remaining = 0;

    enter_cling(
        &mut state,
        &mut timers,
        &mut budget,
        &mut velocity,
        &mut gravity,
        &tuning,
        1,
        wall_entity(),
        false,
    );

    assert!(state.is_wall_clinging());
    assert_eq!(gravity.0, 0.0);
    assert_eq!(velocity.0, Vec2::ZERO);
    assert_eq!(state.facing, Facing::Left);
    assert_eq!(timers.wall_cling, tuning.wall_cling_duration);
    assert_eq!(budget.double_jumps_remaining, tuning.max_double_jumps);

    // Hold until the cling timer runs out
    let mut elapsed = 0.0;
    while elapsed < tuning.wall_cling_duration {
        timers.tick(DT);
        elapsed += DT;
    }
    assert_eq!(timers.wall_cling, 0.0);

    begin_slide(&mut state, &mut gravity, &tuning, 1, wall_entity());

    assert!(state.is_wall_sliding());
    assert_eq!(gravity.0, tuning.slide_gravity_fraction);

    // Descent is clamped and the character is pulled toward the wall
    velocity.0 = Vec2::new(-30.0, -500.0);
    apply_slide_effects(&mut velocity, 1, &tuning, DT);

    assert_eq!(velocity.y, -tuning.wall_slide_max_fall);
    assert!(velocity.x > -30.0);
}

// -----------------------------------------------------------------------------
// Wall jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_jump_impulse_locks_and_debounce() {
    let tuning = LocomotionTuning::default();
    let (mut state, mut timers, mut budget, mut debounce, mut velocity, mut gravity) =
        airborne_kit();
    state.wall = WallState::Sliding {
        side: 1,
        collider: wall_entity(),
    };
    gravity.0 = tuning.slide_gravity_fraction;
    velocity.0 = Vec2::new(20.0, -80.0);

    perform_wall_jump(
        &mut state,
        &mut timers,
        &mut budget,
        &mut debounce,
        &mut velocity,
        &mut gravity,
        &tuning,
        1,
        wall_entity(),
        5.0,
        Vec2::new(380.0, 40.0),
    );

    assert_eq!(
        velocity.0,
        Vec2::new(-tuning.jump_impulse * 1.15, tuning.jump_impulse)
    );
    assert_eq!(state.wall, WallState::None);
    assert_eq!(gravity.0, 1.0);
    assert_eq!(budget.wall_jumps_used, 1);
    assert!(budget.wall_jump_locked);
    assert_eq!(budget.double_jumps_remaining, tuning.max_double_jumps);
    assert!(timers.move_lock > 0.0);
    assert!(timers.post_wall_jump > 0.0);
    assert_eq!(timers.coyote, 0.0);

    let record = debounce.record.expect("detach must be recorded");
    assert_eq!(record.collider, wall_entity());
    assert_eq!(record.side, 1);
    assert_eq!(record.point, Vec2::new(380.0, 40.0));
}

#[test]
fn test_wall_jump_quota_never_exceeded() {
    let tuning = LocomotionTuning {
        limit_wall_jumps: true,
        max_wall_jumps: 2,
        require_ground_after_wall_jump: false,
        ..Default::default()
    };
    let (mut state, mut timers, mut budget, mut debounce, mut velocity, mut gravity) =
        airborne_kit();

    for _ in 0..5 {
        if wall_jump_allowed(&budget, &tuning) {
            perform_wall_jump(
                &mut state,
                &mut timers,
                &mut budget,
                &mut debounce,
                &mut velocity,
                &mut gravity,
                &tuning,
                -1,
                wall_entity(),
                0.0,
                Vec2::ZERO,
            );
        }
    }

    assert_eq!(budget.wall_jumps_used, tuning.max_wall_jumps);
    assert!(!wall_jump_allowed(&budget, &tuning));
}

#[test]
fn test_wall_jump_locked_until_landing() {
    let tuning = LocomotionTuning::default();
    let (mut state, mut timers, mut budget, mut debounce, mut velocity, mut gravity) =
        airborne_kit();

    perform_wall_jump(
        &mut state,
        &mut timers,
        &mut budget,
        &mut debounce,
        &mut velocity,
        &mut gravity,
        &tuning,
        1,
        wall_entity(),
        0.0,
        Vec2::ZERO,
    );

    assert!(!wall_jump_allowed(&budget, &tuning));

    apply_landing(&mut state, &mut budget, &mut timers, &mut gravity, &tuning);

    assert!(wall_jump_allowed(&budget, &tuning));
    assert_eq!(budget.wall_jumps_used, 0);
}

// -----------------------------------------------------------------------------
// Wall tap tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_tap_spares_quota_and_refreshes_air_jump() {
    let tuning = LocomotionTuning::default();
    let (mut state, mut timers, mut budget, mut debounce, mut velocity, mut gravity) =
        airborne_kit();
    state.wall = WallState::Clinging {
        side: 1,
        collider: wall_entity(),
    };
    budget.double_jumps_remaining = 0;
    gravity.0 = 0.0;

    perform_wall_tap(
        &mut state,
        &mut timers,
        &mut budget,
        &mut debounce,
        &mut velocity,
        &mut gravity,
        &tuning,
        1,
        wall_entity(),
        3.0,
        Vec2::new(380.0, 10.0),
    );

    assert_eq!(velocity.x, -tuning.wall_tap_impulse);
    assert_eq!(velocity.y, tuning.jump_impulse * tuning.wall_tap_up_factor);
    assert_eq!(budget.wall_jumps_used, 0);
    assert_eq!(budget.double_jumps_remaining, tuning.max_double_jumps);
    assert_eq!(state.wall, WallState::None);
    assert_eq!(gravity.0, 1.0);
    assert_eq!(timers.wall_tap_cooldown, tuning.wall_tap_cooldown);
    assert_eq!(timers.coyote, tuning.coyote_time);
    assert!(debounce.record.is_some());
}

// -----------------------------------------------------------------------------
// Debounce tests
// -----------------------------------------------------------------------------

#[test]
fn test_debounce_refuses_same_wall_inside_both_windows() {
    let tuning = LocomotionTuning::default();
    let mut debounce = WallDebounce::default();
    debounce.record_detach(wall_entity(), 10.0, Vec2::ZERO, 1);

    // Shortly after and barely moved: refused
    assert!(!debounce.allows_reattach(
        wall_entity(),
        10.05,
        Vec2::new(2.0, 0.0),
        tuning.regrab_cooldown,
        tuning.min_separation,
    ));
}

#[test]
fn test_debounce_time_threshold_reopens_attachment() {
    let tuning = LocomotionTuning::default();
    let mut debounce = WallDebounce::default();
    debounce.record_detach(wall_entity(), 10.0, Vec2::ZERO, 1);

    assert!(debounce.allows_reattach(
        wall_entity(),
        10.0 + tuning.regrab_cooldown * 0.5 + 0.01,
        Vec2::ZERO,
        tuning.regrab_cooldown,
        tuning.min_separation,
    ));
}

#[test]
fn test_debounce_distance_threshold_reopens_attachment() {
    let tuning = LocomotionTuning::default();
    let mut debounce = WallDebounce::default();
    debounce.record_detach(wall_entity(), 10.0, Vec2::ZERO, 1);

    assert!(debounce.allows_reattach(
        wall_entity(),
        10.01,
        Vec2::new(tuning.min_separation * 0.5 + 1.0, 0.0),
        tuning.regrab_cooldown,
        tuning.min_separation,
    ));
}

#[test]
fn test_debounce_ignores_other_walls() {
    let tuning = LocomotionTuning::default();
    let mut debounce = WallDebounce::default();
    debounce.record_detach(wall_entity(), 10.0, Vec2::ZERO, 1);

    assert!(debounce.allows_reattach(
        Entity::from_bits(7),
        10.0,
        Vec2::ZERO,
        tuning.regrab_cooldown,
        tuning.min_separation,
    ));
}

// -----------------------------------------------------------------------------
// Horizontal drive tests
// -----------------------------------------------------------------------------

#[test]
fn test_smooth_damp_is_bounded_and_converges() {
    let mut value = 0.0;
    let mut damp = 0.0;

    let (first, _) = smooth_damp(value, 100.0, damp, 0.05, DT);
    assert!(first > 0.0);
    assert!(first < 100.0);

    for _ in 0..60 {
        let (v, d) = smooth_damp(value, 100.0, damp, 0.05, DT);
        value = v;
        damp = d;
    }
    assert!((value - 100.0).abs() < 1.0);
}

#[test]
fn test_move_towards_caps_step_size() {
    assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
    assert_eq!(move_towards(0.0, -10.0, 3.0), -3.0);
    assert_eq!(move_towards(9.0, 10.0, 3.0), 10.0);
}

// -----------------------------------------------------------------------------
// Grab tests
// -----------------------------------------------------------------------------

#[test]
fn test_grab_requires_ground() {
    let grounded = LocomotionState {
        grounded: true,
        ..Default::default()
    };
    let airborne = LocomotionState::default();

    assert!(grab_permitted(&grounded));
    assert!(!grab_permitted(&airborne));
}

#[test]
fn test_grab_scales_move_axis() {
    let tuning = LocomotionTuning::default();

    assert_eq!(
        scaled_move_axis(1.0, true, &tuning),
        tuning.grab_move_multiplier
    );
    assert_eq!(scaled_move_axis(-0.5, false, &tuning), -0.5);
}

#[test]
fn test_link_stress_thresholds() {
    let tuning = LocomotionTuning::default();
    let break_drift = tuning.link_break_force / tuning.link_stiffness;
    let break_twist = tuning.link_break_torque / tuning.link_angular_stiffness;

    assert!(!link_overstressed(break_drift * 0.9, 0.0, &tuning));
    assert!(link_overstressed(break_drift * 1.1, 0.0, &tuning));
    assert!(!link_overstressed(0.0, break_twist * 0.9, &tuning));
    assert!(link_overstressed(0.0, break_twist * 1.1, &tuning));
}

#[test]
fn test_release_restores_recorded_friction_and_tears_down_link() {
    use bevy::ecs::message::{MessageWriter, Messages};
    use bevy::ecs::system::SystemState;
    use bevy::prelude::{Commands, Query, Transform, World};

    use super::components::{GrabLink, Pushable};
    use super::events::ReleasedEvent;
    use super::systems::grabbing::release_grab;

    let mut world = World::new();
    world.init_resource::<Messages<ReleasedEvent>>();

    // Target currently carries the slick grabbed friction
    let target = world
        .spawn((
            Transform::default(),
            Friction::new(0.05),
            Pushable {
                grabbed_friction: 0.05,
            },
        ))
        .id();
    let joint = world.spawn_empty().id();
    let player = world.spawn_empty().id();

    let link = GrabLink {
        joint,
        target,
        prior_friction: Friction::new(0.9),
        anchor_character: Vec2::ZERO,
        anchor_target: Vec2::ZERO,
        initial_twist: 0.0,
    };
    world.entity_mut(player).insert(link.clone());

    let mut system_state: SystemState<(
        Commands,
        Query<(&Transform, &mut Friction, &Pushable)>,
        MessageWriter<ReleasedEvent>,
    )> = SystemState::new(&mut world);
    let (mut commands, mut targets, mut released_events) = system_state.get_mut(&mut world);

    release_grab(&mut commands, player, &link, &mut targets, &mut released_events);
    system_state.apply(&mut world);

    let restored = world.get::<Friction>(target).expect("target keeps friction");
    assert_eq!(restored.dynamic_coefficient, 0.9);
    assert_eq!(restored.static_coefficient, 0.9);
    assert!(world.get::<GrabLink>(player).is_none());
    assert!(world.get_entity(joint).is_err());
}
