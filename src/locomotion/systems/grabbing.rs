//! Locomotion domain: grab-and-push. Detection, breakable link,
//! friction swap, prompt events.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::locomotion::{
    ControllerDisabled, GameLayer, GrabLink, GrabPromptEvent, GrabbedEvent, LocomotionState,
    LocomotionTuning, Player, PlayerIntent, Pushable, ReleasedEvent,
};

pub(crate) fn handle_grab_toggle(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut intent: ResMut<PlayerIntent>,
    tuning: Res<LocomotionTuning>,
    mut grabbed_events: MessageWriter<GrabbedEvent>,
    mut released_events: MessageWriter<ReleasedEvent>,
    player_query: Query<
        (Entity, &Transform, &LocomotionState, Option<&GrabLink>),
        (With<Player>, Without<ControllerDisabled>),
    >,
    mut targets: Query<(&Transform, &mut Friction, &Pushable)>,
) {
    if !intent.grab_toggle {
        return;
    }
    intent.grab_toggle = false;

    for (player, transform, state, link) in &player_query {
        if let Some(link) = link {
            release_grab(&mut commands, player, link, &mut targets, &mut released_events);
            debug!("Released grab of {:?}", link.target);
        } else {
            if !grab_permitted(state) {
                continue;
            }
            try_grab(
                &mut commands,
                &spatial_query,
                &tuning,
                player,
                transform,
                state,
                &mut targets,
                &mut grabbed_events,
            );
        }
    }
}

/// Grabs start on the ground only; everything else is a silent no-op.
pub(crate) fn grab_permitted(state: &LocomotionState) -> bool {
    state.grounded
}

fn try_grab(
    commands: &mut Commands,
    spatial_query: &SpatialQuery,
    tuning: &LocomotionTuning,
    player: Entity,
    transform: &Transform,
    state: &LocomotionState,
    targets: &mut Query<(&Transform, &mut Friction, &Pushable)>,
    grabbed_events: &mut MessageWriter<GrabbedEvent>,
) {
    let position = transform.translation.truncate();
    let hand = hand_point(position, state.facing.sign(), tuning);
    let filter = SpatialQueryFilter::from_mask(GameLayer::Pushable);

    let hits = spatial_query.shape_intersections(
        &Collider::rectangle(tuning.grab_detect_width, tuning.grab_detect_height),
        hand,
        0.0,
        &filter,
    );

    for target in hits {
        let Ok((target_transform, mut friction, pushable)) = targets.get_mut(target) else {
            continue;
        };

        let prior_friction = *friction;
        *friction = Friction::new(pushable.grabbed_friction);

        let anchor_character = hand - position;
        let target_position = target_transform.translation.truncate();
        let target_twist = z_rotation(target_transform);
        let anchor_target = Vec2::from_angle(-target_twist).rotate(hand - target_position);

        let joint = commands
            .spawn(
                FixedJoint::new(player, target)
                    .with_local_anchor1(anchor_character)
                    .with_local_anchor2(anchor_target),
            )
            .id();

        commands.entity(player).insert(GrabLink {
            joint,
            target,
            prior_friction,
            anchor_character,
            anchor_target,
            initial_twist: z_rotation(transform) - target_twist,
        });
        grabbed_events.write(GrabbedEvent { target });
        debug!("Grabbed pushable {target:?}");
        return;
    }
}

/// Destroys the link and restores the target exactly as recorded at
/// grab time. Every release cause funnels through here.
pub(crate) fn release_grab(
    commands: &mut Commands,
    player: Entity,
    link: &GrabLink,
    targets: &mut Query<(&Transform, &mut Friction, &Pushable)>,
    released_events: &mut MessageWriter<ReleasedEvent>,
) {
    if let Ok(mut joint_commands) = commands.get_entity(link.joint) {
        joint_commands.despawn();
    }
    if let Ok((_, mut friction, _)) = targets.get_mut(link.target) {
        *friction = link.prior_friction;
    }
    commands.entity(player).remove::<GrabLink>();
    released_events.write(ReleasedEvent {
        target: link.target,
    });
}

/// Watches the active link each tick: releases when the target vanished
/// externally, when the controller was disabled, or when the stress
/// proxy crosses the break thresholds.
pub(crate) fn monitor_grab_link(
    mut commands: Commands,
    tuning: Res<LocomotionTuning>,
    mut released_events: MessageWriter<ReleasedEvent>,
    player_query: Query<(Entity, &Transform, &GrabLink, Has<ControllerDisabled>), With<Player>>,
    mut targets: Query<(&Transform, &mut Friction, &Pushable)>,
) {
    for (player, transform, link, disabled) in &player_query {
        let Ok((target_transform, _, _)) = targets.get(link.target) else {
            // Target despawned externally: the joint goes with it, and the
            // link is resolved here rather than surfacing an error
            if let Ok(mut joint_commands) = commands.get_entity(link.joint) {
                joint_commands.despawn();
            }
            commands.entity(player).remove::<GrabLink>();
            released_events.write(ReleasedEvent {
                target: link.target,
            });
            continue;
        };

        if disabled {
            release_grab(&mut commands, player, link, &mut targets, &mut released_events);
            continue;
        }

        let character_anchor = transform.translation.truncate()
            + Vec2::from_angle(z_rotation(transform)).rotate(link.anchor_character);
        let target_anchor = target_transform.translation.truncate()
            + Vec2::from_angle(z_rotation(target_transform)).rotate(link.anchor_target);
        let drift = character_anchor.distance(target_anchor);
        let twist =
            (z_rotation(transform) - z_rotation(target_transform) - link.initial_twist).abs();

        if link_overstressed(drift, twist, &tuning) {
            release_grab(&mut commands, player, link, &mut targets, &mut released_events);
            debug!("Grab link broke: drift={drift:.1}, twist={twist:.2}");
        }
    }
}

/// Break-threshold proxy: anchor drift stands in for constraint force,
/// relative twist for constraint torque.
pub(crate) fn link_overstressed(drift: f32, twist: f32, tuning: &LocomotionTuning) -> bool {
    drift * tuning.link_stiffness > tuning.link_break_force
        || twist * tuning.link_angular_stiffness > tuning.link_break_torque
}

/// Emits a presentation-sink event when a pushable enters or leaves the
/// detection box of a grounded, empty-handed character.
pub(crate) fn update_grab_prompt(
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    mut prompt_events: MessageWriter<GrabPromptEvent>,
    mut was_visible: Local<bool>,
    query: Query<(&Transform, &LocomotionState, Option<&GrabLink>), With<Player>>,
) {
    for (transform, state, link) in &query {
        let visible = link.is_none() && state.grounded && {
            let hand = hand_point(
                transform.translation.truncate(),
                state.facing.sign(),
                &tuning,
            );
            let filter = SpatialQueryFilter::from_mask(GameLayer::Pushable);
            !spatial_query
                .shape_intersections(
                    &Collider::rectangle(tuning.grab_detect_width, tuning.grab_detect_height),
                    hand,
                    0.0,
                    &filter,
                )
                .is_empty()
        };

        if visible != *was_visible {
            *was_visible = visible;
            prompt_events.write(GrabPromptEvent { visible });
        }
    }
}

fn hand_point(position: Vec2, facing_sign: f32, tuning: &LocomotionTuning) -> Vec2 {
    position + tuning.hand_offset() + Vec2::new(facing_sign * tuning.grab_detect_distance, 0.0)
}

fn z_rotation(transform: &Transform) -> f32 {
    transform.rotation.to_euler(EulerRot::ZYX).0
}
