//! Locomotion domain: events for collaborators (animation, audio, UI).

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Emitted exactly once per airborne-to-grounded rising edge
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}

/// Emitted when a grab link is created
#[derive(Debug)]
pub struct GrabbedEvent {
    pub target: Entity,
}

impl Message for GrabbedEvent {}

/// Emitted when a grab link is destroyed, whatever the cause
#[derive(Debug)]
pub struct ReleasedEvent {
    pub target: Entity,
}

impl Message for ReleasedEvent {}

/// Presentation-sink event: whether the grab prompt should be shown.
/// Emitted on change only.
#[derive(Debug)]
pub struct GrabPromptEvent {
    pub visible: bool,
}

impl Message for GrabPromptEvent {}
