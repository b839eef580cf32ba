//! Locomotion domain: deterministic platformer character control.
//!
//! Each fixed tick runs sensors first, then timers, then the intent
//! consumers in priority order; avian integrates afterwards.

mod components;
mod dev;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    ContactState, ControllerDisabled, DetachRecord, Facing, GameLayer, GrabLink, Ground,
    JumpBudget, LocomotionState, LocomotionTimers, Player, Pushable, Wall, WallDebounce, WallHit,
    WallState,
};
pub use events::{GrabPromptEvent, GrabbedEvent, LandedEvent, ReleasedEvent};
pub use resources::{AXIS_DEADZONE, LocomotionTuning, PlayerIntent};

use bevy::prelude::*;

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .init_resource::<PlayerIntent>()
            .add_message::<LandedEvent>()
            .add_message::<GrabbedEvent>()
            .add_message::<ReleasedEvent>()
            .add_message::<GrabPromptEvent>()
            .add_systems(Startup, (dev::spawn_player, dev::spawn_sandbox))
            .add_systems(Update, systems::gather_intent)
            .add_systems(
                FixedUpdate,
                (
                    systems::probe_ground,
                    systems::probe_walls,
                    systems::tick_timers,
                    systems::handle_grab_toggle,
                    systems::apply_jumps,
                    systems::wall_interactions,
                    systems::apply_dash,
                    systems::apply_horizontal,
                    systems::monitor_grab_link,
                    systems::update_grab_prompt,
                    systems::clamp_fall_speed,
                    systems::clear_intent_edges,
                )
                    .chain(),
            );
    }
}
