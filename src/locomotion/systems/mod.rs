//! Locomotion domain: system modules for the fixed-tick chain.

pub(crate) mod grabbing;
pub(crate) mod input;
pub(crate) mod locomotion;
pub(crate) mod sensors;
pub(crate) mod walls;

pub(crate) use grabbing::{handle_grab_toggle, monitor_grab_link, update_grab_prompt};
pub(crate) use input::{clear_intent_edges, gather_intent};
pub(crate) use locomotion::{
    apply_dash, apply_horizontal, apply_jumps, clamp_fall_speed, tick_timers,
};
pub(crate) use sensors::{probe_ground, probe_walls};
pub(crate) use walls::wall_interactions;
