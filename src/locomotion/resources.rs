//! Locomotion domain: tuning and intent resources.

use bevy::prelude::*;
use serde::Deserialize;

/// Intent magnitude below which horizontal input is treated as neutral
pub const AXIS_DEADZONE: f32 = 0.1;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    // World
    /// Downward gravity strength applied to the physics world
    pub gravity: f32,
    /// Terminal fall speed; airborne vertical velocity never drops below
    /// its negation
    pub limit_fall_speed: f32,

    // Walking
    pub move_speed: f32,
    /// Smooth-damp time constant for the horizontal drive
    pub movement_smoothing: f32,
    pub air_control: bool,

    // Jumping
    pub jump_impulse: f32,
    pub max_double_jumps: u8,

    // Sensors
    pub ground_probe_radius: f32,
    /// Distance below the feet at which the ground probe is centered
    pub ground_probe_reach: f32,
    /// Horizontal probe length beyond the body half-width
    pub wall_probe_reach: f32,
    /// Vertical offset of the wall probe anchor from the body center
    pub wall_probe_height: f32,

    // Wall cling / slide
    pub wall_cling_duration: f32,
    pub slide_gravity_fraction: f32,
    pub wall_slide_max_fall: f32,
    /// Speed the slide pulls the character toward the wall
    pub wall_pull_speed: f32,
    /// Rate at which the pull approaches that speed
    pub wall_pull_accel: f32,

    // Wall jump
    pub limit_wall_jumps: bool,
    pub max_wall_jumps: u8,
    pub require_ground_after_wall_jump: bool,
    /// When set, a wall jump requires horizontal intent into the wall
    pub require_wall_input: bool,
    pub wall_jump_move_lock: f32,
    /// No re-cling window armed after a wall jump
    pub no_recling_time: f32,
    pub coyote_time: f32,

    // Wall tap
    pub wall_tap_impulse: f32,
    pub wall_tap_up_factor: f32,
    pub wall_tap_cooldown: f32,

    // Debounce
    pub regrab_cooldown: f32,
    pub min_separation: f32,

    // Dash
    pub dash_force: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,

    // Grab
    pub grab_detect_width: f32,
    pub grab_detect_height: f32,
    pub grab_detect_distance: f32,
    pub hand_offset_x: f32,
    pub hand_offset_y: f32,
    pub grab_move_multiplier: f32,
    pub link_break_force: f32,
    pub link_break_torque: f32,
    /// Force per unit of joint anchor drift, used as the break-force proxy
    pub link_stiffness: f32,
    /// Torque per radian of relative twist, used as the break-torque proxy
    pub link_angular_stiffness: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            gravity: 1700.0,
            limit_fall_speed: 900.0,
            move_speed: 320.0,
            movement_smoothing: 0.05,
            air_control: true,
            jump_impulse: 680.0,
            max_double_jumps: 1,
            ground_probe_radius: 4.0,
            ground_probe_reach: 2.0,
            wall_probe_reach: 6.0,
            wall_probe_height: 0.0,
            wall_cling_duration: 1.0,
            slide_gravity_fraction: 0.6,
            wall_slide_max_fall: 160.0,
            wall_pull_speed: 60.0,
            wall_pull_accel: 800.0,
            limit_wall_jumps: false,
            max_wall_jumps: 1,
            require_ground_after_wall_jump: true,
            require_wall_input: false,
            wall_jump_move_lock: 0.1,
            no_recling_time: 0.25,
            coyote_time: 0.1,
            wall_tap_impulse: 260.0,
            wall_tap_up_factor: 0.55,
            wall_tap_cooldown: 0.2,
            regrab_cooldown: 0.4,
            min_separation: 24.0,
            dash_force: 900.0,
            dash_time: 0.1,
            dash_cooldown: 0.5,
            grab_detect_width: 36.0,
            grab_detect_height: 48.0,
            grab_detect_distance: 20.0,
            hand_offset_x: 12.0,
            hand_offset_y: 0.0,
            grab_move_multiplier: 0.65,
            link_break_force: 6000.0,
            link_break_torque: 6000.0,
            link_stiffness: 500.0,
            link_angular_stiffness: 20000.0,
        }
    }
}

impl LocomotionTuning {
    pub fn hand_offset(&self) -> Vec2 {
        Vec2::new(self.hand_offset_x, self.hand_offset_y)
    }

    pub fn grab_detect_size(&self) -> Vec2 {
        Vec2::new(self.grab_detect_width, self.grab_detect_height)
    }
}

/// Player intent for the current fixed tick. Edges are accumulated in
/// `Update` and cleared after the fixed-tick chain has consumed them, so
/// a press is neither dropped nor double-consumed across frame/tick rate
/// mismatches.
#[derive(Resource, Debug, Default)]
pub struct PlayerIntent {
    pub move_axis: f32,
    pub jump: bool,
    pub jump_held: bool,
    pub dash: bool,
    pub grab_toggle: bool,
}

impl PlayerIntent {
    pub fn clear_edges(&mut self) {
        self.jump = false;
        self.dash = false;
        self.grab_toggle = false;
    }
}
