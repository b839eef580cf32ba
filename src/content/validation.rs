//! Range validation for loaded tuning values.

use crate::locomotion::LocomotionTuning;

/// A validation warning with context about what is off.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tuning field '{}': {}", self.field, self.message)
    }
}

/// Helper macro for a single range check
macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $msg:expr) => {
        if !$cond {
            $errors.push(ValidationError {
                field: $field,
                message: $msg.to_string(),
            });
        }
    };
}

/// Validate a loaded tuning. Returns warnings, empty if everything is in
/// range. Degenerate probe values are reported but not rejected: the
/// corresponding sensor simply never reports contact.
pub fn validate_tuning(tuning: &LocomotionTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(errors, tuning.gravity > 0.0, "gravity", "must be positive");
    check!(
        errors,
        tuning.limit_fall_speed > 0.0,
        "limit_fall_speed",
        "must be positive"
    );
    check!(errors, tuning.move_speed > 0.0, "move_speed", "must be positive");
    check!(
        errors,
        tuning.movement_smoothing > 0.0,
        "movement_smoothing",
        "must be positive"
    );
    check!(
        errors,
        tuning.jump_impulse > 0.0,
        "jump_impulse",
        "must be positive"
    );
    check!(
        errors,
        tuning.ground_probe_radius > 0.0,
        "ground_probe_radius",
        "not positive; the ground sensor will never report contact"
    );
    check!(
        errors,
        tuning.wall_probe_reach > 0.0,
        "wall_probe_reach",
        "not positive; the wall sensor will never report contact"
    );
    check!(
        errors,
        tuning.wall_cling_duration > 0.0,
        "wall_cling_duration",
        "must be positive"
    );
    check!(
        errors,
        tuning.slide_gravity_fraction > 0.0 && tuning.slide_gravity_fraction <= 1.0,
        "slide_gravity_fraction",
        "must be in (0, 1]"
    );
    check!(
        errors,
        tuning.wall_slide_max_fall > 0.0,
        "wall_slide_max_fall",
        "must be positive"
    );
    check!(
        errors,
        !tuning.limit_wall_jumps || tuning.max_wall_jumps >= 1,
        "max_wall_jumps",
        "must be at least 1 when limit_wall_jumps is set"
    );
    check!(
        errors,
        tuning.regrab_cooldown >= 0.0,
        "regrab_cooldown",
        "must not be negative"
    );
    check!(
        errors,
        tuning.min_separation >= 0.0,
        "min_separation",
        "must not be negative"
    );
    check!(errors, tuning.dash_time > 0.0, "dash_time", "must be positive");
    check!(
        errors,
        tuning.dash_cooldown >= 0.0,
        "dash_cooldown",
        "must not be negative"
    );
    check!(
        errors,
        tuning.grab_move_multiplier > 0.0 && tuning.grab_move_multiplier <= 1.0,
        "grab_move_multiplier",
        "must be in (0, 1]"
    );
    check!(
        errors,
        tuning.link_stiffness > 0.0,
        "link_stiffness",
        "must be positive"
    );
    check!(
        errors,
        tuning.link_angular_stiffness > 0.0,
        "link_angular_stiffness",
        "must be positive"
    );

    errors
}
