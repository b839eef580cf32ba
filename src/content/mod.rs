//! Content domain: RON-backed tuning loaded at startup.

mod loader;
mod validation;


pub use loader::{ContentLoadError, load_locomotion_tuning};
pub use validation::{ValidationError, validate_tuning};

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

use crate::locomotion::LocomotionTuning;

const TUNING_PATH: &str = "assets/data/locomotion.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // PreStartup so spawn systems read the loaded values
        app.add_systems(PreStartup, load_tuning);
    }
}

fn load_tuning(mut tuning: ResMut<LocomotionTuning>, mut gravity: ResMut<Gravity>) {
    match load_locomotion_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            for warning in validate_tuning(&loaded) {
                warn!("{}", warning);
            }
            *tuning = loaded;
            info!("Loaded locomotion tuning from {}", TUNING_PATH);
        }
        Err(e) => {
            warn!("{}; using default tuning", e);
        }
    }

    gravity.0 = Vec2::NEG_Y * tuning.gravity;
}
