//! UI domain: HUD bars and prompts.

mod hud;
mod prompt;

use bevy::prelude::*;

use crate::ui::hud::{spawn_hud_bars, update_energy_bar, update_health_bar};
use crate::ui::prompt::{spawn_grab_prompt, update_grab_prompt};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_hud_bars, spawn_grab_prompt))
            .add_systems(
                Update,
                (update_health_bar, update_energy_bar, update_grab_prompt),
            );
    }
}
