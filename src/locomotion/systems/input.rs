//! Locomotion domain: intent sampling.
//!
//! Edges are accumulated every frame and consumed by the fixed-tick
//! chain, which clears them at its end.

use bevy::prelude::*;

use crate::locomotion::PlayerIntent;

pub(crate) fn gather_intent(keyboard: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    intent.move_axis = x;
    intent.jump |= keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    intent.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    intent.dash |=
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
    intent.grab_toggle |= keyboard.just_pressed(KeyCode::KeyE);
}

pub(crate) fn clear_intent_edges(mut intent: ResMut<PlayerIntent>) {
    intent.clear_edges();
}
