//! UI domain: grab prompt label.
//!
//! Driven purely by `GrabPromptEvent`; no gameplay module reads UI
//! state back.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::locomotion::GrabPromptEvent;

/// Marker for the "press E" tooltip
#[derive(Component, Debug)]
pub struct GrabPromptLabel;

pub(crate) fn spawn_grab_prompt(mut commands: Commands) {
    commands.spawn((
        GrabPromptLabel,
        Text::new("Press [E] to grab"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(60.0),
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub(crate) fn update_grab_prompt(
    mut prompt_events: MessageReader<GrabPromptEvent>,
    mut query: Query<&mut Visibility, With<GrabPromptLabel>>,
) {
    let Some(event) = prompt_events.read().last() else {
        return;
    };

    for mut visibility in &mut query {
        *visibility = if event.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
