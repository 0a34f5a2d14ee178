//! Controls reference, reached from the main menu.

use bevy::prelude::*;

use super::Menu;
use crate::theme::{palette, widget};

/// Action and binding pairs, in display order.
pub const BINDINGS: [(&str, &str); 8] = [
    ("Move", "W A S D / touch joystick"),
    ("Look", "Mouse / drag on screen"),
    ("Sprint", "Shift"),
    ("Jump", "Space / JUMP button"),
    ("Dodge", "E"),
    ("Shoot", "Left click / FIRE button"),
    ("Pause", "Esc"),
    ("Quit to menu", "Q while paused"),
];

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Controls), spawn_controls_menu);
}

fn binding_row((action, keys): (&'static str, &'static str)) -> impl Bundle {
    (
        Name::new(format!("Binding {action}")),
        Node {
            width: Val::Percent(100.0),
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        },
        children![
            (
                Text::new(action),
                TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                TextColor(palette::HEADER_TEXT),
            ),
            (
                Text::new(keys),
                TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                TextColor(palette::BODY_TEXT),
            ),
        ],
    )
}

fn spawn_controls_menu(mut commands: Commands) {
    let panel = commands
        .spawn((
            widget::panel("Controls Panel", 500.0),
            children![widget::header("Controls")],
        ))
        .id();
    for binding in BINDINGS {
        commands.spawn((binding_row(binding), ChildOf(panel)));
    }
    commands.spawn((
        widget::button(
            "Back",
            |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                next_menu.set(Menu::Main);
            },
        ),
        ChildOf(panel),
    ));

    commands
        .spawn((widget::ui_root("Controls Screen"), DespawnOnExit(Menu::Controls)))
        .add_child(panel);
}
