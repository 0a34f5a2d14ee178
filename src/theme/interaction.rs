//! Hover and press feedback for menu buttons.

use bevy::picking::hover::Hovered;
use bevy::prelude::*;
use bevy::ui::Pressed;

/// Background colors for a button's idle, hovered and pressed looks.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
#[require(Hovered)]
pub struct InteractionPalette {
    pub none: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl InteractionPalette {
    #[must_use]
    pub const fn pick(&self, pressed: bool, hovered: bool) -> Color {
        match (pressed, hovered) {
            (true, _) => self.pressed,
            (false, true) => self.hovered,
            (false, false) => self.none,
        }
    }
}

fn apply_interaction_palette(
    mut buttons: Query<
        (Has<Pressed>, &Hovered, &InteractionPalette, &mut BackgroundColor),
        Or<(Changed<Interaction>, Changed<Hovered>)>,
    >,
) {
    for (pressed, Hovered(hovered), palette, mut background) in &mut buttons {
        background.set_if_neq(BackgroundColor(palette.pick(pressed, *hovered)));
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<InteractionPalette>();
    app.add_systems(Update, apply_interaction_palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IDLE: Color = Color::srgb(1.0, 0.0, 0.0);
    const HOVER: Color = Color::srgb(0.0, 1.0, 0.0);
    const PRESS: Color = Color::srgb(0.0, 0.0, 1.0);

    fn palette() -> InteractionPalette {
        InteractionPalette {
            none: IDLE,
            hovered: HOVER,
            pressed: PRESS,
        }
    }

    #[test]
    fn pressed_wins_over_hovered() {
        let palette = palette();
        assert_eq!(palette.pick(true, true), PRESS);
        assert_eq!(palette.pick(false, true), HOVER);
        assert_eq!(palette.pick(false, false), IDLE);
    }

    #[test]
    fn new_button_gets_idle_color() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, apply_interaction_palette);

        let button = app
            .world_mut()
            .spawn((Button, BackgroundColor(Color::BLACK), palette(), Interaction::None))
            .id();
        app.update();

        let background = app.world().get::<BackgroundColor>(button).map(|b| b.0);
        assert_eq!(background, Some(IDLE));
    }

    #[test]
    fn hovering_switches_color() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, apply_interaction_palette);

        let button = app
            .world_mut()
            .spawn((Button, BackgroundColor(Color::BLACK), palette(), Interaction::None))
            .id();
        app.update();
        app.world_mut().entity_mut(button).insert(Hovered(true));
        app.update();

        let background = app.world().get::<BackgroundColor>(button).map(|b| b.0);
        assert_eq!(background, Some(HOVER));
    }
}
