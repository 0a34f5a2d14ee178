//! Title panel: start a run, read the controls, or quit.

use bevy::prelude::*;

use super::Menu;
use crate::screens::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Main), spawn_main_menu);
}

fn spawn_main_menu(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Main Menu Screen"),
        DespawnOnExit(Menu::Main),
        children![(
            widget::panel("Main Menu Panel", 420.0),
            children![
                (
                    Text::new("Arena Survival"),
                    TextFont::from_font_size(palette::FONT_SIZE_TITLE),
                    TextColor(palette::HEADER_TEXT),
                ),
                (
                    Text::new("Survive 20 waves of goblins and dragons"),
                    TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                    TextColor(palette::BODY_TEXT),
                ),
                widget::button(
                    "Start Game",
                    |_: On<Pointer<Click>>,
                     mut next_game: ResMut<NextState<GameState>>,
                     mut next_menu: ResMut<NextState<Menu>>| {
                        next_game.set(GameState::InGame);
                        next_menu.set(Menu::None);
                    },
                ),
                widget::button(
                    "Controls",
                    |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                        next_menu.set(Menu::Controls);
                    },
                ),
                widget::button(
                    "Exit Game",
                    |_: On<Pointer<Click>>, mut exit: MessageWriter<AppExit>| {
                        exit.write(AppExit::Success);
                    },
                ),
            ],
        )],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_entity_count, create_base_test_app_no_input};

    #[test]
    fn main_menu_spawns_title_and_three_buttons() {
        let mut app = create_base_test_app_no_input();
        app.add_plugins(plugin);

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Main);
        app.update();
        app.update();

        // title + tagline + 3 button labels
        assert_entity_count::<With<Text>>(&mut app, 5);
        assert_entity_count::<With<Button>>(&mut app, 3);
    }

    #[test]
    fn main_menu_is_removed_on_exit() {
        let mut app = create_base_test_app_no_input();
        app.add_plugins(plugin);
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Main);
        app.update();

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Controls);
        app.update();

        assert_entity_count::<With<Button>>(&mut app, 0);
    }
}
