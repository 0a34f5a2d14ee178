//! Pause overlay: Esc resumes, Q abandons the run.

use bevy::prelude::*;

use super::Menu;
use crate::screens::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Pause), spawn_pause_menu);
    app.add_systems(Update, handle_pause_input.run_if(in_state(Menu::Pause)));
}

fn spawn_pause_menu(mut commands: Commands) {
    commands.spawn((
        widget::overlay("Pause Screen"),
        DespawnOnExit(Menu::Pause),
        children![
            widget::header("PAUSED"),
            (
                Text::new("Press ESC to Resume | Q to Quit"),
                TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                TextColor(palette::BODY_TEXT),
            ),
        ],
    ));
}

fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_menu: ResMut<NextState<Menu>>,
    mut next_game_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::None);
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        // The main menu screen opens Menu::Main on entry.
        next_game_state.set(GameState::MainMenu);
    }
}
