//! Victory and game-over overlays with the run summary and restart buttons.

use bevy::prelude::*;

use super::Menu;
use crate::gameplay::combat::KillCount;
use crate::gameplay::waves::WaveDirector;
use crate::screens::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Victory), spawn_victory_screen);
    app.add_systems(OnEnter(Menu::GameOver), spawn_game_over_screen);
}

fn spawn_victory_screen(mut commands: Commands, kills: Res<KillCount>) {
    spawn_endgame_overlay(
        &mut commands,
        "VICTORY!",
        palette::VICTORY_TEXT,
        format!("Enemies Defeated: {}", kills.0),
        Menu::Victory,
    );
}

fn spawn_game_over_screen(
    mut commands: Commands,
    kills: Res<KillCount>,
    director: Res<WaveDirector>,
) {
    spawn_endgame_overlay(
        &mut commands,
        "GAME OVER",
        palette::GAME_OVER_TEXT,
        format!(
            "Reached wave {} of {} with {} kills",
            director.current_wave, director.total_waves, kills.0
        ),
        Menu::GameOver,
    );
}

fn spawn_endgame_overlay(
    commands: &mut Commands,
    title: &str,
    title_color: Color,
    summary: String,
    menu: Menu,
) {
    commands.spawn((
        widget::overlay("Endgame Screen"),
        DespawnOnExit(menu),
        children![(
            widget::panel("Endgame Panel", 320.0),
            children![
                (
                    Text::new(title),
                    TextFont::from_font_size(palette::FONT_SIZE_HEADER),
                    TextColor(title_color),
                ),
                widget::label(summary),
                // Re-entering InGame resets the whole run.
                widget::button(
                    "Play Again",
                    |_: On<Pointer<Click>>,
                     mut next_game: ResMut<NextState<GameState>>,
                     mut next_menu: ResMut<NextState<Menu>>| {
                        next_game.set(GameState::InGame);
                        next_menu.set(Menu::None);
                    },
                ),
                widget::button(
                    "Exit to Menu",
                    |_: On<Pointer<Click>>, mut next_game: ResMut<NextState<GameState>>| {
                        next_game.set(GameState::MainMenu);
                    },
                ),
            ],
        )],
    ));
}
