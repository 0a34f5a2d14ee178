//! HUD layout: vitals (top left), wave and kills (top right), status line and crosshair.

use bevy::prelude::*;

use crate::screens::GameState;
use crate::theme::palette;

// === Layout Constants ===

const HUD_PADDING: f32 = 16.0;
const CROSSHAIR_SIZE: f32 = 4.0;

// === Components ===

/// Which snapshot value a HUD text shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum HudField {
    Health,
    Stamina,
    Ammo,
    Kills,
    Wave,
    Status,
}

/// Marker for the dot in the middle of the screen.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Crosshair;

fn hud_text(field: HudField, color: Color) -> impl Bundle {
    (
        Name::new(format!("HUD {field:?}")),
        field,
        Text::default(),
        TextFont::from_font_size(palette::FONT_SIZE_HUD),
        TextColor(color),
    )
}

fn corner(name: &'static str, left: bool) -> impl Bundle {
    (
        Name::new(name),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_PADDING),
            left: if left { Val::Px(HUD_PADDING) } else { Val::Auto },
            right: if left { Val::Auto } else { Val::Px(HUD_PADDING) },
            flex_direction: FlexDirection::Column,
            align_items: if left {
                AlignItems::FlexStart
            } else {
                AlignItems::FlexEnd
            },
            row_gap: Val::Px(4.0),
            ..default()
        },
    )
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        corner("HUD Vitals", true),
        DespawnOnExit(GameState::InGame),
        children![
            hud_text(HudField::Health, palette::HEALTH_TEXT),
            hud_text(HudField::Stamina, palette::STAMINA_TEXT),
            hud_text(HudField::Ammo, palette::GOLD_TEXT),
        ],
    ));

    commands.spawn((
        corner("HUD Progress", false),
        DespawnOnExit(GameState::InGame),
        children![
            hud_text(HudField::Wave, palette::HEADER_TEXT),
            hud_text(HudField::Kills, palette::BODY_TEXT),
        ],
    ));

    commands.spawn((
        Name::new("HUD Status"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_PADDING),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        DespawnOnExit(GameState::InGame),
        children![hud_text(HudField::Status, palette::HEADER_TEXT)],
    ));

    commands.spawn((
        Name::new("Crosshair"),
        Crosshair,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(CROSSHAIR_SIZE),
            height: Val::Px(CROSSHAIR_SIZE),
            margin: UiRect::all(Val::Px(-CROSSHAIR_SIZE / 2.0)),
            ..default()
        },
        BackgroundColor(palette::CROSSHAIR),
        Pickable::IGNORE,
        DespawnOnExit(GameState::InGame),
    ));
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HudField>().register_type::<Crosshair>();
    app.add_systems(OnEnter(GameState::InGame), spawn_hud);
}
