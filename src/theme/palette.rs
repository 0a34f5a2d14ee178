//! Color constants and font size tokens for consistent UI theming.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Ammo counter with plenty left.
pub const GOLD_TEXT: Color = Color::srgb(1.0, 0.85, 0.0);

pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

// === HUD Colors ===

pub const HEALTH_TEXT: Color = Color::srgb(0.95, 0.35, 0.35);
pub const STAMINA_TEXT: Color = Color::srgb(0.35, 0.8, 0.95);
pub const AMMO_LOW: Color = Color::srgb(1.0, 0.55, 0.0);
pub const AMMO_EMPTY: Color = Color::srgb(1.0, 0.15, 0.15);
pub const CROSSHAIR: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);

/// Full-screen tint shown briefly when the player is hit.
pub const DAMAGE_FLASH: Color = Color::srgba(1.0, 0.0, 0.0, 0.3);

/// On-screen touch controls.
pub const TOUCH_CONTROL: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
pub const TOUCH_CONTROL_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);

// === UI Backgrounds ===

/// Semi-transparent dark overlay for pause/modal screens.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Panel background (dark blue-gray, nearly opaque).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.95);

/// Panel border (light blue-gray, semi-transparent).
pub const PANEL_BORDER: Color = Color::srgba(0.5, 0.5, 0.6, 0.8);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.4, 0.75);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.6, 0.82);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.6);

// === Endgame Accents ===

pub const VICTORY_TEXT: Color = Color::srgb(0.1, 0.9, 0.1);
pub const GAME_OVER_TEXT: Color = Color::srgb(0.8, 0.2, 0.2);

// === World Colors ===

pub const SKY: Color = Color::srgb(0.53, 0.81, 0.92);
pub const GROUND: Color = Color::srgb(0.3, 0.55, 0.25);
pub const TREE_TRUNK: Color = Color::srgb(0.4, 0.26, 0.13);
pub const TREE_LEAVES: Color = Color::srgb(0.13, 0.45, 0.13);
pub const GOBLIN: Color = Color::srgb(0.2, 0.6, 0.2);
pub const GOBLIN_KING: Color = Color::srgb(0.55, 0.1, 0.6);
pub const DRAGON: Color = Color::srgb(0.7, 0.15, 0.1);
pub const DRAGON_KING: Color = Color::srgb(0.2, 0.05, 0.05);
pub const AMMO_BOX: Color = Color::srgb(0.85, 0.7, 0.1);
pub const FIRE: Color = Color::srgb(1.0, 0.4, 0.0);
pub const TRACER: Color = Color::srgb(1.0, 1.0, 0.3);

// === Font Size Tokens ===

pub const FONT_SIZE_TITLE: f32 = 72.0;
pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 28.0;
pub const FONT_SIZE_PROMPT: f32 = 24.0;
pub const FONT_SIZE_BODY: f32 = 16.0;
