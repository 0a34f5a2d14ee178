//! Input boundary: keyboard, pointer and virtual joystick become plain data.
//!
//! The joystick itself is fed by [`super::touch`].
//!
//! Sampling happens every frame in `Update`. One-shot actions are latched in
//! [`PendingActions`] until the next simulation step consumes them, so a tap
//! on a frame that runs zero fixed steps is not lost.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::gameplay::player::{LookAngles, Player};
use crate::screens::GameState;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Radians of look rotation per pixel of pointer motion.
pub const POINTER_SENSITIVITY: f32 = 0.002;

/// Radians of look rotation per pixel of touch drag.
pub const TOUCH_SENSITIVITY: f32 = 0.003;

// === Resources ===

/// Continuous movement intent for the current frame.
///
/// `movement.x` is strafe (right positive), `movement.y` is forward/back
/// (forward positive). Both axes are within `[-1, 1]`.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlayerInput {
    pub movement: Vec2,
    pub sprint: bool,
}

/// Edge-triggered actions waiting for the next simulation step.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct PendingActions {
    pub jump: bool,
    pub dodge: bool,
    pub attack: bool,
}

/// On-screen joystick and look-drag state, written by the touch front end.
///
/// `axis` uses screen orientation: positive `y` is down. `look_drag` is the
/// touch drag in pixels since the last frame and is drained when applied.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct VirtualJoystick {
    pub axis: Vec2,
    pub active: bool,
    pub look_drag: Vec2,
}

/// Whether the pointer is captured for mouse look.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct PointerCapture {
    pub locked: bool,
}

// === Pure Functions ===

/// Combines keyboard axes and the joystick into one movement vector.
#[must_use]
pub fn movement_axes(keyboard: &ButtonInput<KeyCode>, joystick: &VirtualJoystick) -> Vec2 {
    let mut axes = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axes.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axes.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axes.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axes.x -= 1.0;
    }
    if joystick.active {
        // Screen-up on the stick means forward.
        axes += Vec2::new(joystick.axis.x, -joystick.axis.y);
    }
    axes.clamp(Vec2::NEG_ONE, Vec2::ONE)
}

// === Systems ===

fn reset_input(
    mut input: ResMut<PlayerInput>,
    mut actions: ResMut<PendingActions>,
    mut joystick: ResMut<VirtualJoystick>,
) {
    *input = PlayerInput::default();
    *actions = PendingActions::default();
    *joystick = VirtualJoystick::default();
}

pub(crate) fn record_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    joystick: Res<VirtualJoystick>,
    mut input: ResMut<PlayerInput>,
) {
    input.movement = movement_axes(&keyboard, &joystick);
    input.sprint = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
}

fn record_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    capture: Res<PointerCapture>,
    mut actions: ResMut<PendingActions>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        actions.jump = true;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        actions.dodge = true;
    }
    // The click that captures the pointer does not shoot.
    if capture.locked && mouse.just_pressed(MouseButton::Left) {
        actions.attack = true;
    }
}

pub(crate) fn apply_pointer_look(
    motion: Res<AccumulatedMouseMotion>,
    capture: Res<PointerCapture>,
    mut joystick: ResMut<VirtualJoystick>,
    mut look: Query<&mut LookAngles, With<Player>>,
) {
    let mut turn = std::mem::take(&mut joystick.look_drag) * TOUCH_SENSITIVITY;
    if capture.locked {
        turn += motion.delta * POINTER_SENSITIVITY;
    }
    if turn == Vec2::ZERO {
        return;
    }
    let Ok(mut look) = look.single_mut() else {
        return;
    };
    look.turn(turn);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PlayerInput>()
        .register_type::<PendingActions>()
        .register_type::<VirtualJoystick>()
        .register_type::<PointerCapture>();

    app.init_resource::<PlayerInput>()
        .init_resource::<PendingActions>()
        .init_resource::<VirtualJoystick>()
        .init_resource::<PointerCapture>();

    app.add_systems(OnEnter(GameState::InGame), reset_input);
    app.add_systems(
        Update,
        (record_movement, record_actions)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        apply_pointer_look
            .in_set(GameSet::Camera)
            .run_if(gameplay_running),
    );
}
