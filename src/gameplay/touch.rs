//! Touch front end: on-screen joystick, shoot and jump buttons, and swipe look.
//!
//! Touches are routed by where they start. A finger that lands on the
//! joystick keeps steering until it lifts, wherever it wanders; one that lands
//! on open screen keeps looking. Everything ends up in [`VirtualJoystick`] and
//! [`PendingActions`], the same resources the keyboard and mouse feed.

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::gameplay::input::{PendingActions, VirtualJoystick};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

// === Layout Constants ===

/// Distance of the controls from the screen edges, in logical pixels.
const EDGE_MARGIN: f32 = 30.0;

/// Radius of the joystick base. Touches starting inside it steer.
pub const JOYSTICK_RADIUS: f32 = 75.0;

/// Stick travel that counts as full deflection.
pub const JOYSTICK_MAX_DISTANCE: f32 = 40.0;

pub const SHOOT_BUTTON_RADIUS: f32 = 40.0;
pub const JUMP_BUTTON_RADIUS: f32 = 32.0;

/// Gap between the shoot and jump buttons.
const BUTTON_GAP: f32 = 20.0;

/// Viewport assumed until a window reports its size.
const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

// === Resources ===

/// Screen placement of the touch controls, in logical pixels with `y` down.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct TouchLayout {
    pub viewport: Vec2,
}

impl Default for TouchLayout {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// Where a touch landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Joystick,
    Shoot,
    Jump,
    Look,
}

impl TouchLayout {
    #[must_use]
    pub fn joystick_center(&self) -> Vec2 {
        Vec2::new(
            EDGE_MARGIN + JOYSTICK_RADIUS,
            self.viewport.y - EDGE_MARGIN - JOYSTICK_RADIUS,
        )
    }

    #[must_use]
    pub fn shoot_center(&self) -> Vec2 {
        self.viewport - Vec2::splat(EDGE_MARGIN + SHOOT_BUTTON_RADIUS)
    }

    #[must_use]
    pub fn jump_center(&self) -> Vec2 {
        self.shoot_center()
            - Vec2::new(0.0, SHOOT_BUTTON_RADIUS + BUTTON_GAP + JUMP_BUTTON_RADIUS)
    }

    #[must_use]
    pub fn zone(&self, position: Vec2) -> TouchZone {
        if position.distance(self.joystick_center()) <= JOYSTICK_RADIUS {
            TouchZone::Joystick
        } else if position.distance(self.shoot_center()) <= SHOOT_BUTTON_RADIUS {
            TouchZone::Shoot
        } else if position.distance(self.jump_center()) <= JUMP_BUTTON_RADIUS {
            TouchZone::Jump
        } else {
            TouchZone::Look
        }
    }

    /// Stick deflection for a finger at `position`, within the unit circle.
    #[must_use]
    pub fn stick_axis(&self, position: Vec2) -> Vec2 {
        let offset = position - self.joystick_center();
        offset.clamp_length_max(JOYSTICK_MAX_DISTANCE) / JOYSTICK_MAX_DISTANCE
    }
}

/// Which finger owns the joystick and which one is looking.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct TouchControls {
    pub joystick: Option<u64>,
    pub look: Option<u64>,
    /// Last position the look finger was read at.
    pub look_anchor: Vec2,
    /// Set by the first touch of the session; shows the on-screen controls.
    pub seen: bool,
}

impl TouchControls {
    /// Claims a new touch. Buttons latch their action; the joystick and look
    /// go to the first finger that asks.
    pub fn begin(
        &mut self,
        id: u64,
        position: Vec2,
        zone: TouchZone,
        actions: &mut PendingActions,
    ) {
        self.seen = true;
        match zone {
            TouchZone::Shoot => actions.attack = true,
            TouchZone::Jump => actions.jump = true,
            TouchZone::Joystick => {
                self.joystick.get_or_insert(id);
            }
            TouchZone::Look if self.look.is_none() => {
                self.look = Some(id);
                self.look_anchor = position;
            }
            TouchZone::Look => {}
        }
    }

    /// Forgets fingers that are no longer down.
    pub fn release_lifted(&mut self, is_down: impl Fn(u64) -> bool) {
        if self.joystick.is_some_and(|id| !is_down(id)) {
            self.joystick = None;
        }
        if self.look.is_some_and(|id| !is_down(id)) {
            self.look = None;
        }
    }
}

// === Components ===

/// Marker for the on-screen control widgets, hidden until a touch is seen.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TouchOverlay;

// === Systems ===

fn sync_touch_layout(
    window: Query<&Window, With<PrimaryWindow>>,
    mut layout: ResMut<TouchLayout>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let viewport = window.size();
    if layout.viewport != viewport {
        layout.viewport = viewport;
    }
}

fn record_touches(
    touches: Res<Touches>,
    layout: Res<TouchLayout>,
    mut controls: ResMut<TouchControls>,
    mut joystick: ResMut<VirtualJoystick>,
    mut actions: ResMut<PendingActions>,
) {
    for touch in touches.iter_just_pressed() {
        let start = touch.start_position();
        controls.begin(touch.id(), start, layout.zone(start), &mut actions);
    }
    controls.release_lifted(|id| touches.get_pressed(id).is_some());

    match controls.joystick.and_then(|id| touches.get_pressed(id)) {
        Some(touch) => {
            joystick.axis = layout.stick_axis(touch.position());
            joystick.active = true;
        }
        None => {
            joystick.axis = Vec2::ZERO;
            joystick.active = false;
        }
    }

    if let Some(position) = controls
        .look
        .and_then(|id| touches.get_pressed(id))
        .map(|touch| touch.position())
    {
        joystick.look_drag += position - controls.look_anchor;
        controls.look_anchor = position;
    }
}

fn reset_touches(mut controls: ResMut<TouchControls>) {
    controls.joystick = None;
    controls.look = None;
}

fn circle(
    name: &'static str,
    center: Vec2,
    radius: f32,
    label: Option<&'static str>,
) -> impl Bundle {
    (
        Name::new(name),
        TouchOverlay,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(center.x - radius),
            top: Val::Px(center.y - radius),
            width: Val::Px(radius * 2.0),
            height: Val::Px(radius * 2.0),
            border: UiRect::all(Val::Px(2.0)),
            border_radius: BorderRadius::MAX,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(palette::TOUCH_CONTROL),
        BorderColor::all(palette::TOUCH_CONTROL_BORDER),
        Pickable::IGNORE,
        Visibility::Hidden,
        DespawnOnExit(GameState::InGame),
        Children::spawn(SpawnIter(label.into_iter().map(|text| {
            (
                Text::new(text),
                TextFont::from_font_size(palette::FONT_SIZE_BODY),
                TextColor(palette::BUTTON_TEXT),
            )
        }))),
    )
}

fn spawn_touch_overlay(mut commands: Commands, layout: Res<TouchLayout>) {
    commands.spawn(circle(
        "Touch Joystick",
        layout.joystick_center(),
        JOYSTICK_RADIUS,
        None,
    ));
    commands.spawn(circle(
        "Touch Shoot",
        layout.shoot_center(),
        SHOOT_BUTTON_RADIUS,
        Some("FIRE"),
    ));
    commands.spawn(circle(
        "Touch Jump",
        layout.jump_center(),
        JUMP_BUTTON_RADIUS,
        Some("JUMP"),
    ));
}

fn reveal_touch_overlay(
    controls: Res<TouchControls>,
    mut overlay: Query<&mut Visibility, With<TouchOverlay>>,
) {
    if !controls.seen {
        return;
    }
    for mut visibility in &mut overlay {
        visibility.set_if_neq(Visibility::Inherited);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<TouchLayout>()
        .register_type::<TouchControls>()
        .register_type::<TouchOverlay>();

    app.init_resource::<TouchLayout>()
        .init_resource::<TouchControls>();

    app.add_systems(
        OnEnter(GameState::InGame),
        (reset_touches, spawn_touch_overlay),
    );
    app.add_systems(
        Update,
        (sync_touch_layout, record_touches)
            .chain()
            .in_set(GameSet::Input)
            .before(crate::gameplay::input::record_movement)
            .run_if(gameplay_running),
    );
    app.add_systems(Update, reveal_touch_overlay.in_set(GameSet::Ui));
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::input::TOUCH_SENSITIVITY;
    use crate::gameplay::player::LookAngles;
    use crate::testing::{
        assert_entity_count, create_base_test_app_no_input, init_input_resources,
        init_touch_input, spawn_test_player, transition_to_ingame,
    };
    use bevy::input::touch::{TouchInput, TouchPhase};
    use pretty_assertions::assert_eq;

    fn create_touch_test_app() -> App {
        let mut app = create_base_test_app_no_input();
        init_input_resources(&mut app);
        init_touch_input(&mut app);
        app.add_plugins((crate::gameplay::input::plugin, plugin));
        transition_to_ingame(&mut app);
        app
    }

    fn touch(app: &mut App, id: u64, phase: TouchPhase, position: Vec2) {
        app.world_mut().write_message(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
        app.update();
    }

    fn joystick(app: &App) -> VirtualJoystick {
        *app.world().resource::<VirtualJoystick>()
    }

    #[test]
    fn joystick_finger_steers_until_lifted() {
        let mut app = create_touch_test_app();
        let center = app.world().resource::<TouchLayout>().joystick_center();

        touch(&mut app, 1, TouchPhase::Started, center);
        touch(&mut app, 1, TouchPhase::Moved, center + Vec2::new(0.0, -40.0));
        assert_eq!(joystick(&app).axis, Vec2::new(0.0, -1.0));
        assert!(joystick(&app).active);

        touch(&mut app, 1, TouchPhase::Ended, center + Vec2::new(0.0, -40.0));
        assert_eq!(joystick(&app).axis, Vec2::ZERO);
        assert!(!joystick(&app).active);
    }

    #[test]
    fn shoot_button_latches_attack() {
        let mut app = create_touch_test_app();
        let shoot = app.world().resource::<TouchLayout>().shoot_center();

        touch(&mut app, 4, TouchPhase::Started, shoot);

        assert!(app.world().resource::<PendingActions>().attack);
    }

    #[test]
    fn swipe_on_open_screen_turns_player_once() {
        let mut app = create_touch_test_app();
        let player = spawn_test_player(app.world_mut(), Vec3::new(0.0, 0.5, 0.0));
        let start = Vec2::new(640.0, 200.0);

        touch(&mut app, 2, TouchPhase::Started, start);
        touch(&mut app, 2, TouchPhase::Moved, start + Vec2::new(30.0, 0.0));
        // Holding still turns no further.
        app.update();
        app.update();

        let yaw = app.world().get::<LookAngles>(player).map(|l| l.yaw);
        assert_eq!(yaw, Some(-30.0 * TOUCH_SENSITIVITY));
        assert_eq!(joystick(&app).look_drag, Vec2::ZERO);
    }

    #[test]
    fn controls_appear_after_first_touch() {
        let mut app = create_touch_test_app();
        assert_entity_count::<With<TouchOverlay>>(&mut app, 3);

        let mut overlay = app.world_mut().query_filtered::<&Visibility, With<TouchOverlay>>();
        assert!(overlay.iter(app.world()).all(|v| *v == Visibility::Hidden));

        touch(&mut app, 9, TouchPhase::Started, Vec2::new(640.0, 200.0));
        app.update();

        let mut overlay = app.world_mut().query_filtered::<&Visibility, With<TouchOverlay>>();
        assert!(overlay.iter(app.world()).all(|v| *v == Visibility::Inherited));
    }
}
