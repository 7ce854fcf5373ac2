use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::trace;

use super::interaction::{Command, Modifiers, Sandbox};

/// The sandbox as a Bevy resource. Every system touching it takes `ResMut`,
/// so the scheduler runs them one at a time.
#[derive(Resource, Default, Debug, Clone, Deref, DerefMut)]
pub struct SandboxState(pub Sandbox);

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorWorld(pub Vec2);

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
pub fn exit_on_esc_or_q_if_native(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
) {
    if cfg!(not(target_arch = "wasm32"))
        && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ])
    {
        exit.write(AppExit::Success);
    }
}

/// Update the cursor's world position each frame (2D camera).
pub fn update_cursor_world(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut cursor: ResMut<CursorWorld>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    if let Ok((camera, cam_xform)) = q_cam.single() {
        if let Ok(world_pos) = camera.viewport_to_world_2d(cam_xform, screen_pos) {
            cursor.0 = world_pos;
        }
    }
}

/// Shift is both the lock and the cut key: a Shift-click pins, a Shift-drag cuts.
pub fn shift_modifiers(keys: &ButtonInput<KeyCode>) -> Modifiers {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    Modifiers {
        lock: shift,
        cut: shift,
    }
}

/// Turn left-button state plus cursor motion into pointer events.
/// A drag event is only sent when the cursor actually moved while held.
pub fn pointer_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    cursor: Res<CursorWorld>,
    mut sandbox: ResMut<SandboxState>,
    mut last: Local<Option<Vec2>>,
) {
    let pos = cursor.0;
    let modifiers = shift_modifiers(&keys);

    if buttons.just_pressed(MouseButton::Left) {
        sandbox.on_pointer_down(pos);
        *last = Some(pos);
    } else if buttons.pressed(MouseButton::Left) && *last != Some(pos) {
        sandbox.on_pointer_drag(pos, modifiers);
        *last = Some(pos);
    }

    if buttons.just_released(MouseButton::Left) {
        let outcome = sandbox.on_pointer_up(pos, modifiers);
        trace!(?outcome, "pointer released");
        *last = None;
    }
}

/// `S` starts the simulation, `R` resets it.
pub fn command_input_system(keys: Res<ButtonInput<KeyCode>>, mut sandbox: ResMut<SandboxState>) {
    if keys.just_pressed(KeyCode::KeyS) {
        sandbox.on_command(Command::Start);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        sandbox.on_command(Command::Reset);
    }
}

/// One fixed tick (rate set in main via `Time::<Fixed>`); a no-op until started.
pub fn sandbox_tick(mut sandbox: ResMut<SandboxState>) {
    sandbox.tick();
}
