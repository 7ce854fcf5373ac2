use bevy::prelude::*;

use crate::config::{LINK_THICKNESS, MASS_VIS_RADIUS};
use crate::physics::systems::{CursorWorld, SandboxState, shift_modifiers};

const LINK_COLOR: Color = Color::srgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
const FREE_COLOR: Color = Color::srgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
const LOCKED_COLOR: Color = Color::srgb(250.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0);

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Links are drawn as thick gizmo lines.
pub fn configure_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = LINK_THICKNESS;
}

/// Links first, masses on top, then the rubber band of a link drag.
pub fn draw_scene(mut gizmos: Gizmos, sandbox: Res<SandboxState>) {
    for (a, b) in sandbox.link_segments() {
        gizmos.line_2d(a, b, LINK_COLOR);
    }

    for m in sandbox.masses() {
        let color = if m.locked { LOCKED_COLOR } else { FREE_COLOR };
        gizmos.circle_2d(m.position, MASS_VIS_RADIUS, color);
    }

    if let Some((start, current)) = sandbox.rubber_band() {
        gizmos.line_2d(start, current, LINK_COLOR.with_alpha(0.5));
    }
}

/// Ring around the cursor showing the cut reach while the cut key is held.
pub fn draw_cut_gizmo(
    mut gizmos: Gizmos,
    cursor: Res<CursorWorld>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    sandbox: Res<SandboxState>,
) {
    if !sandbox.config().cut_mode || !shift_modifiers(&keys).cut {
        return;
    }
    // Alpha 0.1 when hovering, 1.0 while actually cutting
    let alpha = if buttons.pressed(MouseButton::Left) {
        1.0
    } else {
        0.1
    };
    gizmos.circle_2d(
        cursor.0,
        sandbox.config().cut_threshold,
        Color::srgba(1.0, 0.0, 0.0, alpha),
    );
}
