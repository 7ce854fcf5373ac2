use bevy::prelude::*;

pub mod geometry;
pub mod interaction;
pub mod link;
pub mod mass;
pub mod render;
pub mod scene;
pub mod solver;
pub mod systems;

pub use interaction::{Command, DragState, Modifiers, PointerOutcome, Sandbox};
pub use link::{Link, LinkError};
pub use mass::{Mass, MassId};
pub use scene::Scene;

use crate::config::SandboxConfig;
use systems::{
    CursorWorld, SandboxState, command_input_system, exit_on_esc_or_q_if_native,
    pointer_input_system, sandbox_tick, update_cursor_world,
};

/// Plug this into your App with `.add_plugins(PhysicsPlugin::default())`.
#[derive(Default)]
pub struct PhysicsPlugin {
    pub config: SandboxConfig,
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config)
            .insert_resource(SandboxState(Sandbox::new(self.config)))
            .init_resource::<CursorWorld>()
            .add_systems(Startup, (render::spawn_camera, render::configure_gizmos))
            // Input edits the scene in event order: cursor first, then pointer, then keys
            .add_systems(
                Update,
                (
                    update_cursor_world,
                    pointer_input_system,
                    command_input_system,
                    exit_on_esc_or_q_if_native,
                )
                    .chain(),
            )
            // Verlet + constraint solve at a fixed timestep (set rate in main via Time::<Fixed>)
            .add_systems(FixedUpdate, sandbox_tick)
            .add_systems(
                Update,
                (render::draw_scene, render::draw_cut_gizmo).after(command_input_system),
            );
    }
}
