use bevy::prelude::*;

use verlet_sandbox::config::{BACKGROUND, PHYSICS_HZ};
use verlet_sandbox::physics::PhysicsPlugin;

fn main() {
    // With `profile`, Bevy's LogPlugin owns the global subscriber instead.
    #[cfg(not(feature = "profile"))]
    verlet_sandbox::init_tracing("verlet_sandbox=info,wgpu=error");

    App::new()
        .insert_resource(ClearColor(BACKGROUND))
        // One sandbox tick per fixed update (used in FixedUpdate)
        .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
        .add_plugins(DefaultPlugins)
        // Click / drag / Shift editing, S to start, R to reset
        .add_plugins(PhysicsPlugin::default())
        .run();
}
