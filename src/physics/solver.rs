use bevy::prelude::*;
use tracing::trace_span;

use super::link::Link;
use super::mass::Mass;
use super::scene::Scene;
use crate::config::SandboxConfig;

/// Fixed-timestep update: Verlet for every free mass, then `iterations`
/// Gauss-Seidel sweeps over the links.
pub fn step(scene: &mut Scene, config: &SandboxConfig) {
    let _span = trace_span!(
        "sandbox_step",
        masses = scene.masses.len(),
        links = scene.links.len()
    )
    .entered();
    // --- 1) Verlet
    integrate(&mut scene.masses, config.gravity, config.time_delta);
    // --- 2) Constraint solve
    relax(&mut scene.masses, &scene.links, config.iterations);
}

/// Verlet-integrate every unlocked mass under constant acceleration.
pub fn integrate(masses: &mut [Mass], gravity: Vec2, dt: f32) {
    for m in masses.iter_mut() {
        m.verlet_step(gravity, dt);
    }
}

/// Constraint solve (Gauss-Seidel): links visited in collection order,
/// each reading positions already corrected earlier in the same sweep.
pub fn relax(masses: &mut [Mass], links: &[Link], iterations: usize) {
    let _span = trace_span!("relax", iterations).entered();
    for _ in 0..iterations {
        for link in links {
            link.relax(masses);
        }
    }
}
