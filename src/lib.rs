//! Point masses and rigid links on a 2D canvas, simulated with Verlet
//! integration and iterative distance-constraint relaxation.
//!
//! The engine (`physics::Sandbox` and the modules under it) is plain data and
//! runs without a window; `physics::PhysicsPlugin` wires it into a Bevy app
//! as the input driver and gizmo renderer.

pub mod config;
pub mod physics;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a `RUST_LOG`-driven fmt subscriber. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
