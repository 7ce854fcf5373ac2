//! Headless solver benchmark: hang a jittered cloth and tick it for a while.
//!
//! Usage: `benchmark [frames] [cols] [rows]`

use std::time::Instant;

use bevy::math::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::info;

use verlet_sandbox::config::SandboxConfig;
use verlet_sandbox::physics::{Command, Sandbox, Scene};

const DEFAULT_FRAMES: usize = 600;
const DEFAULT_COLS: usize = 40;
const DEFAULT_ROWS: usize = 30;
const SPACING: f32 = 15.0;
const PIN_EVERY: usize = 4;
const JITTER: f32 = 2.0;
const SEED: u64 = 42;

fn arg_or(n: usize, default: usize) -> usize {
    std::env::args()
        .nth(n)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    verlet_sandbox::init_tracing("info");

    let frames = arg_or(1, DEFAULT_FRAMES);
    let cols = arg_or(2, DEFAULT_COLS);
    let rows = arg_or(3, DEFAULT_ROWS);

    // Jitter positions before linking so rest lengths differ slightly per link.
    let mut rng = StdRng::seed_from_u64(SEED);
    let origin = Vec2::new(-(cols as f32) * SPACING * 0.5, 300.0);
    let template = match Scene::cloth(origin, cols, rows, SPACING, PIN_EVERY) {
        Ok(scene) => scene,
        Err(err) => {
            tracing::error!(%err, "failed to build cloth");
            return;
        }
    };
    let mut scene = Scene::new();
    for m in template.masses() {
        let offset = if m.locked {
            Vec2::ZERO
        } else {
            Vec2::new(
                rng.random_range(-JITTER..JITTER),
                rng.random_range(-JITTER..JITTER),
            )
        };
        scene.add_mass(m.position + offset, m.locked);
    }
    for link in template.links() {
        if let Err(err) = scene.add_link(link.a(), link.b()) {
            tracing::error!(%err, "failed to rebuild cloth");
            return;
        }
    }

    let config = SandboxConfig::default();
    let mut sandbox = Sandbox::with_scene(config, scene);
    sandbox.on_command(Command::Start);

    info!(
        frames,
        masses = sandbox.masses().len(),
        links = sandbox.links().len(),
        iterations = config.iterations,
        "benchmark start"
    );

    let started = Instant::now();
    for _ in 0..frames {
        sandbox.tick();
    }
    let elapsed = started.elapsed();

    let per_frame_us = elapsed.as_secs_f64() * 1e6 / frames.max(1) as f64;
    let lowest = sandbox
        .masses()
        .iter()
        .map(|m| m.position.y)
        .fold(f32::INFINITY, f32::min);
    info!(
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        per_frame_us,
        fps_equiv = 1e6 / per_frame_us,
        lowest_y = lowest,
        "benchmark done"
    );
}
