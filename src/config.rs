use bevy::prelude::*;

/// Physics timing: one sandbox tick per fixed update.
pub const PHYSICS_HZ: f64 = 30.0;
/// Nominal timestep fed to the integrator. Deliberately not wall-clock.
pub const TIME_DELTA: f32 = 0.5;

/// Gravity magnitude (world units per tick unit squared).
pub const GRAVITY: f32 = 9.8;

/// How many relaxation passes over all links per tick
pub const CONSTRAINT_ITERATIONS: usize = 20;

/// Editing
pub const PICK_RADIUS: f32 = 20.0; // max pointer distance to snap a link end onto a mass
pub const CUT_DISTANCE: f32 = 5.0; // max pointer distance to a link segment to sever it

/// Drawing
pub const MASS_VIS_RADIUS: f32 = 10.0;
pub const LINK_THICKNESS: f32 = 4.0;
pub const BACKGROUND: Color = Color::srgb(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0);

/// Runtime copy of the tuning constants, fixed once a `Sandbox` is built.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SandboxConfig {
    /// Max distance between a pointer and a mass for the mass to be picked.
    pub pick_radius: f32,
    /// Max distance between the pointer and a link segment for a cut.
    pub cut_threshold: f32,
    /// Constant acceleration applied to every unlocked mass (+Y up).
    pub gravity: Vec2,
    /// Fixed integration timestep.
    pub time_delta: f32,
    /// Relaxation iterations per tick.
    pub iterations: usize,
    /// Whether a drag with the cut modifier severs links.
    pub cut_mode: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            pick_radius: PICK_RADIUS,
            cut_threshold: CUT_DISTANCE,
            gravity: Vec2::new(0.0, -GRAVITY),
            time_delta: TIME_DELTA,
            iterations: CONSTRAINT_ITERATIONS,
            cut_mode: true,
        }
    }
}

impl SandboxConfig {
    pub fn with_pick_radius(mut self, pick_radius: f32) -> Self {
        self.pick_radius = pick_radius;
        self
    }

    pub fn with_cut_threshold(mut self, cut_threshold: f32) -> Self {
        self.cut_threshold = cut_threshold;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_delta(mut self, time_delta: f32) -> Self {
        self.time_delta = time_delta;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_cut_mode(mut self, cut_mode: bool) -> Self {
        self.cut_mode = cut_mode;
        self
    }
}
