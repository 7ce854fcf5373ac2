use bevy::prelude::*;

/// Stable handle to a mass: its index in the scene's mass collection.
/// Masses are never removed one by one, so a handle stays valid until reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MassId(pub usize);

impl std::fmt::Display for MassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mass#{}", self.0)
    }
}

/// A single Verlet-integrated point mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mass {
    /// Current position x_t.
    pub position: Vec2,
    /// Previous position x_{t-1} (encodes velocity implicitly).
    pub previous_position: Vec2,
    /// Locked masses are pins: skipped by integration and relaxation.
    pub locked: bool,
}

impl Mass {
    /// Create a free mass at `pos`. `previous_position` starts the same
    /// (zero initial velocity).
    pub fn new(pos: Vec2) -> Self {
        Self::with_lock(pos, false)
    }

    /// Create a pinned mass at `pos`.
    pub fn locked(pos: Vec2) -> Self {
        Self::with_lock(pos, true)
    }

    pub fn with_lock(pos: Vec2, locked: bool) -> Self {
        Self {
            position: pos,
            previous_position: pos,
            locked,
        }
    }

    /// Implicit per-step velocity (x_t - x_{t-1}).
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Perform one **position-Verlet** step:
    /// x_{t+1} = 2 x_t - x_{t-1} + a * dt^2
    ///
    /// No-op for locked masses.
    pub fn verlet_step(&mut self, acceleration: Vec2, dt: f32) {
        if self.locked {
            return;
        }
        let x_t = self.position;
        let x_tp1 = x_t + self.velocity() + acceleration * (dt * dt);
        self.previous_position = x_t;
        self.position = x_tp1;
    }
}
