//! Rigid links between two masses and their distance constraint.

use bevy::prelude::*;
use thiserror::Error;

use super::mass::{Mass, MassId};

/// Direction used when both endpoints of a link coincide.
const FALLBACK_DIR: Vec2 = Vec2::X;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LinkError {
    #[error("cannot link {0} to itself")]
    SelfLink(MassId),
    #[error("{id} does not exist (scene holds {count} masses)")]
    UnknownMass { id: MassId, count: usize },
}

/// A rigid rod between masses `a` and `b`.
///
/// `rest_length` is frozen at construction; there is no setter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    a: MassId,
    b: MassId,
    rest_length: f32,
}

impl Link {
    /// Link `a` and `b` at their current separation.
    pub fn new(masses: &[Mass], a: MassId, b: MassId) -> Result<Self, LinkError> {
        if a == b {
            return Err(LinkError::SelfLink(a));
        }
        let pa = lookup(masses, a)?.position;
        let pb = lookup(masses, b)?.position;
        Ok(Self {
            a,
            b,
            rest_length: pa.distance(pb),
        })
    }

    #[inline]
    pub fn a(&self) -> MassId {
        self.a
    }

    #[inline]
    pub fn b(&self) -> MassId {
        self.b
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Endpoint positions `(a, b)` for drawing or hit-testing.
    pub fn segment(&self, masses: &[Mass]) -> (Vec2, Vec2) {
        (masses[self.a.0].position, masses[self.b.0].position)
    }

    /// One relaxation pass: place both ends `rest_length / 2` from the
    /// current midpoint along the current axis. Locked ends stay put.
    ///
    /// Writes go straight into `masses`, so a later link in the same sweep
    /// sees this correction.
    pub fn relax(&self, masses: &mut [Mass]) {
        let pa = masses[self.a.0].position;
        let pb = masses[self.b.0].position;

        let center = (pa + pb) * 0.5;
        let axis = pa - pb;
        let unit = if axis.length_squared() > 0.0 {
            axis.normalize()
        } else {
            FALLBACK_DIR
        };
        let dir = unit * (self.rest_length * 0.5);

        let ma = &mut masses[self.a.0];
        if !ma.locked {
            ma.position = center + dir;
        }
        let mb = &mut masses[self.b.0];
        if !mb.locked {
            mb.position = center - dir;
        }
    }
}

fn lookup(masses: &[Mass], id: MassId) -> Result<&Mass, LinkError> {
    masses.get(id.0).ok_or(LinkError::UnknownMass {
        id,
        count: masses.len(),
    })
}
