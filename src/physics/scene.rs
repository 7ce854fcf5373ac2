use bevy::prelude::*;
use tracing::debug;

use super::geometry::{nearest, squared_distance_to_segment};
use super::link::{Link, LinkError};
use super::mass::{Mass, MassId};

/// Owns every mass and link. Links hold `MassId`s into `masses`.
///
/// Masses are append-only; links may be removed by cutting, which keeps the
/// order of the remaining links.
#[derive(Default, Clone, Debug)]
pub struct Scene {
    pub(crate) masses: Vec<Mass>,
    pub(crate) links: Vec<Link>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `cols` x `rows` cloth hanging from `origin` (top-left, +Y up).
    /// Every `pin_every`-th mass of the top row is locked; `0` pins none.
    pub fn cloth(
        origin: Vec2,
        cols: usize,
        rows: usize,
        spacing: f32,
        pin_every: usize,
    ) -> Result<Self, LinkError> {
        let mut scene = Self::new();
        for row in 0..rows {
            for col in 0..cols {
                let pos = origin + Vec2::new(col as f32 * spacing, -(row as f32) * spacing);
                let locked = row == 0 && pin_every > 0 && col % pin_every == 0;
                scene.add_mass(pos, locked);
            }
        }

        let id = |row: usize, col: usize| MassId(row * cols + col);
        for row in 0..rows {
            for col in 0..cols {
                if col + 1 < cols {
                    scene.add_link(id(row, col), id(row, col + 1))?;
                }
                if row + 1 < rows {
                    scene.add_link(id(row, col), id(row + 1, col))?;
                }
            }
        }
        Ok(scene)
    }

    pub fn masses(&self) -> &[Mass] {
        &self.masses
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty() && self.links.is_empty()
    }

    pub fn add_mass(&mut self, pos: Vec2, locked: bool) -> MassId {
        let id = MassId(self.masses.len());
        self.masses.push(Mass::with_lock(pos, locked));
        id
    }

    /// Append a link between two existing, distinct masses.
    pub fn add_link(&mut self, a: MassId, b: MassId) -> Result<&Link, LinkError> {
        let link = Link::new(&self.masses, a, b)?;
        self.links.push(link);
        Ok(&self.links[self.links.len() - 1])
    }

    /// Mass closest to `pos` and its distance. First inserted wins ties.
    pub fn nearest_mass(&self, pos: Vec2) -> Option<(MassId, f32)> {
        nearest(self.masses.iter().map(|m| m.position), pos).map(|(i, d)| (MassId(i), d))
    }

    /// Remove every link whose segment passes within `threshold` of `pos`.
    /// Returns how many were removed.
    pub fn cut_links_near(&mut self, pos: Vec2, threshold: f32) -> usize {
        let before = self.links.len();
        let t2 = threshold * threshold;
        let masses = &self.masses;
        self.links.retain(|link| {
            let (v, w) = link.segment(masses);
            squared_distance_to_segment(pos, v, w) > t2
        });
        let cut = before - self.links.len();
        if cut > 0 {
            debug!(cut, remaining = self.links.len(), ?pos, "links cut");
        }
        cut
    }

    /// Endpoint positions of every link, in draw order.
    pub fn link_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.links.iter().map(|l| l.segment(&self.masses))
    }

    pub fn clear(&mut self) {
        self.masses.clear();
        self.links.clear();
    }
}
