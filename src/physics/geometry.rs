//! Distance helpers used for picking and cutting. Pure functions, no state.

use bevy::prelude::*;

/// Sum of squared coordinate differences.
#[inline]
pub fn squared_distance(p: Vec2, q: Vec2) -> f32 {
    let d = p - q;
    d.x * d.x + d.y * d.y
}

/// Squared distance from `p` to the closest point of segment `v`-`w`.
///
/// The projection parameter is clamped to `[0, 1]`; a degenerate segment
/// (`v == w`) falls back to the point distance to `v`.
pub fn squared_distance_to_segment(p: Vec2, v: Vec2, w: Vec2) -> f32 {
    let l2 = squared_distance(v, w);
    if l2 == 0.0 {
        return squared_distance(p, v);
    }
    let seg = w - v;
    let t = ((p - v).dot(seg) / l2).clamp(0.0, 1.0);
    squared_distance(p, v + t * seg)
}

/// Distance from `p` to segment `v`-`w`. Zero iff `p` lies on the segment.
#[inline]
pub fn distance_to_segment(p: Vec2, v: Vec2, w: Vec2) -> f32 {
    squared_distance_to_segment(p, v, w).sqrt()
}

/// Linear scan for the point closest to `target`.
///
/// Returns the index and the (non-squared) distance. Ties keep the first
/// minimal entry, so insertion order decides between equidistant points.
pub fn nearest<I>(points: I, target: Vec2) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.into_iter().enumerate() {
        let d2 = squared_distance(p, target);
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((i, d2)),
        }
    }
    best.map(|(i, d2)| (i, d2.sqrt()))
}
