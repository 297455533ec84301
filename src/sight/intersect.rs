// src/sight/intersect.rs
// Ray/segment and segment/segment intersection used by the visibility engine.

use crate::utils::{Line2D, Point2D, Vector2D};

/// Where a ray meets a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Point2D,
    /// Parameter along the wall, in `[0, 1]`.
    pub wall_t: f64,
    /// Parameter along the ray, in multiples of the direction vector. Never negative.
    pub ray_u: f64,
}

/// Intersects the ray `origin + u * dir` (u >= 0) with `wall`.
///
/// Bounds are inclusive on both ends of the wall, so a ray grazing a wall
/// endpoint counts as a hit. Parallel or collinear walls, and zero-length
/// walls, never intersect.
pub fn ray_segment_intersection(origin: Point2D, dir: Vector2D, wall: &Line2D) -> Option<RayHit> {
    let (x1, y1) = (wall.start.x, wall.start.y);
    let (x2, y2) = (wall.end.x, wall.end.y);
    let (dx, dy) = (dir.x, dir.y);

    let denom = (y2 - y1) * dx - (x2 - x1) * dy;
    if denom == 0.0 {
        return None;
    }

    let t = ((x1 - origin.x) * dy - (y1 - origin.y) * dx) / denom;
    let u = ((x1 - origin.x) * (y2 - y1) - (y1 - origin.y) * (x2 - x1)) / denom;

    if (0.0..=1.0).contains(&t) && u >= 0.0 {
        Some(RayHit {
            point: wall.point_at(t),
            wall_t: t,
            ray_u: u,
        })
    } else {
        None
    }
}

/// Crossing parameters of `probe` and `wall`: `(lambda, gamma)`, with
/// `lambda` measured along the probe from its start and `gamma` along the
/// wall from its end. `None` when the two are parallel (including
/// zero-length input).
pub fn crossing_params(probe: &Line2D, wall: &Line2D) -> Option<(f64, f64)> {
    let (x1, y1, x2, y2) = (probe.start.x, probe.start.y, probe.end.x, probe.end.y);
    let (wx1, wy1, wx2, wy2) = (wall.start.x, wall.start.y, wall.end.x, wall.end.y);

    let det = (x2 - x1) * (wy2 - wy1) - (y2 - y1) * (wx2 - wx1);
    if det == 0.0 {
        return None;
    }

    let lambda = ((wy2 - wy1) * (wx2 - x1) + (wx1 - wx2) * (wy2 - y1)) / det;
    let gamma = ((y1 - y2) * (wx2 - x1) + (x2 - x1) * (wy2 - y1)) / det;
    Some((lambda, gamma))
}

/// True when `wall` crosses the strict interior of `probe`.
///
/// Touching at an endpoint of either segment does not block.
pub fn segment_blocks(probe: &Line2D, wall: &Line2D) -> bool {
    match crossing_params(probe, wall) {
        Some((lambda, gamma)) => 0.0 < lambda && lambda < 1.0 && 0.0 < gamma && gamma < 1.0,
        None => false,
    }
}

/// Whether any wall blocks the straight line from `probe_start` to `probe_end`.
pub fn is_blocked(probe_start: Point2D, probe_end: Point2D, walls: &[Line2D]) -> bool {
    let probe = Line2D::new(probe_start, probe_end);
    walls.iter().any(|wall| segment_blocks(&probe, wall))
}
