// src/sight/visibility.rs
//! Occlusion-aware field of view for a single observer.
//!
//! Two products are offered. The *fan* is a coarse ring of probe segments,
//! each tagged blocked/unblocked by the strict segment test. The *polygon*
//! is a dense ring of rays, each stopped at the nearest wall, whose end
//! points form the visible region's boundary in sampling order.
//!
//! Every function here is pure: same input, same output, bit for bit.

use super::intersect::{is_blocked, ray_segment_intersection};
use crate::utils::util::sample_angles;
use crate::utils::{direction, Line2D, Point2D};

/// One dense ray, stopped at the closest wall within the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    /// Sampling angle in radians.
    pub angle: f64,
    /// Where the ray stops: the closest wall hit, or the radius point.
    pub end: Point2D,
    pub distance: f64,
    /// Index of the wall that stopped the ray, if any.
    pub wall: Option<usize>,
}

/// One coarse fan probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanRay {
    /// Sampling angle in radians.
    pub angle: f64,
    /// Far end of the probe, always at the full radius.
    pub end: Point2D,
    /// Whether a wall crosses the probe's interior.
    pub blocked: bool,
    /// `!blocked`, or `blocked` when the fan is inverted.
    pub visible: bool,
}

/// Casts one ray from `origin` at `angle` (radians) and stops it at the
/// closest wall no farther than `radius`. Ties keep the earlier wall.
///
/// A wall passing through `origin` itself does not stop the ray, so an
/// observer mounted on a wall still sees past it.
pub fn cast_ray(origin: Point2D, angle: f64, radius: f64, walls: &[Line2D]) -> RayCast {
    let dir = direction(angle, 1.0);
    let mut closest: Option<(usize, f64, Point2D)> = None;

    for (idx, wall) in walls.iter().enumerate() {
        let Some(hit) = ray_segment_intersection(origin, dir, wall) else {
            continue;
        };
        if hit.ray_u == 0.0 {
            continue;
        }
        let dist = origin.distance_to(&hit.point);
        if dist > radius {
            continue;
        }
        if closest.map_or(true, |(_, best, _)| dist < best) {
            closest = Some((idx, dist, hit.point));
        }
    }

    match closest {
        Some((idx, dist, point)) => RayCast {
            angle,
            end: point,
            distance: dist,
            wall: Some(idx),
        },
        None => RayCast {
            angle,
            end: origin.offset(direction(angle, radius)),
            distance: radius,
            wall: None,
        },
    }
}

/// All dense rays for an observer, in sampling order.
pub fn cast_visibility_rays(
    origin: Point2D,
    radius: f64,
    walls: &[Line2D],
    sample_count: usize,
) -> Vec<RayCast> {
    sample_angles(sample_count)
        .map(|angle| cast_ray(origin, angle, radius, walls))
        .collect()
}

/// Boundary of the region visible from `origin`, sampled at `sample_count`
/// evenly spaced angles. The last point implicitly closes back to the first.
pub fn cast_visibility_polygon(
    origin: Point2D,
    radius: f64,
    walls: &[Line2D],
    sample_count: usize,
) -> Vec<Point2D> {
    cast_visibility_rays(origin, radius, walls, sample_count)
        .into_iter()
        .map(|ray| ray.end)
        .collect()
}

/// Coarse fan of `sample_count` probes from `origin` out to `radius`.
///
/// `invert` swaps which classification counts as visible; the blocked
/// state itself is unaffected.
pub fn cast_fan_visibility(
    origin: Point2D,
    radius: f64,
    walls: &[Line2D],
    sample_count: usize,
    invert: bool,
) -> Vec<FanRay> {
    sample_angles(sample_count)
        .map(|angle| {
            let end = origin.offset(direction(angle, radius));
            let blocked = is_blocked(origin, end, walls);
            FanRay {
                angle,
                end,
                blocked,
                visible: blocked == invert,
            }
        })
        .collect()
}

/// Whether `target` is within `radius` of `origin` with no wall crossing
/// the line between them.
pub fn is_point_visible(origin: Point2D, radius: f64, target: Point2D, walls: &[Line2D]) -> bool {
    origin.distance_to(&target) <= radius && !is_blocked(origin, target, walls)
}
