// src/snap/resolver.rs

use crate::utils::{project_onto_segment, Line2D, Point2D};

/// A point attached to a wall by segment snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSnap {
    /// Projection of the candidate onto the wall, within its endpoints.
    pub point: Point2D,
    /// Wall orientation, `atan2(dy, dx)` in degrees.
    pub angle_degrees: f64,
    /// Index of the wall in the input slice.
    pub wall: usize,
    /// Distance from the candidate to `point`.
    pub distance: f64,
}

/// Returns the first vertex, in slice order, closer than `threshold` to
/// `candidate`. First match wins, not nearest.
///
/// Snapping is idempotent as long as no two vertices are closer than
/// `threshold`, which wall placement maintains.
pub fn snap_to_vertex(candidate: Point2D, vertices: &[Point2D], threshold: f64) -> Option<Point2D> {
    vertices
        .iter()
        .find(|v| candidate.distance_to(v) < threshold)
        .copied()
}

/// Projects `candidate` onto the nearest wall and returns that point if it
/// is closer than `threshold`. Equal distances keep the earlier wall.
/// Zero-length walls have no orientation and are skipped.
pub fn snap_to_segment(candidate: Point2D, segments: &[Line2D], threshold: f64) -> Option<SegmentSnap> {
    let mut best: Option<SegmentSnap> = None;

    for (idx, seg) in segments.iter().enumerate() {
        if seg.is_degenerate() {
            continue;
        }
        let proj = project_onto_segment(candidate, seg);
        if best.map_or(true, |b| proj.distance < b.distance) {
            best = Some(SegmentSnap {
                point: proj.point,
                angle_degrees: seg.angle_degrees(),
                wall: idx,
                distance: proj.distance,
            });
        }
    }

    best.filter(|snap| snap.distance < threshold)
}
