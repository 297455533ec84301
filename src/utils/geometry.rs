// src/utils/geometry.rs
use serde::{Deserialize, Serialize};

use super::util::clamp;

/// A position on the plan, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        distance(*self, *other)
    }

    /// Returns this point moved by `v`.
    pub fn offset(&self, v: Vector2D) -> Point2D {
        Point2D::new(self.x + v.x, self.y + v.y)
    }

    /// Vector from `self` to `other`.
    pub fn to(&self, other: &Point2D) -> Vector2D {
        Vector2D::new(other.x - self.x, other.y - self.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Point2D::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// A straight wall between two fixed points.
///
/// Undirected for every query in this crate; `start`/`end` order only
/// matters to whoever draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub start: Point2D,
    pub end: Point2D,
}

impl Line2D {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> Vector2D {
        self.start.to(&self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Point at parameter `t`, where 0 is `start` and 1 is `end`.
    pub fn point_at(&self, t: f64) -> Point2D {
        let d = self.delta();
        Point2D::new(self.start.x + t * d.x, self.start.y + t * d.y)
    }

    /// Orientation in degrees, `atan2(dy, dx)`.
    pub fn angle_degrees(&self) -> f64 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees()
    }

    pub fn distance_to_point(&self, point: &Point2D) -> f64 {
        project_onto_segment(*point, self).distance
    }
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest point on the segment.
    pub point: Point2D,
    /// Parameter of `point` along the segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

/// Euclidean distance between two points.
pub fn distance(p: Point2D, q: Point2D) -> f64 {
    (q.x - p.x).hypot(q.y - p.y)
}

/// `(cos, sin)` of `angle_radians`, scaled by `length`.
pub fn direction(angle_radians: f64, length: f64) -> Vector2D {
    Vector2D::new(angle_radians.cos() * length, angle_radians.sin() * length)
}

/// Projects `p` onto the line through `seg`, then clamps the parameter so
/// the returned point lies between the segment's endpoints.
///
/// A zero-length segment projects everything onto its start.
pub fn project_onto_segment(p: Point2D, seg: &Line2D) -> Projection {
    let d = seg.delta();
    let len_sq = d.dot(&d);
    let t = if len_sq == 0.0 {
        0.0
    } else {
        clamp(seg.start.to(&p).dot(&d) / len_sq, 0.0, 1.0)
    };
    let point = seg.point_at(t);
    Projection {
        point,
        t,
        distance: distance(p, point),
    }
}
