// src/plan/wall.rs
use serde::{Deserialize, Serialize};

use crate::utils::{Line2D, Point2D};

/// A traced wall.
///
/// Stored as `[[x1, y1], [x2, y2]]` in layout files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct Wall {
    pub start: Point2D,
    pub end: Point2D,
}

impl Wall {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Wall { start, end }
    }

    /// The wall as an engine segment.
    pub fn segment(&self) -> Line2D {
        Line2D::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }
}

impl From<[[f64; 2]; 2]> for Wall {
    fn from([a, b]: [[f64; 2]; 2]) -> Self {
        Wall::new(a.into(), b.into())
    }
}

impl From<Wall> for [[f64; 2]; 2] {
    fn from(wall: Wall) -> Self {
        [wall.start.into(), wall.end.into()]
    }
}
