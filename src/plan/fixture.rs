// src/plan/fixture.rs
use serde::{Deserialize, Serialize};

use crate::utils::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Door,
    Window,
}

impl FixtureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FixtureKind::Door => "door",
            FixtureKind::Window => "window",
        }
    }
}

/// A door or window anchored to a wall.
///
/// Layout files store it flat, as `{x, y, rotation}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(flatten)]
    pub position: Point2D,
    /// Orientation of the wall it was placed on, in degrees.
    pub rotation: f64,
}

impl Fixture {
    pub fn new(position: Point2D, rotation: f64) -> Self {
        Fixture { position, rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_json_shape() {
        let door = Fixture::new(Point2D::new(10.0, 20.0), 90.0);
        let value = serde_json::to_value(door).unwrap();
        assert_eq!(value, serde_json::json!({"x": 10.0, "y": 20.0, "rotation": 90.0}));

        let back: Fixture = serde_json::from_str(r#"{"x": 1, "y": 2, "rotation": -45}"#).unwrap();
        assert_eq!(back, Fixture::new(Point2D::new(1.0, 2.0), -45.0));
    }
}
