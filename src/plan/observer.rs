// src/plan/observer.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::utils::Point2D;

/// The three camera products, smallest coverage first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraTier {
    One,
    Two,
    Three,
}

impl CameraTier {
    pub fn index(&self) -> usize {
        match self {
            CameraTier::One => 0,
            CameraTier::Two => 1,
            CameraTier::Three => 2,
        }
    }

    pub fn all() -> &'static [CameraTier] {
        &[CameraTier::One, CameraTier::Two, CameraTier::Three]
    }
}

/// What an observer is. Only cameras get a visibility computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ObserverKind {
    Camera(CameraTier),
    Sensor,
}

impl ObserverKind {
    /// Storage tag, as used in layout files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverKind::Camera(CameraTier::One) => "camera1",
            ObserverKind::Camera(CameraTier::Two) => "camera2",
            ObserverKind::Camera(CameraTier::Three) => "camera3",
            ObserverKind::Sensor => "sensor",
        }
    }

    /// Display name for product listings.
    pub fn name(&self) -> &'static str {
        match self {
            ObserverKind::Camera(CameraTier::One) => "Camera 1",
            ObserverKind::Camera(CameraTier::Two) => "Camera 2",
            ObserverKind::Camera(CameraTier::Three) => "Camera 3",
            ObserverKind::Sensor => "Snap Sensor",
        }
    }

    pub fn is_camera(&self) -> bool {
        matches!(self, ObserverKind::Camera(_))
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObserverKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camera1" => Ok(ObserverKind::Camera(CameraTier::One)),
            "camera2" => Ok(ObserverKind::Camera(CameraTier::Two)),
            "camera3" => Ok(ObserverKind::Camera(CameraTier::Three)),
            "sensor" => Ok(ObserverKind::Sensor),
            other => Err(PlanError::UnknownObserverKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for ObserverKind {
    type Error = PlanError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ObserverKind> for String {
    fn from(kind: ObserverKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A placed camera or sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    #[serde(flatten)]
    pub position: Point2D,
    #[serde(rename = "type")]
    pub kind: ObserverKind,
    /// Maximum sensing distance. Zero for sensors.
    #[serde(default)]
    pub radius: f64,
}

impl Observer {
    pub fn new(position: Point2D, kind: ObserverKind, radius: f64) -> Self {
        Observer { position, kind, radius }
    }

    pub fn is_camera(&self) -> bool {
        self.kind.is_camera()
    }
}
