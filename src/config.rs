// src/config.rs
//! Planner settings.
//!
//! Every knob the engine takes as a parameter lives here with its stock
//! value. Settings load from JSON; keys that are missing keep their default.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plan::CameraTier;
use crate::sight::{DEFAULT_FAN_SAMPLES, DEFAULT_POLYGON_SAMPLES};
use crate::snap::{DEFAULT_SEGMENT_SNAP_THRESHOLD, DEFAULT_VERTEX_SNAP_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub vertex_snap_threshold: f64,
    pub segment_snap_threshold: f64,
    pub fan_samples: usize,
    pub polygon_samples: usize,
    /// Treat blocked fan probes as the "seen" ones.
    pub fov_inverted: bool,
    /// Half-width of the square hit box used when selecting an observer.
    pub selection_tolerance: f64,
    /// Sensing radius per camera tier, in tier order.
    pub camera_radii: [f64; 3],
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            vertex_snap_threshold: DEFAULT_VERTEX_SNAP_THRESHOLD,
            segment_snap_threshold: DEFAULT_SEGMENT_SNAP_THRESHOLD,
            fan_samples: DEFAULT_FAN_SAMPLES,
            polygon_samples: DEFAULT_POLYGON_SAMPLES,
            fov_inverted: false,
            selection_tolerance: 15.0,
            camera_radii: [10.0, 15.0, 20.0],
        }
    }
}

impl PlannerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn camera_radius(&self, tier: CameraTier) -> f64 {
        self.camera_radii[tier.index()]
    }
}
