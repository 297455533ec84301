// src/document/mod.rs
mod floorplan;

pub use self::floorplan::{CameraCoverage, Floorplan, ProductCounts};
