// src/utils/mod.rs
pub mod geometry;
pub mod util;

pub use geometry::{direction, distance, project_onto_segment, Line2D, Point2D, Projection, Vector2D};
