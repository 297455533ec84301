// src/lib.rs

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod plan;
pub mod sight;
pub mod snap;
pub mod utils;

pub use sight::{cast_fan_visibility, cast_visibility_polygon, is_blocked};
pub use snap::{snap_to_segment, snap_to_vertex};
