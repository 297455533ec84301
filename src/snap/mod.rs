// src/snap/mod.rs
mod resolver;

pub use resolver::{snap_to_segment, snap_to_vertex, SegmentSnap};

/// Distance under which a click reuses an existing corner.
pub const DEFAULT_VERTEX_SNAP_THRESHOLD: f64 = 10.0;
/// Distance under which a door or window attaches to a wall.
pub const DEFAULT_SEGMENT_SNAP_THRESHOLD: f64 = 25.0;
