// src/sight/mod.rs
pub mod intersect;
pub mod visibility;

pub use intersect::{crossing_params, is_blocked, ray_segment_intersection, segment_blocks, RayHit};
pub use visibility::{
    cast_fan_visibility, cast_ray, cast_visibility_polygon, cast_visibility_rays, is_point_visible,
    FanRay, RayCast,
};

/// Probes in the coarse radial fan.
pub const DEFAULT_FAN_SAMPLES: usize = 60;
/// Rays in the dense visibility polygon.
pub const DEFAULT_POLYGON_SAMPLES: usize = 180;
