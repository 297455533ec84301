//! # Utility Module
//!
//! Small numeric helpers shared by the geometry and editing code.

/// Clamps a value between a minimum and maximum.
///
/// # Examples
///
/// ```
/// use home_planner::utils::util::clamp;
///
/// assert_eq!(clamp(1.4, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-0.2, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// ```
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Evenly spaced sample angles (radians) over a full turn, starting at 0.
///
/// `count == 0` yields nothing.
pub fn sample_angles(count: usize) -> impl Iterator<Item = f64> {
    let step = if count == 0 {
        0.0
    } else {
        std::f64::consts::TAU / count as f64
    };
    (0..count).map(move |i| i as f64 * step)
}

/// Area enclosed by a closed polygon (shoelace formula), regardless of winding.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].0 * vertices[j].1;
        area -= vertices[j].0 * vertices[i].1;
    }
    area.abs() / 2.0
}
