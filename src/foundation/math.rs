/// Wrap an angle into `[0, TAU)`.
pub(crate) fn wrap_angle_rad(angle: f64) -> f64 {
    let a = angle.rem_euclid(std::f64::consts::TAU);
    if a.is_finite() { a } else { 0.0 }
}

/// Euclidean remainder for pixel coordinates against a positive extent.
pub(crate) fn wrap_coord(v: i64, extent: i64) -> i64 {
    debug_assert!(extent > 0);
    v.rem_euclid(extent)
}

/// Normalize a per-axis scale factor: absolute value, non-finite becomes 1.
///
/// A zero scale is preserved so degenerate entities render nothing rather
/// than dividing by zero in the inverse mapping.
pub(crate) fn normalize_scale(s: f64) -> f64 {
    if s.is_finite() { s.abs() } else { 1.0 }
}

/// Clamp a pivot fraction into `[0, 1]`.
pub(crate) fn clamp_pivot(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}
