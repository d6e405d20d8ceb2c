use nalgebra::Vector3;

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector the wind blows towards, for a compass heading it blows from.
///
/// World frame is East-North-Up, so a northerly (heading 0) pushes towards -y.
pub fn heading_to_direction(heading_deg: f64) -> Vector3<f64> {
    let rad = heading_deg.to_radians();
    Vector3::new(-rad.sin(), -rad.cos(), 0.0)
}

/// Dynamic pressure `0.5 * rho * v^2` [Pa]
#[inline]
pub fn dynamic_pressure(density: f64, speed_squared: f64) -> f64 {
    0.5 * density * speed_squared
}

/// Reference area used when no better estimate of the vehicle exists [m^2]
#[inline]
pub fn reference_area(size: f64, area_scale: f64) -> f64 {
    size * size * area_scale
}
