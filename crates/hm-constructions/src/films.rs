//! Still-air film resistances (h·ft²·°F/Btu).

/// Average of the winter and summer outside film.
pub const OUTSIDE: f64 = (0.17 + 0.25) / 2.0;
pub const VERTICAL: f64 = 0.68;
/// Average of heat-flow-down and heat-flow-up floor films.
pub const FLOOR_AVERAGE: f64 = (0.92 + 0.61) / 2.0;

/// Inside film of a roof pitched `tilt_deg` degrees.
pub fn roof(tilt_deg: f64) -> f64 {
    let down = 0.002 * (0.0398 * tilt_deg).exp() + 0.608;
    let up = 0.32 * (-0.0154 * tilt_deg).exp() + 0.6;
    (down + up) / 2.0
}

pub fn exterior_wall() -> f64 {
    VERTICAL + OUTSIDE
}

pub fn interior_wall() -> f64 {
    2.0 * VERTICAL
}

/// `pitch` is rise per 12 of run.
pub fn roof_assembly(pitch: f64) -> f64 {
    OUTSIDE + roof((pitch / 12.0).atan().to_degrees())
}

pub fn frame_floor() -> f64 {
    2.0 * FLOOR_AVERAGE
}

pub fn ground_wall() -> f64 {
    VERTICAL
}
