//! Rectangle synthesizers for floors, ceilings, walls and roofs.
//!
//! Each builds an axis-aligned rectangle centred on the origin, rotates it
//! into place and lifts it to its elevation.

use crate::polygon::Polygon;
use nalgebra::{Point3, Rotation3, Vector3};

/// Outward growth of a wall rectangle, `[bottom, left, top, right]` (ft).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offsets(pub [f64; 4]);

impl Offsets {
    pub const NONE: Offsets = Offsets([0.0; 4]);
    /// Host surface slightly larger than the opening it carries.
    pub const HOST: Offsets = Offsets([0.0, 0.001, 0.001, 0.001]);
    /// Window inset inside its host.
    pub const WINDOW: Offsets = Offsets([-0.001, 0.0, 0.001, 0.0]);
}

/// Horizontal unit vector pointing toward `azimuth` degrees.
pub fn horizontal_direction(azimuth: f64) -> Vector3<f64> {
    let rad = azimuth.to_radians();
    Vector3::new(rad.sin(), rad.cos(), 0.0)
}

/// Translation of `distance` along `azimuth`.
pub fn shift(distance: f64, azimuth: f64) -> Vector3<f64> {
    horizontal_direction(azimuth) * distance
}

/// Horizontal rectangle facing down.
pub fn floor_polygon(x: f64, y: f64, z: f64) -> Polygon {
    Polygon::new(vec![
        Point3::new(-x / 2.0, -y / 2.0, z),
        Point3::new(-x / 2.0, y / 2.0, z),
        Point3::new(x / 2.0, y / 2.0, z),
        Point3::new(x / 2.0, -y / 2.0, z),
    ])
}

/// Horizontal rectangle facing up.
pub fn ceiling_polygon(x: f64, y: f64, z: f64) -> Polygon {
    floor_polygon(x, y, z).reversed()
}

/// Vertical rectangle of length `x` and height `y` with its base at `z`.
pub fn wall_polygon(x: f64, y: f64, z: f64, azimuth: f64, offsets: Offsets) -> Polygon {
    let [bottom, left, top, right] = offsets.0;
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), -azimuth.to_radians());
    let vertices = [
        Point3::new(-x / 2.0 - left, 0.0, z - bottom),
        Point3::new(-x / 2.0 - left, 0.0, z + y + top),
        Point3::new(x / 2.0 + right, 0.0, z + y + top),
        Point3::new(x / 2.0 + right, 0.0, z - bottom),
    ];
    Polygon::new(vertices.iter().map(|p| rot * p).collect())
}

/// Horizontal shade of length `x` projecting `depth` out from a wall at
/// `azimuth`, hung at elevation `z`. Faces down.
pub fn overhang_polygon(x: f64, depth: f64, z: f64, azimuth: f64) -> Polygon {
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), -azimuth.to_radians());
    let vertices = [
        Point3::new(-x / 2.0, 0.0, z),
        Point3::new(-x / 2.0, depth, z),
        Point3::new(x / 2.0, depth, z),
        Point3::new(x / 2.0, 0.0, z),
    ];
    Polygon::new(vertices.iter().map(|p| rot * p).collect())
}

/// Pitched rectangle; `tilt` is rise over run, the ridge sits at `z`.
pub fn roof_polygon(x: f64, y: f64, z: f64, azimuth: f64, tilt: f64) -> Polygon {
    let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), tilt.atan());
    let turn = Rotation3::from_axis_angle(&Vector3::z_axis(), (180.0 - azimuth).to_radians());
    let lift = Vector3::new(0.0, 0.0, z);
    let vertices = [
        Point3::new(x / 2.0, -y / 2.0, 0.0),
        Point3::new(x / 2.0, y / 2.0, 0.0),
        Point3::new(-x / 2.0, y / 2.0, 0.0),
        Point3::new(-x / 2.0, -y / 2.0, 0.0),
    ];
    Polygon::new(vertices.iter().map(|p| turn * (pitch * p) + lift).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn floor_faces_down_ceiling_faces_up() {
        let floor = floor_polygon(30.0, 50.0, 2.0);
        assert!(approx(floor.area(), 1500.0));
        assert!(approx(floor.normal().unwrap().z, -1.0));
        assert!(approx(ceiling_polygon(30.0, 50.0, 2.0).normal().unwrap().z, 1.0));
    }

    #[test]
    fn wall_normal_follows_azimuth() {
        for az in [0.0, 90.0, 180.0, 270.0, 45.0] {
            let wall = wall_polygon(20.0, 8.0, 1.0, az, Offsets::NONE);
            let n = wall.normal().unwrap();
            let expected = horizontal_direction(az);
            assert!((n - expected).norm() < 1e-9, "azimuth {az}: {n:?}");
            assert!(approx(wall.min_z(), 1.0));
            assert!(approx(wall.max_z(), 9.0));
        }
    }

    #[test]
    fn host_offsets_grow_the_rectangle() {
        let host = wall_polygon(10.0, 4.0, 0.0, 0.0, Offsets::HOST);
        assert!(approx(host.area(), 10.002 * 4.001));
        let window = wall_polygon(10.0, 4.0, 0.0, 0.0, Offsets::WINDOW);
        assert!(approx(window.min_z(), 0.001));
        assert!(approx(window.max_z(), 4.001));
    }

    #[test]
    fn roof_tilts_toward_its_azimuth() {
        let roof = roof_polygon(30.0, 20.0, 10.0, 180.0, 6.0 / 12.0);
        let n = roof.normal().unwrap();
        let tilt = (6.0_f64 / 12.0).atan();
        assert!(approx(n.z, tilt.cos()));
        assert!(approx(n.y, -tilt.sin()));
        assert!(approx(roof.area(), 600.0));
        assert!(approx(roof.max_z(), 10.0 + 10.0 * tilt.sin()));
        assert!(approx(roof.tilt_degrees().unwrap(), tilt.to_degrees()));
    }

    #[test]
    fn overhang_projects_outward() {
        let oh = overhang_polygon(6.0, 2.0, 5.0, 90.0);
        assert!(approx(oh.area(), 12.0));
        assert!(approx(oh.normal().unwrap().z, -1.0));
        let max_x = oh.vertices.iter().map(|v| v.x).fold(f64::MIN, f64::max);
        assert!(approx(max_x, 2.0));
        assert!(approx(oh.min_z(), 5.0));
    }

    #[test]
    fn shift_is_horizontal() {
        let v = shift(5.0, 90.0);
        assert!(approx(v.x, 5.0));
        assert!(approx(v.y, 0.0));
        assert_eq!(v.z, 0.0);
    }
}
