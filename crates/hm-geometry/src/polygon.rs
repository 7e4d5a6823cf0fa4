//! Planar polygons with outward normals given by vertex winding.

use crate::error::{GeometryError, GeometryResult};
use nalgebra::{Point3, Vector3};

const PLANAR_TOLERANCE: f64 = 1e-6;
const AREA_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Newell vector: direction is the polygon normal, length is twice the area.
    fn newell(&self) -> Vector3<f64> {
        let n = self.vertices.len();
        let mut sum = Vector3::zeros();
        for i in 0..n {
            let a = self.vertices[i].coords;
            let b = self.vertices[(i + 1) % n].coords;
            sum += a.cross(&b);
        }
        sum
    }

    pub fn area(&self) -> f64 {
        0.5 * self.newell().norm()
    }

    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.newell().try_normalize(f64::EPSILON)
    }

    /// Every vertex lies in the plane through the first vertex.
    pub fn is_planar(&self) -> bool {
        let Some(normal) = self.normal() else {
            return false;
        };
        let origin = self.vertices[0];
        self.vertices
            .iter()
            .all(|v| normal.dot(&(v - origin)).abs() <= PLANAR_TOLERANCE)
    }

    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for v in &mut self.vertices {
            *v += *offset;
        }
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        let mut moved = self.clone();
        moved.translate(offset);
        moved
    }

    pub fn min_z(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.z)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_z(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Tilt from horizontal in degrees (0 for an upward floor-like face).
    pub fn tilt_degrees(&self) -> Option<f64> {
        self.normal()
            .map(|n| n.z.clamp(-1.0, 1.0).acos().to_degrees())
    }
}

/// Check that `polygon` is a closed planar quadrilateral of the given area.
pub fn check_rectangle(id: &str, polygon: &Polygon, expected_area: f64) -> GeometryResult<()> {
    let fail = |reason: String| GeometryError::Closure {
        id: id.to_string(),
        reason,
    };
    if polygon.vertices.len() != 4 {
        return Err(fail(format!("{} vertices", polygon.vertices.len())));
    }
    if !polygon.is_planar() {
        return Err(fail("vertices are not coplanar".to_string()));
    }
    let area = polygon.area();
    if (area - expected_area).abs() > AREA_TOLERANCE * expected_area.max(1.0) {
        return Err(fail(format!("area {area} != {expected_area}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn square_area_and_normal() {
        let sq = unit_square();
        assert!((sq.area() - 1.0).abs() < 1e-12);
        let n = sq.normal().unwrap();
        assert!((n.z - 1.0).abs() < 1e-12);
        assert!((sq.reversed().normal().unwrap().z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn warped_quad_is_not_planar() {
        let mut quad = unit_square();
        quad.vertices[2].z = 0.5;
        assert!(!quad.is_planar());
        assert!(check_rectangle("warped", &quad, 1.0).is_err());
    }

    #[test]
    fn translation_keeps_area() {
        let sq = unit_square().translated(&Vector3::new(3.0, -2.0, 7.0));
        assert!((sq.area() - 1.0).abs() < 1e-12);
        assert_eq!(sq.min_z(), 7.0);
        assert_eq!(sq.max_z(), 7.0);
    }

    #[test]
    fn triangle_fails_rectangle_check() {
        let tri = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let err = check_rectangle("tri", &tri, 0.5).unwrap_err();
        assert!(err.to_string().contains("3 vertices"));
    }
}
