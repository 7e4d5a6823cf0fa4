//! Opaque surfaces.

use hm_core::{ConstructionId, FoundationId, SubSurfaceId, SurfaceId, ZoneId};
use hm_geometry::{Polygon, Vector3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfaceType {
    Wall,
    RoofCeiling,
    Floor,
}

impl SurfaceType {
    /// Type seen from the other side of a shared surface.
    pub fn reciprocal(self) -> Self {
        match self {
            SurfaceType::Wall => SurfaceType::Wall,
            SurfaceType::RoofCeiling => SurfaceType::Floor,
            SurfaceType::Floor => SurfaceType::RoofCeiling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BoundaryCondition {
    Outdoors,
    /// Ground contact through a Kiva foundation object. Unset until the
    /// foundation linker attaches the surface.
    Foundation(Option<FoundationId>),
    Adiabatic,
    /// Paired with a surface in another zone.
    Surface(SurfaceId),
}

impl BoundaryCondition {
    pub fn is_exterior(&self) -> bool {
        matches!(
            self,
            BoundaryCondition::Outdoors | BoundaryCondition::Foundation(_)
        )
    }

    pub fn is_sun_exposed(&self) -> bool {
        matches!(self, BoundaryCondition::Outdoors)
    }
}

/// Orientation annotations used when laying surfaces out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// Degrees clockwise from north.
    pub azimuth: u32,
    pub length: f64,
    pub width: Option<f64>,
    /// Rise over run for pitched surfaces; `None` for vertical ones.
    pub pitch: Option<f64>,
}

impl Layout {
    pub fn vertical(azimuth: u32, length: f64) -> Self {
        Self {
            azimuth,
            length,
            width: None,
            pitch: None,
        }
    }

    pub fn pitched(azimuth: u32, length: f64, width: f64, pitch: f64) -> Self {
        Self {
            azimuth,
            length,
            width: Some(width),
            pitch: Some(pitch),
        }
    }

    /// Flat roofs are left where they are.
    pub fn is_tilted(&self) -> bool {
        self.pitch.is_none_or(|p| p > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub id: SurfaceId,
    pub name: String,
    pub zone: ZoneId,
    pub surface_type: SurfaceType,
    pub boundary: BoundaryCondition,
    pub polygon: Polygon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    pub construction: Option<ConstructionId>,
    pub sub_surfaces: Vec<SubSurfaceId>,
    /// Exposed perimeter handed to the ground model for slabs (ft).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposed_perimeter: Option<f64>,
}

impl Surface {
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn adjacent(&self) -> Option<SurfaceId> {
        match self.boundary {
            BoundaryCondition::Surface(other) => Some(other),
            _ => None,
        }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.polygon.translate(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reciprocal_swaps_floor_and_ceiling() {
        assert_eq!(SurfaceType::Floor.reciprocal(), SurfaceType::RoofCeiling);
        assert_eq!(SurfaceType::RoofCeiling.reciprocal(), SurfaceType::Floor);
        assert_eq!(SurfaceType::Wall.reciprocal(), SurfaceType::Wall);
    }

    #[test]
    fn flat_roofs_are_not_tilted() {
        assert!(Layout::vertical(90, 10.0).is_tilted());
        assert!(Layout::pitched(90, 10.0, 10.0, 0.5).is_tilted());
        assert!(!Layout::pitched(90, 10.0, 10.0, 0.0).is_tilted());
    }
}
