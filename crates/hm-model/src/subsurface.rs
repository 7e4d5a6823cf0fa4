//! Windows, doors and skylights.

use hm_core::{ShadingId, SubSurfaceId, SurfaceId};
use hm_geometry::{Polygon, Vector3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SubSurfaceKind {
    FixedWindow { ufactor: f64, shgc: f64 },
    Skylight { ufactor: f64, shgc: f64 },
    Door { ufactor: f64 },
}

impl SubSurfaceKind {
    pub fn ufactor(&self) -> f64 {
        match *self {
            SubSurfaceKind::FixedWindow { ufactor, .. }
            | SubSurfaceKind::Skylight { ufactor, .. }
            | SubSurfaceKind::Door { ufactor } => ufactor,
        }
    }
}

/// Seasonal multipliers applied to solar gains through glazing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteriorShading {
    pub summer: f64,
    pub winter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubSurface {
    pub id: SubSurfaceId,
    pub name: String,
    pub host: SurfaceId,
    pub kind: SubSurfaceKind,
    pub polygon: Polygon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_shading: Option<InteriorShading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overhang: Option<ShadingId>,
}

impl SubSurface {
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.polygon.translate(offset);
    }
}
