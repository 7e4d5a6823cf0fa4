//! Shading-only geometry: window overhangs and neighboring buildings.

use hm_core::SubSurfaceId;
use hm_geometry::{Polygon, Vector3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ShadingKind {
    Overhang { window: SubSurfaceId, depth: f64 },
    Neighbor { azimuth: u32, distance: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shading {
    pub id: hm_core::ShadingId,
    pub name: String,
    pub kind: ShadingKind,
    pub polygon: Polygon,
}

impl Shading {
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.polygon.translate(offset);
    }
}
