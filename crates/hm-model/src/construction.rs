//! Assemblies assigned to surfaces.

use hm_constructions::Assembly;
use hm_core::ConstructionId;
use serde::Serialize;

/// How an assembly was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ConstructionSource {
    /// Catalog entry `index` solved to hit `target`.
    Resolved { index: usize, target: f64 },
    /// Explicit cavity/continuous layers.
    Layered,
    /// Fixed stack (foundation walls, slabs, adiabatic surfaces).
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Construction {
    pub id: ConstructionId,
    pub assembly: Assembly,
    pub source: ConstructionSource,
    /// Whole-assembly R-value recomputed from the final stack, including any
    /// insulation modeled in the linked foundation object.
    pub realized_r: f64,
}

impl Construction {
    pub fn name(&self) -> &str {
        &self.assembly.name
    }
}
