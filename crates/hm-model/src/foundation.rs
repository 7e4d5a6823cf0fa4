//! Ground-coupling objects shared by foundation walls and slabs.

use hm_core::FoundationId;
use serde::Serialize;

/// A block of rigid insulation placed relative to the foundation (ft, R in IP).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InsulationBlock {
    pub r_value: f64,
    /// Vertical depth, or horizontal width for under-slab insulation.
    pub extent: f64,
}

impl InsulationBlock {
    /// `None` when either the R-value or the extent is zero.
    pub fn new(r_value: f64, extent: f64) -> Option<Self> {
        (r_value > 0.0 && extent > 0.0).then_some(Self { r_value, extent })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Foundation {
    pub id: FoundationId,
    pub name: String,
    /// Id of the slab this object couples.
    pub slab_id: String,
    pub wall_height_above_grade: f64,
    /// Depth of the wall footing below the slab (ft).
    pub wall_depth_below_slab: f64,
    pub exterior_vertical: Option<InsulationBlock>,
    pub interior_vertical: Option<InsulationBlock>,
    pub interior_horizontal: Option<InsulationBlock>,
}

impl Foundation {
    pub fn exterior_vertical_r(&self) -> f64 {
        self.exterior_vertical.map_or(0.0, |b| b.r_value)
    }
}
