//! Read-only views of a built model for listing.

use hm_model::{BuildingModel, ConstructionSource, Equipment};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub name: String,
    pub location: &'static str,
    pub conditioned: bool,
    pub surface_count: usize,
    /// ft³
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructionSummary {
    pub surface: String,
    pub construction: String,
    pub source: ConstructionSource,
    pub realized_r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentSummary {
    pub system_id: Option<String>,
    pub name: String,
    pub heating_fraction: Option<f64>,
    pub cooling_fraction: Option<f64>,
    pub air_loop: Option<String>,
}

impl From<&Equipment> for EquipmentSummary {
    fn from(e: &Equipment) -> Self {
        Self {
            system_id: e.system_id.clone(),
            name: e.name.clone(),
            heating_fraction: e.heating.map(|s| s.declared),
            cooling_fraction: e.cooling.map(|s| s.declared),
            air_loop: e.air_loop.clone(),
        }
    }
}

pub fn list_zones(model: &BuildingModel) -> Vec<ZoneSummary> {
    model
        .zones
        .iter()
        .map(|z| ZoneSummary {
            name: z.name.clone(),
            location: z.space_type.location(),
            conditioned: z.is_conditioned(),
            surface_count: model.surfaces_in(z.id).count(),
            volume: z.volume,
        })
        .collect()
}

/// Constructions in surface order; surfaces without one are skipped.
pub fn list_constructions(model: &BuildingModel) -> Vec<ConstructionSummary> {
    model
        .surfaces
        .iter()
        .filter_map(|s| {
            let c = model.construction_of(s)?;
            Some(ConstructionSummary {
                surface: s.name.clone(),
                construction: c.name().to_string(),
                source: c.source,
                realized_r: c.realized_r,
            })
        })
        .collect()
}

pub fn list_equipment(model: &BuildingModel) -> Vec<EquipmentSummary> {
    model.equipment.iter().map(EquipmentSummary::from).collect()
}
