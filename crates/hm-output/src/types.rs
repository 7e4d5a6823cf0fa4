//! Export data types.

use chrono::{SecondsFormat, Utc};
use hm_core::{cubic_meters, ft2, ft3, r_ip_to_si, round_to, square_meters};
use hm_model::BuildingModel;
use serde::{Deserialize, Serialize};

pub type BuildId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub build_id: BuildId,
    pub name: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub translator_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_dir: Option<String>,
    pub summary: ModelSummary,
}

impl BuildManifest {
    pub fn new(
        build_id: BuildId,
        model: &BuildingModel,
        translator_version: &str,
        weather_dir: Option<String>,
    ) -> Self {
        Self {
            build_id,
            name: model.name.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            translator_version: translator_version.to_string(),
            weather_dir,
            summary: ModelSummary::from_model(model),
        }
    }
}

/// Object counts and SI totals of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub zones: usize,
    pub surfaces: usize,
    pub sub_surfaces: usize,
    pub foundations: usize,
    pub constructions: usize,
    pub equipment: usize,
    pub ducts: usize,
    pub conditioned_floor_area_m2: f64,
    pub total_volume_m3: f64,
    /// Realized thermal resistance of every construction (m2-K/W, 4 places).
    #[serde(default)]
    pub construction_rsi: Vec<ConstructionRsi>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionRsi {
    pub name: String,
    pub rsi: f64,
}

impl ModelSummary {
    pub fn from_model(model: &BuildingModel) -> Self {
        Self {
            zones: model.zones.len(),
            surfaces: model.surfaces.len(),
            sub_surfaces: model.sub_surfaces.len(),
            foundations: model.foundations.len(),
            constructions: model.constructions.len(),
            equipment: model.equipment.len(),
            ducts: model.ducts.len(),
            conditioned_floor_area_m2: square_meters(ft2(model.conditioned_floor_area())),
            total_volume_m3: cubic_meters(ft3(model.total_volume())),
            construction_rsi: model
                .constructions
                .iter()
                .map(|c| ConstructionRsi {
                    name: c.name().to_string(),
                    rsi: round_to(r_ip_to_si(c.realized_r), 4),
                })
                .collect(),
        }
    }
}

/// Contents of `model.json`.
#[derive(Debug, Serialize)]
pub struct ModelExport<'a> {
    pub summary: ModelSummary,
    pub model: &'a BuildingModel,
}
