//! Building description schema.
//!
//! Typed values handed to the translator. Adjacency fields stay as the
//! input's location strings; they are mapped onto `hm_core::Adjacency` by the
//! assembler so that an unknown value can be reported against its surface id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingDescription {
    pub version: u32,
    pub name: String,
    pub building: BuildingSummary,
    #[serde(default)]
    pub enclosure: Enclosure,
    #[serde(default)]
    pub hvac: HvacSystems,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingSummary {
    pub conditioned_floor_area: f64,
    pub conditioned_building_volume: f64,
    pub number_of_conditioned_floors: u32,
    pub number_of_conditioned_floors_above_grade: u32,
    #[serde(default)]
    pub use_only_ideal_air_system: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<NeighborBuilding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NeighborBuilding {
    pub azimuth: u32,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Enclosure {
    #[serde(default)]
    pub roofs: Vec<Roof>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub rim_joists: Vec<RimJoist>,
    #[serde(default)]
    pub frame_floors: Vec<FrameFloor>,
    #[serde(default)]
    pub foundation_walls: Vec<FoundationWall>,
    #[serde(default)]
    pub slabs: Vec<Slab>,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub skylights: Vec<Skylight>,
    #[serde(default)]
    pub doors: Vec<Door>,
}

/// Insulation level of an opaque surface.
///
/// Exactly one of the two forms must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insulation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_r_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<LayeredInsulation>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayeredInsulation {
    pub cavity_r_value: f64,
    pub continuous_r_value: f64,
    pub framing_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsulationSpec {
    Assembly(f64),
    Layered(LayeredInsulation),
}

impl Insulation {
    pub fn assembly(r_value: f64) -> Self {
        Self {
            assembly_r_value: Some(r_value),
            layers: None,
        }
    }

    /// The single insulation form, or `None` when zero or both are given.
    pub fn spec(&self) -> Option<InsulationSpec> {
        match (self.assembly_r_value, self.layers) {
            (Some(r), None) => Some(InsulationSpec::Assembly(r)),
            (None, Some(layers)) => Some(InsulationSpec::Layered(layers)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roof {
    pub id: String,
    pub interior_adjacent_to: String,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<u32>,
    /// Rise per 12 units of run.
    pub pitch: f64,
    pub insulation: Insulation,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default = "default_emittance")]
    pub emittance: f64,
    #[serde(default)]
    pub radiant_barrier: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WallType {
    WoodStud,
    SteelFrame,
    DoubleWoodStud,
    ConcreteMasonryUnit,
    StructurallyInsulatedPanel,
    InsulatedConcreteForms,
    SolidConcrete,
    StructuralBrick,
    StrawBale,
    Stone,
    LogWall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wall {
    pub id: String,
    pub exterior_adjacent_to: String,
    pub interior_adjacent_to: String,
    pub wall_type: WallType,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<u32>,
    pub insulation: Insulation,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default = "default_emittance")]
    pub emittance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RimJoist {
    pub id: String,
    pub exterior_adjacent_to: String,
    pub interior_adjacent_to: String,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<u32>,
    pub insulation: Insulation,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default = "default_emittance")]
    pub emittance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameFloor {
    pub id: String,
    pub exterior_adjacent_to: String,
    pub interior_adjacent_to: String,
    pub area: f64,
    pub insulation: Insulation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoundationWallInsulation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_r_value: Option<f64>,
    #[serde(default)]
    pub r_value: f64,
    #[serde(default)]
    pub distance_to_bottom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoundationWall {
    pub id: String,
    pub exterior_adjacent_to: String,
    pub interior_adjacent_to: String,
    pub height: f64,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<u32>,
    /// Concrete thickness (in).
    pub thickness: f64,
    pub depth_below_grade: f64,
    #[serde(default)]
    pub insulation: FoundationWallInsulation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slab {
    pub id: String,
    pub interior_adjacent_to: String,
    pub area: f64,
    /// Concrete thickness (in).
    pub thickness: f64,
    pub exposed_perimeter: f64,
    #[serde(default)]
    pub perimeter_insulation_depth: f64,
    #[serde(default)]
    pub under_slab_insulation_width: f64,
    #[serde(default)]
    pub under_slab_insulation_spans_entire_slab: bool,
    #[serde(default)]
    pub depth_below_grade: f64,
    #[serde(default)]
    pub perimeter_insulation_r_value: f64,
    #[serde(default)]
    pub under_slab_insulation_r_value: f64,
    #[serde(default)]
    pub carpet_fraction: f64,
    #[serde(default = "default_carpet_r_value")]
    pub carpet_r_value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Overhangs {
    pub depth: f64,
    pub distance_to_top_of_window: f64,
    pub distance_to_bottom_of_window: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Window {
    pub id: String,
    pub area: f64,
    pub azimuth: u32,
    pub ufactor: f64,
    pub shgc: f64,
    pub wall_idref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhangs: Option<Overhangs>,
    #[serde(default = "default_interior_shading_summer")]
    pub interior_shading_factor_summer: f64,
    #[serde(default = "default_interior_shading_winter")]
    pub interior_shading_factor_winter: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skylight {
    pub id: String,
    pub area: f64,
    pub azimuth: u32,
    pub ufactor: f64,
    pub shgc: f64,
    pub roof_idref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Door {
    pub id: String,
    pub area: f64,
    pub azimuth: u32,
    pub r_value: f64,
    pub wall_idref: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HvacSystems {
    #[serde(default)]
    pub heating_systems: Vec<HeatingSystem>,
    #[serde(default)]
    pub cooling_systems: Vec<CoolingSystem>,
    #[serde(default)]
    pub heat_pumps: Vec<HeatPump>,
    #[serde(default)]
    pub distributions: Vec<HvacDistribution>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Fuel {
    #[serde(rename = "natural gas")]
    NaturalGas,
    #[serde(rename = "fuel oil")]
    FuelOil,
    #[serde(rename = "propane")]
    Propane,
    #[serde(rename = "electricity")]
    Electricity,
    #[serde(rename = "wood")]
    Wood,
    #[serde(rename = "wood pellets")]
    WoodPellets,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatingSystem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_system_idref: Option<String>,
    pub kind: HeatingSystemKind,
    pub fuel: Fuel,
    /// Btu/h; absent or negative means autosized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_capacity: Option<f64>,
    pub fraction_heat_load_served: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum HeatingSystemKind {
    Furnace { afue: f64 },
    WallFurnace { afue: f64 },
    Boiler { afue: f64 },
    ElectricResistance { efficiency_percent: f64 },
    Stove { efficiency_percent: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoolingSystem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_system_idref: Option<String>,
    pub kind: CoolingSystemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_capacity: Option<f64>,
    pub fraction_cool_load_served: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CoolingSystemKind {
    CentralAirConditioner { seer: f64 },
    RoomAirConditioner { eer: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatPump {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_system_idref: Option<String>,
    pub kind: HeatPumpKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupHeating>,
    pub fraction_heat_load_served: f64,
    pub fraction_cool_load_served: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum HeatPumpKind {
    AirToAir { seer: f64, hspf: f64 },
    MiniSplit { seer: f64, hspf: f64 },
    GroundToAir { eer: f64, cop: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupHeating {
    pub fuel: Fuel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    pub efficiency_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HvacDistribution {
    pub id: String,
    pub kind: DistributionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DistributionKind {
    Air {
        #[serde(default)]
        ducts: Vec<Duct>,
        #[serde(default)]
        leakage_measurements: Vec<DuctLeakageMeasurement>,
    },
    Hydronic,
    Dse {
        annual_heating_dse: f64,
        annual_cooling_dse: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DuctSide {
    Supply,
    Return,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Duct {
    pub duct_type: DuctSide,
    pub location: String,
    pub surface_area: f64,
    #[serde(default)]
    pub insulation_r_value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeakageUnits {
    #[serde(rename = "CFM25")]
    Cfm25,
    #[serde(rename = "CFM50")]
    Cfm50,
    Percent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeakageScope {
    #[serde(rename = "total")]
    Total,
    #[serde(rename = "to outside")]
    ToOutside,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuctLeakageMeasurement {
    pub duct_type: DuctSide,
    pub units: LeakageUnits,
    pub total_or_to_outside: LeakageScope,
    pub value: f64,
}

fn default_solar_absorptance() -> f64 {
    0.7
}

fn default_emittance() -> f64 {
    0.9
}

fn default_carpet_r_value() -> f64 {
    2.5
}

fn default_interior_shading_summer() -> f64 {
    0.70
}

fn default_interior_shading_winter() -> f64 {
    0.85
}

impl Enclosure {
    /// First azimuth declared anywhere in the enclosure, else 90.
    pub fn default_azimuth(&self) -> u32 {
        self.roofs
            .iter()
            .filter_map(|r| r.azimuth)
            .chain(self.walls.iter().filter_map(|w| w.azimuth))
            .chain(self.rim_joists.iter().filter_map(|r| r.azimuth))
            .chain(self.foundation_walls.iter().filter_map(|f| f.azimuth))
            .chain(self.windows.iter().map(|w| w.azimuth))
            .chain(self.skylights.iter().map(|s| s.azimuth))
            .chain(self.doors.iter().map(|d| d.azimuth))
            .next()
            .unwrap_or(90)
    }
}

impl HvacSystems {
    pub fn distribution(&self, id: &str) -> Option<&HvacDistribution> {
        self.distributions.iter().find(|d| d.id == id)
    }
}
