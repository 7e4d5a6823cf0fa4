//! HVAC equipment records and the system id -> equipment map.

use hm_core::{EquipmentId, ZoneId};
use hm_input::{DuctSide, Fuel};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Capacity {
    Autosize,
    Btuh(f64),
}

impl Capacity {
    /// Absent or negative capacities are left to the sizing engine.
    pub fn from_input(capacity: Option<f64>) -> Self {
        match capacity {
            Some(c) if c >= 0.0 => Capacity::Btuh(c),
            _ => Capacity::Autosize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Speeds {
    One,
    Two,
    Variable,
}

impl Speeds {
    pub fn by_seer(seer: f64) -> Self {
        if seer <= 15.0 {
            Speeds::One
        } else if seer <= 21.0 {
            Speeds::Two
        } else {
            Speeds::Variable
        }
    }

    pub fn by_hspf(hspf: f64) -> Self {
        if hspf <= 8.5 {
            Speeds::One
        } else if hspf <= 9.5 {
            Speeds::Two
        } else {
            Speeds::Variable
        }
    }

    pub fn count(self) -> usize {
        match self {
            Speeds::One => 1,
            Speeds::Two => 2,
            Speeds::Variable => 4,
        }
    }
}

/// Installed supply fan power (W/cfm) for air-distributed equipment.
pub fn fan_power_installed(seer: f64) -> f64 {
    if seer <= 15.0 { 0.365 } else { 0.14 }
}

/// Portion of one load type served by a system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadShare {
    /// Fraction of the whole building load.
    pub declared: f64,
    /// Fraction of the load still unserved when the system was processed.
    pub sequential: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackupHeat {
    pub fuel: Fuel,
    pub efficiency: f64,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EquipmentKind {
    IdealLoads,
    CentralAirConditioner {
        speeds: Speeds,
        seer: f64,
        fan_power_w_per_cfm: f64,
    },
    RoomAirConditioner {
        eer: f64,
    },
    Furnace {
        fuel: Fuel,
        afue: f64,
        /// Unitary system of the cooling equipment it shares an air loop with.
        attached_to: Option<EquipmentId>,
    },
    WallFurnace {
        fuel: Fuel,
        afue: f64,
    },
    Boiler {
        fuel: Fuel,
        afue: f64,
    },
    ElectricBaseboard {
        efficiency: f64,
    },
    Stove {
        fuel: Fuel,
        efficiency: f64,
    },
    AirToAirHeatPump {
        speeds: Speeds,
        seer: f64,
        hspf: f64,
        fan_power_w_per_cfm: f64,
    },
    MiniSplitHeatPump {
        seer: f64,
        hspf: f64,
        ducted: bool,
    },
    GroundToAirHeatPump {
        eer: f64,
        cop: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    /// Input system id; `None` for the inserted residual ideal-load system.
    pub system_id: Option<String>,
    pub kind: EquipmentKind,
    pub heating: Option<LoadShare>,
    pub cooling: Option<LoadShare>,
    pub heating_capacity: Option<Capacity>,
    pub cooling_capacity: Option<Capacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupHeat>,
    /// Distribution system efficiency applied to delivered energy.
    pub dse: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    /// Air loop serving the conditioned zone, when the equipment is ducted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_loop: Option<String>,
}

/// One duct run with its apportioned leakage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Duct {
    pub distribution: String,
    pub side: DuctSide,
    pub zone: ZoneId,
    pub area: f64,
    pub r_value: f64,
    /// Leakage to outside at 25 Pa (CFM25).
    pub leakage_cfm25: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_loop: Option<String>,
}

/// Input system id -> equipment created for it, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EquipmentMap {
    entries: Vec<(String, Vec<EquipmentId>)>,
}

impl EquipmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an (initially empty) entry for `system_id`.
    pub fn register(&mut self, system_id: &str) {
        if self.get(system_id).is_none() {
            self.entries.push((system_id.to_string(), Vec::new()));
        }
    }

    pub fn push(&mut self, system_id: &str, equipment: EquipmentId) {
        self.register(system_id);
        if let Some((_, ids)) = self.entries.iter_mut().find(|(id, _)| id == system_id) {
            ids.push(equipment);
        }
    }

    pub fn get(&self, system_id: &str) -> Option<&[EquipmentId]> {
        self.entries
            .iter()
            .find(|(id, _)| id == system_id)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EquipmentId])> {
        self.entries
            .iter()
            .map(|(id, ids)| (id.as_str(), ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
