//! hm-hvac: allocates the building's heating and cooling loads to equipment.
//!
//! Systems are processed cooling first, then heating (furnaces sharing an air
//! conditioner's air loop ahead of the rest), then heat pumps. Each system's
//! sequential fraction is relative to the load left when its turn comes.
//! Whatever remains goes to an ideal-load system according to the
//! [`ResidualPolicy`], and duct runs are attached last.

pub mod context;
pub mod dse;
pub mod ducts;
pub mod equipment;
pub mod error;

pub use context::{AllocationContext, Load};
pub use dse::Dse;
pub use equipment::{IDEAL_AIR_NAME, ResidualPolicy};
pub use error::{HvacError, HvacResult};

use hm_core::EquipmentId;
use hm_input::BuildingDescription;
use hm_model::ModelBuilder;
use serde::Serialize;
use tracing::info;

/// Outcome of load allocation for one build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub ideal_only: bool,
    pub equipment: usize,
    pub residual: Option<EquipmentId>,
    pub ducts: usize,
    /// Load left unserved after the explicit systems, before clamping.
    pub unserved_heating: f64,
    pub unserved_cooling: f64,
}

/// Create equipment for every declared system and register it in the map.
pub fn allocate(
    desc: &BuildingDescription,
    builder: &mut ModelBuilder,
    policy: ResidualPolicy,
) -> HvacResult<AllocationSummary> {
    let hvac = &desc.hvac;
    if desc.building.use_only_ideal_air_system {
        let id = equipment::add_ideal_only(builder)?;
        info!("ideal air system serves all loads");
        return Ok(AllocationSummary {
            ideal_only: true,
            equipment: 1,
            residual: Some(id),
            ducts: 0,
            unserved_heating: 0.0,
            unserved_cooling: 0.0,
        });
    }

    dse::check_shared(hvac)?;
    let mut ctx = AllocationContext::new();
    equipment::add_cooling_systems(hvac, builder, &mut ctx)?;
    equipment::add_heating_systems(hvac, builder, &mut ctx)?;
    equipment::add_heat_pumps(hvac, builder, &mut ctx)?;
    let unserved_heating = ctx.remaining(Load::Heating);
    let unserved_cooling = ctx.remaining(Load::Cooling);
    info!(
        equipment = builder.equipment().len(),
        unserved_heating, unserved_cooling, "systems allocated"
    );

    let residual = equipment::add_residual(builder, &mut ctx, policy)?;
    let ducts = ducts::add_ducts(hvac, builder)?;
    info!(ducts, "ducts attached");

    Ok(AllocationSummary {
        ideal_only: false,
        equipment: builder.equipment().len(),
        residual,
        ducts,
        unserved_heating,
        unserved_cooling,
    })
}
