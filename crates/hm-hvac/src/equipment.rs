//! Equipment synthesis for each declared system type.

use crate::context::{AllocationContext, Load};
use crate::dse::{self, Dse};
use crate::error::HvacResult;
use hm_core::{EquipmentId, LOAD_FRACTION_EPSILON};
use hm_input::{
    CoolingSystem, CoolingSystemKind, HeatPump, HeatPumpKind, HeatingSystem, HeatingSystemKind,
    HvacSystems,
};
use hm_model::{
    BackupHeat, Capacity, EquipmentKind, LoadShare, ModelBuilder, Speeds, fan_power_installed,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const IDEAL_AIR_NAME: &str = "ideal air loads";

/// Remainders at or above this are treated as a load no system was meant to serve.
const UNTOUCHED_LOAD: f64 = 0.99;

/// What to do with load left over after the explicit systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidualPolicy {
    /// Cover partial remainders only; a load no system touches stays unconditioned.
    #[default]
    Default,
    /// Cover every remainder above the epsilon.
    CoverAll,
}

fn air_loop_name(system_id: &str) -> String {
    format!("{system_id} air loop")
}

pub fn add_cooling_systems(
    hvac: &HvacSystems,
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
) -> HvacResult<()> {
    for system in &hvac.cooling_systems {
        add_cooling_system(hvac, builder, ctx, system)?;
    }
    Ok(())
}

fn add_cooling_system(
    hvac: &HvacSystems,
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
    system: &CoolingSystem,
) -> HvacResult<EquipmentId> {
    let share = ctx.take(&system.id, Load::Cooling, system.fraction_cool_load_served)?;
    let dse = dse::lookup(hvac, &system.id, system.distribution_system_idref.as_deref())?;

    let (name, kind, air_loop) = match system.kind {
        CoolingSystemKind::CentralAirConditioner { seer } => (
            format!("{} central air conditioner", system.id),
            EquipmentKind::CentralAirConditioner {
                speeds: Speeds::by_seer(seer),
                seer,
                fan_power_w_per_cfm: fan_power_installed(seer),
            },
            Some(air_loop_name(&system.id)),
        ),
        CoolingSystemKind::RoomAirConditioner { eer } => (
            format!("{} room air conditioner", system.id),
            EquipmentKind::RoomAirConditioner { eer },
            None,
        ),
    };

    let id = builder.add_equipment(name, Some(&system.id), kind);
    let equipment = builder.equipment_mut(id)?;
    equipment.cooling = Some(share);
    equipment.cooling_capacity = Some(Capacity::from_input(system.cooling_capacity));
    equipment.dse = dse.cooling;
    equipment.distribution = system.distribution_system_idref.clone();
    equipment.air_loop = air_loop;
    debug!(system = %system.id, sequential = share.sequential, "allocated cooling system");
    Ok(id)
}

/// Central air conditioner on the same physical distribution as `system`.
fn attached_cooling(
    hvac: &HvacSystems,
    builder: &ModelBuilder,
    system: &HeatingSystem,
    dse: Dse,
) -> Option<EquipmentId> {
    let distribution = system.distribution_system_idref.as_deref()?;
    if dse.is_dse {
        return None;
    }
    hvac.cooling_systems
        .iter()
        .filter(|c| c.distribution_system_idref.as_deref() == Some(distribution))
        .filter_map(|c| builder.equipment_map().get(&c.id))
        .flatten()
        .copied()
        .find(|id| {
            builder.equipment().get(id.slot()).is_some_and(|e| {
                matches!(e.kind, EquipmentKind::CentralAirConditioner { .. })
            })
        })
}

/// Heating systems in two passes: furnaces sharing a central air
/// conditioner's air loop first, then everything else in declaration order.
pub fn add_heating_systems(
    hvac: &HvacSystems,
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
) -> HvacResult<()> {
    for attached_pass in [true, false] {
        for system in &hvac.heating_systems {
            let dse = dse::lookup(hvac, &system.id, system.distribution_system_idref.as_deref())?;
            let attached = attached_cooling(hvac, builder, system, dse);
            let is_attached_furnace =
                matches!(system.kind, HeatingSystemKind::Furnace { .. }) && attached.is_some();
            if is_attached_furnace != attached_pass {
                continue;
            }
            add_heating_system(builder, ctx, system, dse, attached)?;
        }
    }
    Ok(())
}

fn add_heating_system(
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
    system: &HeatingSystem,
    dse: Dse,
    attached: Option<EquipmentId>,
) -> HvacResult<EquipmentId> {
    let share = ctx.take(&system.id, Load::Heating, system.fraction_heat_load_served)?;
    let fuel = system.fuel;

    let (name, kind) = match system.kind {
        HeatingSystemKind::Furnace { afue } => (
            format!("{} furnace", system.id),
            EquipmentKind::Furnace {
                fuel,
                afue,
                attached_to: attached,
            },
        ),
        HeatingSystemKind::WallFurnace { afue } => (
            format!("{} wall furnace", system.id),
            EquipmentKind::WallFurnace { fuel, afue },
        ),
        HeatingSystemKind::Boiler { afue } => (
            format!("{} boiler", system.id),
            EquipmentKind::Boiler { fuel, afue },
        ),
        HeatingSystemKind::ElectricResistance { efficiency_percent } => (
            format!("{} electric baseboard", system.id),
            EquipmentKind::ElectricBaseboard {
                efficiency: efficiency_percent,
            },
        ),
        HeatingSystemKind::Stove { efficiency_percent } => (
            format!("{} stove", system.id),
            EquipmentKind::Stove {
                fuel,
                efficiency: efficiency_percent,
            },
        ),
    };
    let air_loop = match (&kind, attached) {
        (EquipmentKind::Furnace { .. }, Some(ac)) => builder
            .equipment()
            .get(ac.slot())
            .and_then(|e| e.air_loop.clone()),
        (EquipmentKind::Furnace { .. }, None) => Some(air_loop_name(&system.id)),
        _ => None,
    };

    let id = builder.add_equipment(name, Some(&system.id), kind);
    let equipment = builder.equipment_mut(id)?;
    equipment.heating = Some(share);
    equipment.heating_capacity = Some(Capacity::from_input(system.heating_capacity));
    equipment.dse = dse.heating;
    equipment.distribution = system.distribution_system_idref.clone();
    equipment.air_loop = air_loop;
    debug!(system = %system.id, sequential = share.sequential, "allocated heating system");
    Ok(id)
}

pub fn add_heat_pumps(
    hvac: &HvacSystems,
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
) -> HvacResult<()> {
    for heat_pump in &hvac.heat_pumps {
        add_heat_pump(hvac, builder, ctx, heat_pump)?;
    }
    Ok(())
}

fn add_heat_pump(
    hvac: &HvacSystems,
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
    heat_pump: &HeatPump,
) -> HvacResult<EquipmentId> {
    let heating = ctx.take(&heat_pump.id, Load::Heating, heat_pump.fraction_heat_load_served)?;
    let cooling = ctx.take(&heat_pump.id, Load::Cooling, heat_pump.fraction_cool_load_served)?;

    let backup = heat_pump.backup.as_ref().map(|b| BackupHeat {
        fuel: b.fuel,
        efficiency: b.efficiency_percent,
        capacity: Capacity::from_input(b.capacity),
    });

    let distribution = heat_pump.distribution_system_idref.as_deref();
    let dse = dse::lookup(hvac, &heat_pump.id, distribution)?;

    let (name, kind, ducted) = match heat_pump.kind {
        HeatPumpKind::AirToAir { seer, hspf } => {
            let speeds = if heat_pump.fraction_cool_load_served > 0.0 {
                Speeds::by_seer(seer)
            } else {
                Speeds::by_hspf(hspf)
            };
            (
                format!("{} air source heat pump", heat_pump.id),
                EquipmentKind::AirToAirHeatPump {
                    speeds,
                    seer,
                    hspf,
                    fan_power_w_per_cfm: fan_power_installed(seer),
                },
                true,
            )
        }
        HeatPumpKind::MiniSplit { seer, hspf } => {
            let ducted = distribution.is_some() && !dse.is_dse;
            (
                format!("{} mini-split heat pump", heat_pump.id),
                EquipmentKind::MiniSplitHeatPump { seer, hspf, ducted },
                ducted,
            )
        }
        HeatPumpKind::GroundToAir { eer, cop } => (
            format!("{} ground source heat pump", heat_pump.id),
            EquipmentKind::GroundToAirHeatPump { eer, cop },
            true,
        ),
    };

    let id = builder.add_equipment(name, Some(&heat_pump.id), kind);
    let capacity = Capacity::from_input(heat_pump.cooling_capacity);
    let equipment = builder.equipment_mut(id)?;
    equipment.heating = Some(heating);
    equipment.cooling = Some(cooling);
    equipment.heating_capacity = Some(capacity);
    equipment.cooling_capacity = Some(capacity);
    equipment.backup = backup;
    equipment.dse = dse.heating;
    equipment.distribution = heat_pump.distribution_system_idref.clone();
    equipment.air_loop = ducted.then(|| air_loop_name(&heat_pump.id));
    debug!(
        system = %heat_pump.id,
        heating = heating.sequential,
        cooling = cooling.sequential,
        "allocated heat pump"
    );
    Ok(id)
}

/// One ideal-load system serving everything.
pub fn add_ideal_only(builder: &mut ModelBuilder) -> HvacResult<EquipmentId> {
    let full = LoadShare {
        declared: 1.0,
        sequential: 1.0,
    };
    add_ideal(builder, full, full)
}

fn add_ideal(
    builder: &mut ModelBuilder,
    heating: LoadShare,
    cooling: LoadShare,
) -> HvacResult<EquipmentId> {
    let id = builder.add_equipment(IDEAL_AIR_NAME, None, EquipmentKind::IdealLoads);
    let equipment = builder.equipment_mut(id)?;
    equipment.heating = Some(heating);
    equipment.cooling = Some(cooling);
    Ok(id)
}

/// Cover what the explicit systems left unserved with an ideal-load system.
pub fn add_residual(
    builder: &mut ModelBuilder,
    ctx: &mut AllocationContext,
    policy: ResidualPolicy,
) -> HvacResult<Option<EquipmentId>> {
    if policy == ResidualPolicy::Default {
        for load in [Load::Cooling, Load::Heating] {
            if ctx.remaining(load) >= UNTOUCHED_LOAD {
                ctx.set_remaining(load, 0.0);
            }
        }
    }

    let share = |remaining: f64| LoadShare {
        declared: remaining,
        sequential: if remaining > LOAD_FRACTION_EPSILON { 1.0 } else { 0.0 },
    };
    let heating = ctx.remaining(Load::Heating);
    let cooling = ctx.remaining(Load::Cooling);
    if heating <= LOAD_FRACTION_EPSILON && cooling <= LOAD_FRACTION_EPSILON {
        return Ok(None);
    }

    let id = add_ideal(builder, share(heating), share(cooling))?;
    info!(heating, cooling, "added residual ideal-load system");
    Ok(Some(id))
}
