//! Duct runs and their share of measured leakage.

use crate::error::{HvacError, HvacResult};
use hm_core::SpaceType;
use hm_input::{
    DistributionKind, Duct, DuctLeakageMeasurement, DuctSide, HvacSystems, LeakageScope,
    LeakageUnits,
};
use hm_model::{self as model, ModelBuilder};
use std::collections::BTreeMap;
use tracing::debug;

/// One duct run outside conditioned space with its apportioned leakage.
#[derive(Debug, Clone, PartialEq)]
pub struct DuctRun<'a> {
    pub side: DuctSide,
    pub location: &'a str,
    pub area: f64,
    pub r_value: f64,
    /// Leakage to outside at 25 Pa (CFM25).
    pub leakage_cfm25: f64,
}

fn in_conditioned_space(location: &str) -> bool {
    SpaceType::from_location(location).is_some_and(SpaceType::is_conditioned)
}

/// Leakage to outside per duct side. The last CFM25 measurement of a side wins.
fn leakage_to_outside(measurements: &[DuctLeakageMeasurement]) -> BTreeMap<DuctSide, f64> {
    let mut leakage = BTreeMap::from([(DuctSide::Supply, 0.0), (DuctSide::Return, 0.0)]);
    for m in measurements {
        if m.units == LeakageUnits::Cfm25 && m.total_or_to_outside == LeakageScope::ToOutside {
            leakage.insert(m.duct_type, m.value);
        }
    }
    leakage
}

/// Split each side's leakage across its runs in proportion to surface area.
///
/// Runs inside conditioned space are dropped and do not count toward the
/// area totals.
pub fn apportion<'a>(ducts: &'a [Duct], measurements: &[DuctLeakageMeasurement]) -> Vec<DuctRun<'a>> {
    let leakage = leakage_to_outside(measurements);
    let outside: Vec<&Duct> = ducts
        .iter()
        .filter(|d| !in_conditioned_space(&d.location))
        .collect();

    let mut total_area: BTreeMap<DuctSide, f64> = BTreeMap::new();
    for duct in &outside {
        *total_area.entry(duct.duct_type).or_insert(0.0) += duct.surface_area;
    }

    outside
        .into_iter()
        .map(|duct| {
            let total = total_area.get(&duct.duct_type).copied().unwrap_or(0.0);
            let measured = leakage.get(&duct.duct_type).copied().unwrap_or(0.0);
            let leakage_cfm25 = if total > 0.0 {
                measured * duct.surface_area / total
            } else {
                0.0
            };
            DuctRun {
                side: duct.duct_type,
                location: &duct.location,
                area: duct.surface_area,
                r_value: duct.insulation_r_value,
                leakage_cfm25,
            }
        })
        .collect()
}

/// Systems serving each load from `distribution` with a non-zero fraction.
fn attached_systems<'a>(hvac: &'a HvacSystems, distribution: &str) -> (Vec<&'a str>, Vec<&'a str>) {
    let on = |idref: &Option<String>| idref.as_deref() == Some(distribution);
    let mut heating = Vec::new();
    let mut cooling = Vec::new();
    for h in &hvac.heating_systems {
        if on(&h.distribution_system_idref) && h.fraction_heat_load_served > 0.0 {
            heating.push(h.id.as_str());
        }
    }
    for c in &hvac.cooling_systems {
        if on(&c.distribution_system_idref) && c.fraction_cool_load_served > 0.0 {
            cooling.push(c.id.as_str());
        }
    }
    for hp in &hvac.heat_pumps {
        if on(&hp.distribution_system_idref) {
            if hp.fraction_heat_load_served > 0.0 {
                heating.push(hp.id.as_str());
            }
            if hp.fraction_cool_load_served > 0.0 {
                cooling.push(hp.id.as_str());
            }
        }
    }
    (heating, cooling)
}

/// Air loop of the systems created for `distribution`; the last one found wins.
fn air_loop(hvac: &HvacSystems, builder: &ModelBuilder, distribution: &str) -> Option<String> {
    let system_ids = hvac
        .heating_systems
        .iter()
        .filter(|h| h.distribution_system_idref.as_deref() == Some(distribution))
        .map(|h| h.id.as_str())
        .chain(
            hvac.cooling_systems
                .iter()
                .filter(|c| c.distribution_system_idref.as_deref() == Some(distribution))
                .map(|c| c.id.as_str()),
        )
        .chain(
            hvac.heat_pumps
                .iter()
                .filter(|hp| hp.distribution_system_idref.as_deref() == Some(distribution))
                .map(|hp| hp.id.as_str()),
        );
    let mut found = None;
    for system_id in system_ids {
        for &id in builder.equipment_map().get(system_id).unwrap_or_default() {
            if let Some(name) = builder
                .equipment()
                .get(id.slot())
                .and_then(|e| e.air_loop.clone())
            {
                found = Some(name);
            }
        }
    }
    found
}

/// Add the duct runs of every air distribution to the model.
pub fn add_ducts(hvac: &HvacSystems, builder: &mut ModelBuilder) -> HvacResult<usize> {
    let mut added = 0;
    for dist in &hvac.distributions {
        let DistributionKind::Air {
            ducts,
            leakage_measurements,
        } = &dist.kind
        else {
            continue;
        };

        let loop_name = air_loop(hvac, builder, &dist.id);
        for run in apportion(ducts, leakage_measurements) {
            let zone = builder.zones().existing("Duct", run.location)?;
            builder.add_duct(model::Duct {
                distribution: dist.id.clone(),
                side: run.side,
                zone,
                area: run.area,
                r_value: run.r_value,
                leakage_cfm25: run.leakage_cfm25,
                air_loop: loop_name.clone(),
            });
            debug!(distribution = %dist.id, location = run.location, leakage = run.leakage_cfm25, "added duct");
            added += 1;
        }

        let (heating, cooling) = attached_systems(hvac, &dist.id);
        if cooling.len() > 1 {
            return Err(HvacError::MultipleAttached {
                load: "cooling",
                distribution: dist.id.clone(),
            });
        }
        if heating.len() > 1 {
            return Err(HvacError::MultipleAttached {
                load: "heating",
                distribution: dist.id.clone(),
            });
        }
    }
    Ok(added)
}
