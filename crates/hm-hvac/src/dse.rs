//! Distribution system efficiency lookup.

use crate::error::{HvacError, HvacResult};
use hm_core::{Tolerances, nearly_equal};
use hm_input::{DistributionKind, HvacSystems};

/// Delivered-energy multipliers for one system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dse {
    pub heating: f64,
    pub cooling: f64,
    /// The distribution is a DSE placeholder rather than physical ducts/pipes.
    pub is_dse: bool,
}

impl Dse {
    pub const NONE: Dse = Dse {
        heating: 1.0,
        cooling: 1.0,
        is_dse: false,
    };
}

/// DSE for `system` served by `distribution`.
///
/// Systems without a distribution, or on a physical one, get unity values.
pub fn lookup(hvac: &HvacSystems, system: &str, distribution: Option<&str>) -> HvacResult<Dse> {
    let Some(id) = distribution else {
        return Ok(Dse::NONE);
    };
    let dist = hvac
        .distribution(id)
        .ok_or_else(|| HvacError::MissingDistribution {
            distribution: id.to_string(),
            system: system.to_string(),
        })?;
    Ok(match dist.kind {
        DistributionKind::Dse {
            annual_heating_dse,
            annual_cooling_dse,
        } => Dse {
            heating: annual_heating_dse,
            cooling: annual_cooling_dse,
            is_dse: true,
        },
        DistributionKind::Air { .. } | DistributionKind::Hydronic => Dse::NONE,
    })
}

/// Reject any DSE distribution that serves both loads with different
/// heating and cooling values. Heat pumps count as serving both.
pub fn check_shared(hvac: &HvacSystems) -> HvacResult<()> {
    for dist in &hvac.distributions {
        let DistributionKind::Dse {
            annual_heating_dse,
            annual_cooling_dse,
        } = dist.kind
        else {
            continue;
        };
        if nearly_equal(annual_heating_dse, annual_cooling_dse, Tolerances::default()) {
            continue;
        }

        let on_dist = |idref: &Option<String>| idref.as_deref() == Some(dist.id.as_str());
        let heat_pump = hvac
            .heat_pumps
            .iter()
            .find(|hp| on_dist(&hp.distribution_system_idref))
            .map(|hp| hp.id.as_str());
        let heater = hvac
            .heating_systems
            .iter()
            .find(|h| on_dist(&h.distribution_system_idref))
            .map(|h| h.id.as_str());
        let cooler = hvac
            .cooling_systems
            .iter()
            .find(|c| on_dist(&c.distribution_system_idref))
            .map(|c| c.id.as_str());

        let offender = match (heat_pump, heater, cooler) {
            (Some(hp), _, _) => Some(hp),
            (None, Some(heater), Some(_)) => Some(heater),
            _ => None,
        };
        if let Some(system) = offender {
            return Err(HvacError::MismatchedDse {
                system: system.to_string(),
            });
        }
    }
    Ok(())
}
