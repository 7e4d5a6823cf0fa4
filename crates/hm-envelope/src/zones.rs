//! Zone completeness and volumes.

use crate::error::EnvelopeResult;
use hm_core::{SpaceType, ZoneId};
use hm_model::{BoundaryCondition, ModelBuilder, ModelError, SurfaceType};
use tracing::debug;

/// Smallest volume given to an attic (ft³).
const MIN_ATTIC_VOLUME: f64 = 0.01;

/// Every zone needs a floor or ceiling and at least one surface facing
/// outdoors or the ground.
pub fn check_zone_completeness(builder: &ModelBuilder) -> EnvelopeResult<()> {
    for zone in builder.zones().zones() {
        let surfaces: Vec<_> = builder.surfaces_in(zone.id).collect();
        if !surfaces
            .iter()
            .any(|s| matches!(s.surface_type, SurfaceType::Floor | SurfaceType::RoofCeiling))
        {
            return Err(ModelError::IncompleteZone {
                zone: zone.name.clone(),
                missing: "floor/roof/ceiling",
            }
            .into());
        }
        if !surfaces.iter().any(|s| s.boundary.is_exterior()) {
            return Err(ModelError::IncompleteZone {
                zone: zone.name.clone(),
                missing: "outside/ground-facing",
            }
            .into());
        }
    }
    Ok(())
}

fn floor_area(builder: &ModelBuilder, zone: ZoneId) -> f64 {
    builder
        .surfaces_in(zone)
        .filter(|s| s.surface_type == SurfaceType::Floor)
        .map(|s| s.area())
        .sum()
}

/// Vertical extent of every surface in `zone`.
fn zone_height(builder: &ModelBuilder, zone: ZoneId) -> f64 {
    let (min, max) = builder
        .surfaces_in(zone)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.polygon.min_z()), hi.max(s.polygon.max_z()))
        });
    if max >= min { max - min } else { 0.0 }
}

/// Mean tilt of the sun-exposed roofs in `zone` (degrees).
fn roof_pitch(builder: &ModelBuilder, zone: ZoneId) -> f64 {
    let tilts: Vec<f64> = builder
        .surfaces_in(zone)
        .filter(|s| {
            s.surface_type == SurfaceType::RoofCeiling && s.boundary == BoundaryCondition::Outdoors
        })
        .filter_map(|s| s.polygon.tilt_degrees())
        .collect();
    if tilts.is_empty() {
        0.0
    } else {
        tilts.iter().sum::<f64>() / tilts.len() as f64
    }
}

fn non_positive(zone: &str, volume: f64) -> ModelError {
    ModelError::NonPositiveVolume {
        zone: zone.to_string(),
        volume,
    }
}

/// Assign a volume to every zone.
///
/// Below-grade zones and the garage take floor area times height. The living
/// zone gets the declared conditioned volume less any conditioned basement.
/// Attics are treated as square hip roofs.
pub fn set_zone_volumes(builder: &mut ModelBuilder, conditioned_volume: f64) -> EnvelopeResult<()> {
    let zones: Vec<(ZoneId, SpaceType, String)> = builder
        .zones()
        .zones()
        .iter()
        .map(|z| (z.id, z.space_type, z.name.clone()))
        .collect();
    let mut living_volume = conditioned_volume;

    for (zone, space_type, name) in &zones {
        if !(space_type.is_below_grade() || *space_type == SpaceType::Garage) {
            continue;
        }
        let volume = zone_height(builder, *zone) * floor_area(builder, *zone);
        if volume <= 0.0 {
            return Err(non_positive(name, volume).into());
        }
        builder.set_zone_volume(*zone, volume)?;
        if *space_type == SpaceType::ConditionedBasement {
            living_volume = conditioned_volume - volume;
        }
        debug!(zone = %name, volume, "set zone volume");
    }

    for (zone, space_type, name) in &zones {
        if *space_type != SpaceType::Living {
            continue;
        }
        if living_volume <= 0.0 {
            return Err(non_positive(name, living_volume).into());
        }
        builder.set_zone_volume(*zone, living_volume)?;
    }

    for (zone, space_type, name) in &zones {
        if !space_type.is_attic() {
            continue;
        }
        let area = floor_area(builder, *zone);
        let height = roof_pitch(builder, *zone).to_radians().tan() * area.sqrt() / 2.0;
        let volume = (area * height / 3.0).max(MIN_ATTIC_VOLUME);
        builder.set_zone_volume(*zone, volume)?;
        debug!(zone = %name, volume, "set attic volume");
    }
    Ok(())
}
