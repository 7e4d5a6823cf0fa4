//! Conditioned floor area reconciliation.
//!
//! The declared conditioned floor area wins over the modeled floor
//! surfaces: any shortfall is made up with an adiabatic floor in the living
//! zone, and a conditioned basement with more floor than ceiling gets an
//! adiabatic ceiling for the difference.

use crate::context::{AdiabaticKind, EnvelopeContext};
use crate::error::{EnvelopeError, EnvelopeResult};
use hm_core::{SpaceType, round_to};
use hm_geometry::{ceiling_polygon, floor_polygon};
use hm_model::{BoundaryCondition, ModelBuilder, SurfaceType};
use serde::Serialize;
use tracing::warn;

pub const INFERRED_BASEMENT_CEILING: &str = "inferred conditioned basement ceiling";
pub const INFERRED_FLOOR: &str = "inferred conditioned floor";

/// Areas added to reconcile the model with the declared floor area (ft²).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CfaInference {
    pub declared: f64,
    /// Conditioned floor area of the modeled floors before inference.
    pub modeled: f64,
    pub basement_ceiling: f64,
    pub floor: f64,
}

/// Area of surfaces of `surface_type` in `zone`, each rounded to 0.01 ft².
fn rounded_area(builder: &ModelBuilder, zone: hm_core::ZoneId, surface_type: SurfaceType) -> f64 {
    builder
        .surfaces_in(zone)
        .filter(|s| s.surface_type == surface_type)
        .map(|s| round_to(s.area(), 2))
        .sum()
}

pub fn infer_conditioned_floor_area(
    ctx: &mut EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
) -> EnvelopeResult<CfaInference> {
    let declared = round_to(ctx.desc.building.conditioned_floor_area, 1);
    let mut inference = CfaInference {
        declared,
        ..CfaInference::default()
    };

    if let Some(basement) = builder.zones().get(SpaceType::ConditionedBasement) {
        let floor_area = rounded_area(builder, basement, SurfaceType::Floor);
        let ceiling_area = rounded_area(builder, basement, SurfaceType::RoofCeiling);
        let addtl = floor_area - ceiling_area;
        if addtl > 0.0 {
            warn!(area = addtl, "adding adiabatic conditioned basement ceiling");
            let width = addtl.sqrt();
            let length = addtl / width;
            let surface = builder.add_surface(
                INFERRED_BASEMENT_CEILING,
                basement,
                SurfaceType::RoofCeiling,
                BoundaryCondition::Adiabatic,
                ceiling_polygon(-width, -length, ctx.levels.foundation_top),
                None,
            );
            let construction = ctx.adiabatic(builder, AdiabaticKind::Floor);
            builder.assign_construction(surface, construction)?;
            inference.basement_ceiling = addtl;
        }
    }

    let conditioned: Vec<_> = builder
        .zones()
        .zones()
        .iter()
        .filter(|z| z.is_conditioned())
        .map(|z| z.id)
        .collect();
    let modeled = round_to(
        conditioned
            .iter()
            .map(|&zone| rounded_area(builder, zone, SurfaceType::Floor))
            .sum(),
        2,
    );
    inference.modeled = modeled;

    if modeled > declared {
        return Err(EnvelopeError::FloorAreaExceeded {
            model_cfa: modeled,
            cfa: declared,
        });
    }
    let addtl = declared - modeled;
    if addtl > 0.0 {
        warn!(
            area = addtl,
            "adding adiabatic conditioned floor to preserve the declared floor area"
        );
        let width = addtl.sqrt();
        let length = addtl / width;
        let z = ctx.levels.top_floor(ctx.floors_above_grade());
        let living = builder.zones_mut().get_or_create(SpaceType::Living);
        let surface = builder.add_surface(
            INFERRED_FLOOR,
            living,
            SurfaceType::Floor,
            BoundaryCondition::Adiabatic,
            floor_polygon(-width, -length, z),
            None,
        );
        let construction = ctx.adiabatic(builder, AdiabaticKind::Floor);
        builder.assign_construction(surface, construction)?;
        inference.floor = addtl;
    }
    Ok(inference)
}
