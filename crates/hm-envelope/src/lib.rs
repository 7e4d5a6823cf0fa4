//! hm-envelope: turns the declared enclosure into model geometry.
//!
//! Stages run in a fixed order because later ones read what earlier ones
//! produced: opaque surfaces, foundations, openings, floor-area inference,
//! zone checks and volumes, and finally the layout that spreads surfaces
//! apart.

pub mod cfa;
pub mod context;
pub mod error;
pub mod explode;
pub mod foundation;
pub mod opaque;
pub mod openings;
pub mod zones;

pub use cfa::CfaInference;
pub use context::{AdiabaticKind, EnvelopeContext};
pub use error::{EnvelopeError, EnvelopeResult};
pub use explode::{ExplodePlan, GAP};
pub use foundation::{SlabDimensions, slab_dimensions};

use hm_geometry::Levels;
use hm_input::BuildingDescription;
use hm_model::ModelBuilder;
use serde::Serialize;
use tracing::info;

/// What envelope assembly derived beyond the declared surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeSummary {
    #[serde(skip)]
    pub levels: Levels,
    pub default_azimuth: u32,
    pub floor_area: CfaInference,
    pub explode: Option<ExplodePlan>,
}

/// Add every enclosure element of `desc` to `builder`.
pub fn assemble(
    desc: &BuildingDescription,
    builder: &mut ModelBuilder,
) -> EnvelopeResult<EnvelopeSummary> {
    let mut ctx = EnvelopeContext::new(desc);
    info!(
        foundation_top = ctx.levels.foundation_top,
        walls_top = ctx.levels.walls_top,
        default_azimuth = ctx.default_azimuth,
        "assembling envelope"
    );

    opaque::add_roofs(&ctx, builder)?;
    opaque::add_walls(&ctx, builder)?;
    opaque::add_rim_joists(&ctx, builder)?;
    opaque::add_frame_floors(&ctx, builder)?;
    foundation::add_foundation_walls_slabs(&ctx, builder)?;
    openings::add_windows(&mut ctx, builder)?;
    openings::add_doors(&mut ctx, builder)?;
    openings::add_skylights(&mut ctx, builder)?;
    info!(surfaces = builder.surfaces().len(), "surfaces added");

    let floor_area = cfa::infer_conditioned_floor_area(&mut ctx, builder)?;
    zones::check_zone_completeness(builder)?;
    zones::set_zone_volumes(builder, desc.building.conditioned_building_volume)?;
    info!(zones = builder.zones().len(), "zones complete");

    let explode = explode::explode_surfaces(builder, &desc.building.neighbors)?;
    Ok(EnvelopeSummary {
        levels: ctx.levels,
        default_azimuth: ctx.default_azimuth,
        floor_area,
        explode,
    })
}
