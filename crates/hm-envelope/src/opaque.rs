//! Roofs, above-grade walls, rim joists and frame floors.

use crate::context::{
    EnvelopeContext, apply_insulation, boundary_for, drywall_in, exterior_adjacency,
    interior_zone, pair_exterior, positive,
};
use crate::error::EnvelopeResult;
use hm_constructions::{ExteriorFinish, catalog, films};
use hm_core::Adjacency;
use hm_geometry::{
    Offsets, STOREY_HEIGHT, ceiling_polygon, floor_polygon, roof_polygon, wall_polygon,
};
use hm_model::{BoundaryCondition, Layout, ModelBuilder, SurfaceType};
use tracing::debug;

/// Rim joists are modeled one foot tall.
const RIM_JOIST_HEIGHT: f64 = 1.0;

pub fn add_roofs(ctx: &EnvelopeContext<'_>, builder: &mut ModelBuilder) -> EnvelopeResult<()> {
    for roof in &ctx.desc.enclosure.roofs {
        let net_area = ctx.net_area(roof.area, &roof.id, "Roof")?;
        let width = net_area.sqrt();
        let length = net_area / width;
        let tilt = roof.pitch / 12.0;
        let z = ctx.levels.walls_top + 0.5 * tilt.atan().sin() * width;
        let azimuth = ctx.azimuth(roof.azimuth);

        let (zone, interior) = interior_zone(builder, &roof.id, &roof.interior_adjacent_to)?;
        let surface = builder.add_surface(
            &roof.id,
            zone,
            SurfaceType::RoofCeiling,
            BoundaryCondition::Outdoors,
            roof_polygon(length, width, z, f64::from(azimuth), tilt),
            Some(Layout::pitched(azimuth, length, width, tilt)),
        );

        let drywall = drywall_in(interior, Adjacency::Outside);
        apply_insulation(
            builder,
            &[surface],
            &roof.id,
            &roof.insulation,
            &catalog::roof(drywall),
            films::roof_assembly(roof.pitch),
            Some((roof.solar_absorptance, roof.emittance)),
        )?;
        debug!(id = %roof.id, net_area, azimuth, "added roof");
    }
    Ok(())
}

/// Film and exterior finish for a vertical surface.
fn vertical_films(exterior: Adjacency) -> (f64, Option<ExteriorFinish>) {
    if exterior == Adjacency::Outside {
        (films::exterior_wall(), Some(ExteriorFinish::WoodSiding))
    } else {
        (films::interior_wall(), None)
    }
}

pub fn add_walls(ctx: &EnvelopeContext<'_>, builder: &mut ModelBuilder) -> EnvelopeResult<()> {
    let height = positive(
        "above-grade wall height",
        STOREY_HEIGHT * f64::from(ctx.floors_above_grade()),
    )?;
    for wall in &ctx.desc.enclosure.walls {
        let net_area = ctx.net_area(wall.area, &wall.id, "Wall")?;
        let length = net_area / height;
        let azimuth = ctx.azimuth(wall.azimuth);

        let (zone, interior) = interior_zone(builder, &wall.id, &wall.interior_adjacent_to)?;
        let exterior = exterior_adjacency(builder, &wall.id, &wall.exterior_adjacent_to)?;
        let surface = builder.add_surface(
            &wall.id,
            zone,
            SurfaceType::Wall,
            boundary_for(exterior),
            wall_polygon(
                length,
                height,
                ctx.levels.foundation_top,
                f64::from(azimuth),
                Offsets::NONE,
            ),
            Some(Layout::vertical(azimuth, length)),
        );
        let mut surfaces = vec![surface];
        surfaces.extend(pair_exterior(builder, surface, exterior)?);

        let (film_r, finish) = vertical_films(exterior);
        let templates = catalog::wall(wall.wall_type, drywall_in(interior, exterior), finish);
        apply_insulation(
            builder,
            &surfaces,
            &wall.id,
            &wall.insulation,
            &templates,
            film_r,
            Some((wall.solar_absorptance, wall.emittance)),
        )?;
        debug!(id = %wall.id, net_area, azimuth, "added wall");
    }
    Ok(())
}

pub fn add_rim_joists(ctx: &EnvelopeContext<'_>, builder: &mut ModelBuilder) -> EnvelopeResult<()> {
    for rim in &ctx.desc.enclosure.rim_joists {
        let length = rim.area / RIM_JOIST_HEIGHT;
        let azimuth = ctx.azimuth(rim.azimuth);

        let (zone, interior) = interior_zone(builder, &rim.id, &rim.interior_adjacent_to)?;
        let exterior = exterior_adjacency(builder, &rim.id, &rim.exterior_adjacent_to)?;
        let surface = builder.add_surface(
            &rim.id,
            zone,
            SurfaceType::Wall,
            boundary_for(exterior),
            wall_polygon(
                length,
                RIM_JOIST_HEIGHT,
                ctx.levels.foundation_top,
                f64::from(azimuth),
                Offsets::NONE,
            ),
            Some(Layout::vertical(azimuth, length)),
        );
        let mut surfaces = vec![surface];
        surfaces.extend(pair_exterior(builder, surface, exterior)?);

        let (film_r, finish) = vertical_films(exterior);
        apply_insulation(
            builder,
            &surfaces,
            &rim.id,
            &rim.insulation,
            &catalog::rim_joist(drywall_in(interior, exterior), finish),
            film_r,
            Some((rim.solar_absorptance, rim.emittance)),
        )?;
    }
    Ok(())
}

/// Frame floors sit at the top of the walls when an attic is on either side
/// and face up when the attic is above.
pub fn add_frame_floors(
    ctx: &EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
) -> EnvelopeResult<()> {
    for floor in &ctx.desc.enclosure.frame_floors {
        let width = floor.area.sqrt();
        let length = floor.area / width;

        let (zone, interior) = interior_zone(builder, &floor.id, &floor.interior_adjacent_to)?;
        let exterior = exterior_adjacency(builder, &floor.id, &floor.exterior_adjacent_to)?;
        let z = if interior.is_attic() || exterior.is_attic() {
            ctx.levels.walls_top
        } else {
            ctx.levels.foundation_top
        };
        let (surface_type, polygon) = if exterior.is_attic() {
            (SurfaceType::RoofCeiling, ceiling_polygon(length, width, z))
        } else {
            (SurfaceType::Floor, floor_polygon(length, width, z))
        };
        let surface = builder.add_surface(
            &floor.id,
            zone,
            surface_type,
            boundary_for(exterior),
            polygon,
            None,
        );
        let mut surfaces = vec![surface];
        surfaces.extend(pair_exterior(builder, surface, exterior)?);

        apply_insulation(
            builder,
            &surfaces,
            &floor.id,
            &floor.insulation,
            &catalog::frame_floor(),
            films::frame_floor(),
            None,
        )?;
    }
    Ok(())
}
