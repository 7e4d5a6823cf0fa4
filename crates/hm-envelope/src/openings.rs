//! Windows, doors and skylights.
//!
//! Each opening gets its own adiabatic host surface sized just larger than
//! the opening, in the zone of the wall or roof it was declared on. The
//! declared wall keeps only its net area.

use crate::context::{AdiabaticKind, EnvelopeContext, interior_zone, positive};
use crate::error::{EnvelopeError, EnvelopeResult};
use hm_core::{SpaceType, SurfaceId};
use hm_geometry::{Offsets, overhang_polygon, roof_polygon, wall_polygon};
use hm_model::{
    BoundaryCondition, InteriorShading, Layout, ModelBuilder, ShadingKind, SubSurfaceKind,
    SurfaceType,
};
use tracing::debug;

/// Window height when no overhang fixes it (ft).
pub const WINDOW_HEIGHT: f64 = 4.0;
/// Door height (ft).
pub const DOOR_HEIGHT: f64 = 6.67;
/// Growth of a skylight host over the skylight (ft).
const SKYLIGHT_HOST_MARGIN: f64 = 0.001;

/// Interior location of the wall or foundation wall named `idref`.
fn host_location<'d>(
    ctx: &EnvelopeContext<'d>,
    idref: &str,
    kind: &'static str,
    id: &str,
) -> EnvelopeResult<&'d str> {
    let desc = ctx.desc;
    let enclosure = &desc.enclosure;
    enclosure
        .walls
        .iter()
        .find(|w| w.id == idref)
        .map(|w| w.interior_adjacent_to.as_str())
        .or_else(|| {
            enclosure
                .foundation_walls
                .iter()
                .find(|w| w.id == idref)
                .map(|w| w.interior_adjacent_to.as_str())
        })
        .ok_or_else(|| EnvelopeError::MissingHost {
            host: "wall",
            idref: idref.to_string(),
            kind,
            id: id.to_string(),
        })
}

/// Adiabatic vertical host for an opening of `width` by `height`.
fn add_wall_host(
    ctx: &mut EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
    id: &str,
    location: &str,
    width: f64,
    height: f64,
    azimuth: u32,
) -> EnvelopeResult<SurfaceId> {
    let (zone, _) = interior_zone(builder, id, location)?;
    let host = builder.add_surface(
        format!("surface {id}"),
        zone,
        SurfaceType::Wall,
        BoundaryCondition::Outdoors,
        wall_polygon(
            width,
            height,
            ctx.levels.foundation_top,
            f64::from(azimuth),
            Offsets::HOST,
        ),
        Some(Layout::vertical(azimuth, width)),
    );
    let construction = ctx.adiabatic(builder, AdiabaticKind::Wall);
    builder.assign_construction(host, construction)?;
    Ok(host)
}

pub fn add_windows(ctx: &mut EnvelopeContext<'_>, builder: &mut ModelBuilder) -> EnvelopeResult<()> {
    let desc = ctx.desc;
    for window in &desc.enclosure.windows {
        let location = host_location(ctx, &window.wall_idref, "window", &window.id)?;
        let height = match &window.overhangs {
            Some(o) => positive(
                "window height",
                o.distance_to_bottom_of_window - o.distance_to_top_of_window,
            )?,
            None => WINDOW_HEIGHT,
        };
        let width = window.area / height;
        let azimuth = f64::from(window.azimuth);

        let host = add_wall_host(
            ctx,
            builder,
            &window.id,
            location,
            width,
            height,
            window.azimuth,
        )?;
        let polygon = wall_polygon(
            width,
            height,
            ctx.levels.foundation_top,
            azimuth,
            Offsets::WINDOW,
        );
        let top = polygon.max_z();
        let sub = builder.add_sub_surface(
            &window.id,
            host,
            SubSurfaceKind::FixedWindow {
                ufactor: window.ufactor,
                shgc: window.shgc,
            },
            polygon,
            Some(InteriorShading {
                summer: window.interior_shading_factor_summer,
                winter: window.interior_shading_factor_winter,
            }),
        )?;

        if let Some(overhangs) = &window.overhangs {
            builder.add_shading(
                format!("{} - overhangs", window.id),
                ShadingKind::Overhang {
                    window: sub,
                    depth: overhangs.depth,
                },
                overhang_polygon(
                    width,
                    overhangs.depth,
                    top + overhangs.distance_to_top_of_window,
                    azimuth,
                ),
            )?;
        }
        debug!(id = %window.id, width, height, "added window");
    }
    Ok(())
}

pub fn add_doors(ctx: &mut EnvelopeContext<'_>, builder: &mut ModelBuilder) -> EnvelopeResult<()> {
    let desc = ctx.desc;
    for door in &desc.enclosure.doors {
        let location = host_location(ctx, &door.wall_idref, "door", &door.id)?;
        let width = door.area / DOOR_HEIGHT;
        let host = add_wall_host(
            ctx,
            builder,
            &door.id,
            location,
            width,
            DOOR_HEIGHT,
            door.azimuth,
        )?;
        builder.add_sub_surface(
            &door.id,
            host,
            SubSurfaceKind::Door {
                ufactor: 1.0 / positive("door R-value", door.r_value)?,
            },
            wall_polygon(
                width,
                DOOR_HEIGHT,
                ctx.levels.foundation_top,
                f64::from(door.azimuth),
                Offsets::NONE,
            ),
            None,
        )?;
    }
    Ok(())
}

pub fn add_skylights(
    ctx: &mut EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
) -> EnvelopeResult<()> {
    let desc = ctx.desc;
    for skylight in &desc.enclosure.skylights {
        let roof = desc
            .enclosure
            .roofs
            .iter()
            .find(|r| r.id == skylight.roof_idref)
            .ok_or_else(|| EnvelopeError::MissingHost {
                host: "roof",
                idref: skylight.roof_idref.clone(),
                kind: "skylight",
                id: skylight.id.clone(),
            })?;
        let tilt = roof.pitch / 12.0;
        let height = skylight.area.sqrt();
        let width = skylight.area / height;
        let z = ctx.levels.walls_top + 0.5 * tilt.atan().sin() * height;
        let azimuth = f64::from(skylight.azimuth);

        let zone = builder.zones_mut().get_or_create(SpaceType::Living);
        let host = builder.add_surface(
            format!("surface {}", skylight.id),
            zone,
            SurfaceType::RoofCeiling,
            BoundaryCondition::Outdoors,
            roof_polygon(
                width + SKYLIGHT_HOST_MARGIN,
                height + SKYLIGHT_HOST_MARGIN,
                z,
                azimuth,
                tilt,
            ),
            Some(Layout::pitched(skylight.azimuth, width, height, tilt)),
        );
        let construction = ctx.adiabatic(builder, AdiabaticKind::Roof);
        builder.assign_construction(host, construction)?;

        builder.add_sub_surface(
            &skylight.id,
            host,
            SubSurfaceKind::Skylight {
                ufactor: skylight.ufactor,
                shgc: skylight.shgc,
            },
            roof_polygon(width, height, z, azimuth, tilt),
            None,
        )?;
        debug!(id = %skylight.id, roof = %roof.id, "added skylight");
    }
    Ok(())
}
