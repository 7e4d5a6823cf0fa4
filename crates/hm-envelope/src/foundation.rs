//! Foundation walls and slabs, linked through shared Kiva foundation objects.
//!
//! Every slab gets one foundation object. Ground-contact walls of the same
//! foundation zone are split into one segment per slab, each segment's length
//! proportional to that slab's exposed perimeter, and every segment shares
//! its slab's object. Walls facing another space are modeled above grade only.

use crate::context::{
    EnvelopeContext, apply_target, boundary_for, drywall_in, exterior_adjacency, interior_zone,
    pair_exterior, positive,
};
use crate::error::EnvelopeResult;
use hm_constructions::materials::{concrete_r, gypsum_r};
use hm_constructions::{catalog, films, verify};
use hm_core::FoundationId;
use hm_geometry::{Offsets, floor_polygon, wall_polygon};
use hm_input::{FoundationWall, Slab, WallType};
use hm_model::{
    BoundaryCondition, ConstructionSource, InsulationBlock, Layout, ModelBuilder, SurfaceType,
};
use std::collections::HashMap;
use tracing::{debug, warn};

const GROUND: &str = "ground";

/// Solar absorptance and emittance of exposed foundation concrete.
const FOUNDATION_FINISH: (f64, f64) = (0.75, 0.9);

/// Rectangle reconstructed from a slab's area and exposed perimeter (ft).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabDimensions {
    pub length: f64,
    pub width: f64,
    /// Perimeter actually used; larger than the exposed perimeter when no
    /// rectangle of that perimeter can enclose the area.
    pub perimeter: f64,
    pub relaxed: bool,
}

/// Solve `2(l + w) = P`, `l·w = A` for the slab rectangle.
///
/// When `P² − 16A ≤ 0` the perimeter is raised to `√(16A)`, giving a square.
pub fn slab_dimensions(area: f64, exposed_perimeter: f64) -> SlabDimensions {
    let mut perimeter = exposed_perimeter;
    let mut relaxed = false;
    if perimeter.powi(2) - 16.0 * area <= 0.0 {
        perimeter = (16.0 * area).sqrt();
        relaxed = perimeter > exposed_perimeter;
    }
    let root = (perimeter.powi(2) - 16.0 * area).max(0.0).sqrt();
    SlabDimensions {
        length: perimeter / 4.0 + root / 4.0,
        width: perimeter / 4.0 - root / 4.0,
        perimeter,
        relaxed,
    }
}

/// Rigid insulation placed on the outside of a ground-contact wall.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WallInsulation {
    rigid_r: f64,
    rigid_height: f64,
    drywall_in: f64,
}

fn wall_insulation(wall: &FoundationWall, drywall_in: f64) -> WallInsulation {
    match wall.insulation.assembly_r_value {
        Some(target) => {
            let fixed = concrete_r(wall.thickness) + films::ground_wall();
            let mut drywall = drywall_in;
            let mut rigid_r = target - fixed - gypsum_r(drywall);
            if rigid_r < 0.0 {
                drywall = 0.0;
                rigid_r = target - fixed;
            }
            WallInsulation {
                rigid_r,
                rigid_height: wall.height,
                drywall_in: drywall,
            }
        }
        None => WallInsulation {
            rigid_r: wall.insulation.r_value,
            rigid_height: wall.insulation.distance_to_bottom,
            drywall_in,
        },
    }
}

pub fn add_foundation_walls_slabs(
    ctx: &EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
) -> EnvelopeResult<()> {
    let enclosure = &ctx.desc.enclosure;

    let mut foundation_types: Vec<&str> = Vec::new();
    for slab in &enclosure.slabs {
        if !foundation_types.contains(&slab.interior_adjacent_to.as_str()) {
            foundation_types.push(&slab.interior_adjacent_to);
        }
    }
    for wall in &enclosure.foundation_walls {
        if !foundation_types.contains(&wall.interior_adjacent_to.as_str()) {
            warn!(id = %wall.id, location = %wall.interior_adjacent_to, "foundation wall has no slab in its zone; skipped");
        }
    }

    for foundation_type in foundation_types {
        let walls: Vec<&FoundationWall> = enclosure
            .foundation_walls
            .iter()
            .filter(|w| w.interior_adjacent_to == foundation_type)
            .collect();
        let slabs: Vec<&Slab> = enclosure
            .slabs
            .iter()
            .filter(|s| s.interior_adjacent_to == foundation_type)
            .collect();

        let mut sum_wall_length = 0.0;
        for wall in walls.iter().filter(|w| w.exterior_adjacent_to == GROUND) {
            sum_wall_length += ctx.net_area(wall.area, &wall.id, "Wall")? / wall.height;
        }

        let mut kiva: HashMap<String, FoundationId> = HashMap::new();
        for wall in walls.iter().filter(|w| w.exterior_adjacent_to == GROUND) {
            add_ground_wall(ctx, builder, wall, &slabs, sum_wall_length, &mut kiva)?;
        }
        for slab in &slabs {
            add_slab(builder, slab, kiva.get(&slab.id).copied())?;
        }
        for wall in walls.iter().filter(|w| w.exterior_adjacent_to != GROUND) {
            add_interior_wall(ctx, builder, wall)?;
        }
    }
    Ok(())
}

fn add_ground_wall(
    ctx: &EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
    wall: &FoundationWall,
    slabs: &[&Slab],
    sum_wall_length: f64,
    kiva: &mut HashMap<String, FoundationId>,
) -> EnvelopeResult<()> {
    let net_area = ctx.net_area(wall.area, &wall.id, "Wall")?;
    let total_length = net_area / wall.height;
    let height_above_grade = wall.height - wall.depth_below_grade;
    let z = -wall.depth_below_grade;
    let azimuth = ctx.azimuth(wall.azimuth);

    let (zone, interior) = interior_zone(builder, &wall.id, &wall.interior_adjacent_to)?;
    let exterior = exterior_adjacency(builder, &wall.id, &wall.exterior_adjacent_to)?;
    let insulation = wall_insulation(wall, drywall_in(interior, exterior));

    for slab in slabs {
        let length = total_length * slab.exposed_perimeter / sum_wall_length;
        let name = if slabs.len() > 1 {
            format!("{}:{}", wall.id, slab.id)
        } else {
            wall.id.clone()
        };

        let foundation = match kiva.get(&slab.id) {
            Some(&existing) => existing,
            None => {
                let created = builder.add_foundation(
                    format!("{} foundation", slab.id),
                    &slab.id,
                    height_above_grade,
                );
                builder.foundation_mut(created)?.exterior_vertical =
                    InsulationBlock::new(insulation.rigid_r, insulation.rigid_height);
                kiva.insert(slab.id.clone(), created);
                created
            }
        };

        let surface = builder.add_surface(
            name,
            zone,
            SurfaceType::Wall,
            BoundaryCondition::Foundation(Some(foundation)),
            wall_polygon(length, wall.height, z, f64::from(azimuth), Offsets::NONE),
            Some(Layout::vertical(azimuth, length)),
        );

        let assembly = catalog::foundation_wall(
            format!("{} construction", wall.id),
            wall.thickness,
            insulation.drywall_in,
        );
        let exterior_r = builder.foundation(foundation)?.exterior_vertical_r();
        let realized = match wall.insulation.assembly_r_value {
            Some(target) => verify(&wall.id, &assembly, target, exterior_r)?,
            None => assembly.realized_r() + exterior_r,
        };
        let construction = builder.add_construction(assembly, ConstructionSource::Fixed, realized);
        builder.assign_construction(surface, construction)?;
        debug!(id = %wall.id, slab = %slab.id, length, "added foundation wall segment");
    }
    Ok(())
}

fn add_slab(
    builder: &mut ModelBuilder,
    slab: &Slab,
    existing: Option<FoundationId>,
) -> EnvelopeResult<()> {
    let dims = slab_dimensions(slab.area, slab.exposed_perimeter);
    if dims.relaxed {
        warn!(
            id = %slab.id,
            exposed_perimeter = slab.exposed_perimeter,
            perimeter = dims.perimeter,
            "slab perimeter cannot enclose its area; relaxed to a square"
        );
    }

    let (zone, _) = interior_zone(builder, &slab.id, &slab.interior_adjacent_to)?;

    let perimeter = InsulationBlock::new(
        slab.perimeter_insulation_r_value,
        slab.perimeter_insulation_depth,
    );
    let (whole_slab_r, under_slab) = if slab.under_slab_insulation_spans_entire_slab {
        (slab.under_slab_insulation_r_value, None)
    } else {
        let under = InsulationBlock::new(
            slab.under_slab_insulation_r_value,
            slab.under_slab_insulation_width,
        );
        (0.0, under)
    };
    let thickness_ft = slab.thickness / 12.0;

    let foundation = match existing {
        Some(foundation) => {
            if under_slab.is_some() {
                builder.foundation_mut(foundation)?.interior_horizontal = under_slab;
            }
            foundation
        }
        None => {
            let created =
                builder.add_foundation(format!("{} foundation", slab.id), &slab.id, thickness_ft);
            let object = builder.foundation_mut(created)?;
            object.interior_horizontal = under_slab;
            object.interior_vertical =
                under_slab.and_then(|u| InsulationBlock::new(u.r_value, thickness_ft));
            object.exterior_vertical = perimeter;
            created
        }
    };

    let surface = builder.add_surface(
        &slab.id,
        zone,
        SurfaceType::Floor,
        BoundaryCondition::Foundation(Some(foundation)),
        floor_polygon(dims.length, dims.width, -slab.depth_below_grade),
        None,
    );
    builder.surface_mut(surface)?.exposed_perimeter = Some(slab.exposed_perimeter);

    let assembly = catalog::slab(
        format!("{} construction", slab.id),
        slab.thickness,
        whole_slab_r,
        slab.carpet_fraction,
        slab.carpet_r_value,
    );
    let realized = assembly.realized_r();
    let construction = builder.add_construction(assembly, ConstructionSource::Fixed, realized);
    builder.assign_construction(surface, construction)?;
    debug!(id = %slab.id, length = dims.length, width = dims.width, "added slab");
    Ok(())
}

/// Above-grade portion of a foundation wall that faces another space.
fn add_interior_wall(
    ctx: &EnvelopeContext<'_>,
    builder: &mut ModelBuilder,
    wall: &FoundationWall,
) -> EnvelopeResult<()> {
    let height = positive(
        "above-grade foundation wall height",
        wall.height - wall.depth_below_grade,
    )?;
    let net_area = ctx.net_area(wall.area, &wall.id, "Wall")? * height / wall.height;
    let length = net_area / height;
    let azimuth = ctx.azimuth(wall.azimuth);

    let (zone, interior) = interior_zone(builder, &wall.id, &wall.interior_adjacent_to)?;
    let exterior = exterior_adjacency(builder, &wall.id, &wall.exterior_adjacent_to)?;
    let surface = builder.add_surface(
        &wall.id,
        zone,
        SurfaceType::Wall,
        boundary_for(exterior),
        wall_polygon(length, height, -height, f64::from(azimuth), Offsets::NONE),
        Some(Layout::vertical(azimuth, length)),
    );
    let mut surfaces = vec![surface];
    surfaces.extend(pair_exterior(builder, surface, exterior)?);

    let drywall = drywall_in(interior, exterior);
    let film_r = films::interior_wall();
    let target = wall.insulation.assembly_r_value.unwrap_or_else(|| {
        wall.insulation.r_value + concrete_r(wall.thickness) + gypsum_r(drywall) + film_r
    });
    apply_target(
        builder,
        &surfaces,
        &wall.id,
        target,
        &catalog::wall(WallType::SolidConcrete, drywall, None),
        film_r,
        Some(FOUNDATION_FINISH),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_perimeter_relaxes_to_square() {
        let dims = slab_dimensions(600.0, 10.0);
        assert!(dims.relaxed);
        assert!((dims.perimeter - 9600.0_f64.sqrt()).abs() < 1e-9);
        assert!((dims.length - 24.49).abs() < 0.01);
        assert!((dims.width - 24.49).abs() < 0.01);
        assert!((dims.length * dims.width - 600.0).abs() < 1e-6);
    }

    #[test]
    fn feasible_perimeter_is_kept() {
        let dims = slab_dimensions(1500.0, 160.0);
        assert!(!dims.relaxed);
        assert!((dims.length - 50.0).abs() < 1e-9);
        assert!((dims.width - 30.0).abs() < 1e-9);
        assert!((2.0 * (dims.length + dims.width) - 160.0).abs() < 1e-9);
    }

    fn basement_wall(assembly_r: Option<f64>) -> FoundationWall {
        FoundationWall {
            id: "fw".to_string(),
            exterior_adjacent_to: "ground".to_string(),
            interior_adjacent_to: "basement - conditioned".to_string(),
            height: 8.0,
            area: 1200.0,
            azimuth: None,
            thickness: 8.0,
            depth_below_grade: 7.0,
            insulation: hm_input::FoundationWallInsulation {
                assembly_r_value: assembly_r,
                r_value: 10.0,
                distance_to_bottom: 4.0,
            },
        }
    }

    #[test]
    fn assembly_target_becomes_exterior_rigid() {
        let ins = wall_insulation(&basement_wall(Some(10.69)), 0.5);
        let expected = 10.69 - 8.0 / 12.5 - 0.5 / 1.1112 - 0.68;
        assert!((ins.rigid_r - expected).abs() < 1e-9);
        assert_eq!(ins.rigid_height, 8.0);
        assert_eq!(ins.drywall_in, 0.5);
    }

    #[test]
    fn low_target_drops_drywall() {
        let target = 8.0 / 12.5 + 0.68 + 0.1;
        let ins = wall_insulation(&basement_wall(Some(target)), 0.5);
        assert_eq!(ins.drywall_in, 0.0);
        assert!((ins.rigid_r - 0.1).abs() < 1e-9);
    }

    #[test]
    fn explicit_insulation_keeps_its_depth() {
        let ins = wall_insulation(&basement_wall(None), 0.5);
        assert_eq!(ins.rigid_r, 10.0);
        assert_eq!(ins.rigid_height, 4.0);
    }
}
