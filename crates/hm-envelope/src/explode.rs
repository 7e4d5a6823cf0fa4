//! Pushes exterior surfaces outward so they do not shade one another.
//!
//! Surfaces of the same azimuth are laid side by side, separated by [`GAP`],
//! on one face of a regular polygon. The polygon has as many sides as the
//! closest pair of azimuths requires (at least four) and its apothem is large
//! enough to fit the longest row. Neighbor buildings are placed outward from
//! the face of their azimuth.

use crate::error::{EnvelopeError, EnvelopeResult};
use hm_core::{ShadingId, SubSurfaceId, SurfaceId};
use hm_geometry::{Offsets, Vector3, shift, wall_polygon};
use hm_input::NeighborBuilding;
use hm_model::{ModelBuilder, ShadingKind, SubSurfaceKind, SurfaceType};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Spacing between surfaces sharing an azimuth (ft).
pub const GAP: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplodePlan {
    /// Row length per azimuth, gaps included (ft).
    pub azimuth_lengths: BTreeMap<u32, f64>,
    pub max_length: f64,
    pub sides: u32,
    /// Apothem of the layout polygon (ft).
    pub distance: f64,
}

/// A surface to move and everything that moves with it.
#[derive(Debug, Clone)]
struct Candidate {
    surface: SurfaceId,
    adjacent: Option<SurfaceId>,
    azimuth: u32,
    length: f64,
    /// Horizontal inset of pitched surfaces toward the building.
    inset: f64,
    sub_surfaces: Vec<SubSurfaceId>,
    overhangs: Vec<ShadingId>,
}

fn candidates(builder: &ModelBuilder) -> Vec<Candidate> {
    let mut surfaces: Vec<_> = builder
        .surfaces()
        .iter()
        .filter(|s| matches!(s.surface_type, SurfaceType::Wall | SurfaceType::RoofCeiling))
        .filter(|s| s.boundary.is_exterior())
        .filter_map(|s| s.layout.filter(|l| l.is_tilted()).map(|l| (s, l)))
        .collect();
    surfaces.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    let sub_surfaces = builder.sub_surfaces();
    surfaces
        .into_iter()
        .map(|(surface, layout)| {
            let inset = match (surface.surface_type, layout.pitch, layout.width) {
                (SurfaceType::RoofCeiling, Some(pitch), Some(width)) => {
                    0.5 * pitch.atan().cos() * width
                }
                _ => 0.0,
            };
            let overhangs = surface
                .sub_surfaces
                .iter()
                .filter_map(|id| sub_surfaces.get(id.slot()))
                .filter(|sub| matches!(sub.kind, SubSurfaceKind::FixedWindow { .. }))
                .filter_map(|sub| sub.overhang)
                .collect();
            Candidate {
                surface: surface.id,
                adjacent: surface.adjacent(),
                azimuth: layout.azimuth,
                length: layout.length,
                inset,
                sub_surfaces: surface.sub_surfaces.clone(),
                overhangs,
            }
        })
        .collect()
}

/// Smallest angular separation between consecutive distinct azimuths.
fn min_azimuth_diff(azimuths: &[u32]) -> f64 {
    let mut min = 360.0_f64;
    for (idx, &az) in azimuths.iter().enumerate() {
        let next = azimuths[(idx + 1) % azimuths.len()];
        let diff = f64::from(az.abs_diff(next));
        if diff == 0.0 {
            continue;
        }
        min = min.min(diff).min(360.0 - diff);
    }
    min
}

/// Layout for `azimuth_lengths`, or `None` when there is nothing to move.
pub fn plan(azimuth_lengths: BTreeMap<u32, f64>) -> Option<ExplodePlan> {
    let max_length = azimuth_lengths.values().copied().reduce(f64::max)?;
    let azimuths: Vec<u32> = azimuth_lengths.keys().copied().collect();
    let min_diff = min_azimuth_diff(&azimuths);
    let sides = ((360.0 / min_diff).ceil() as u32).max(4);
    let distance = max_length / (2.0 * (180.0 / f64::from(sides)).to_radians().tan());
    Some(ExplodePlan {
        azimuth_lengths,
        max_length,
        sides,
        distance,
    })
}

fn move_group(builder: &mut ModelBuilder, candidate: &Candidate, offset: &Vector3<f64>) {
    let (surfaces, sub_surfaces, shading) = builder.geometry_mut();
    for id in std::iter::once(candidate.surface).chain(candidate.adjacent) {
        if let Some(surface) = surfaces.get_mut(id.slot()) {
            surface.translate(offset);
        }
    }
    for id in &candidate.sub_surfaces {
        if let Some(sub) = sub_surfaces.get_mut(id.slot()) {
            sub.translate(offset);
        }
    }
    for id in &candidate.overhangs {
        if let Some(overhang) = shading.get_mut(id.slot()) {
            overhang.translate(offset);
        }
    }
}

fn add_neighbors(
    builder: &mut ModelBuilder,
    neighbors: &[NeighborBuilding],
    plan: Option<&ExplodePlan>,
) -> EnvelopeResult<()> {
    let height = builder
        .surfaces()
        .iter()
        .map(|s| s.polygon.max_z())
        .fold(f64::NEG_INFINITY, f64::max);
    for neighbor in neighbors {
        let plan = plan
            .filter(|p| p.azimuth_lengths.contains_key(&neighbor.azimuth))
            .ok_or(EnvelopeError::NeighborAzimuth {
                azimuth: neighbor.azimuth,
            })?;
        let azimuth = f64::from(neighbor.azimuth);
        let polygon = wall_polygon(plan.max_length, height, 0.0, azimuth, Offsets::NONE)
            .translated(&shift(neighbor.distance + plan.distance, azimuth));
        builder.add_shading(
            format!(
                "Neighbor azimuth {} distance {}",
                neighbor.azimuth, neighbor.distance
            ),
            ShadingKind::Neighbor {
                azimuth: neighbor.azimuth,
                distance: neighbor.distance,
            },
            polygon,
        )?;
    }
    Ok(())
}

/// Spread exterior surfaces apart and place the neighbor buildings.
pub fn explode_surfaces(
    builder: &mut ModelBuilder,
    neighbors: &[NeighborBuilding],
) -> EnvelopeResult<Option<ExplodePlan>> {
    let candidates = candidates(builder);
    let mut azimuth_lengths = BTreeMap::new();
    for c in &candidates {
        *azimuth_lengths.entry(c.azimuth).or_insert(0.0) += c.length + GAP;
    }
    let plan = plan(azimuth_lengths);
    add_neighbors(builder, neighbors, plan.as_ref())?;
    let Some(plan) = plan else {
        return Ok(None);
    };

    let mut side_shifts: BTreeMap<u32, f64> = plan
        .azimuth_lengths
        .keys()
        .map(|&az| (az, plan.max_length / 2.0))
        .collect();
    let mut moved: Vec<SurfaceId> = Vec::new();
    for candidate in &candidates {
        if candidate.adjacent.is_some_and(|a| moved.contains(&a)) {
            continue;
        }
        let azimuth = f64::from(candidate.azimuth);
        move_group(
            builder,
            candidate,
            &shift(plan.distance - candidate.inset, azimuth),
        );

        let side = side_shifts.entry(candidate.azimuth).or_insert(0.0);
        *side -= candidate.length / 2.0;
        move_group(builder, candidate, &shift(*side, azimuth + 90.0));
        *side -= candidate.length / 2.0 + GAP;

        moved.push(candidate.surface);
    }
    debug!(
        sides = plan.sides,
        distance = plan.distance,
        moved = moved.len(),
        "exploded surfaces"
    );
    Ok(Some(plan))
}
