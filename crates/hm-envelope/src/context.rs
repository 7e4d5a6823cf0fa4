//! Per-build state shared by the envelope stages.

use crate::error::{EnvelopeError, EnvelopeResult};
use hm_constructions::{
    ConstructionTemplate, catalog, films, instantiate_layered, resolve, verify,
};
use hm_core::{
    Adjacency, ConstructionId, SpaceType, SurfaceId, ZoneId, ensure_finite, is_thermal_boundary,
};
use hm_geometry::{GeometryError, Levels, SubsurfaceAreas};
use hm_input::{BuildingDescription, Insulation, InsulationSpec};
use hm_model::{BoundaryCondition, ConstructionSource, ModelBuilder, ModelError};

/// Drywall on the conditioned side of a thermal boundary (in).
const BOUNDARY_DRYWALL_IN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdiabaticKind {
    Wall,
    Floor,
    Roof,
}

pub struct EnvelopeContext<'a> {
    pub desc: &'a BuildingDescription,
    pub levels: Levels,
    pub default_azimuth: u32,
    /// Window, door and skylight area keyed by host id.
    pub openings: SubsurfaceAreas,
    adiabatic: [Option<ConstructionId>; 3],
}

impl<'a> EnvelopeContext<'a> {
    pub fn new(desc: &'a BuildingDescription) -> Self {
        let enclosure = &desc.enclosure;
        let levels = Levels::new(
            enclosure
                .foundation_walls
                .iter()
                .map(|w| (w.height, w.depth_below_grade)),
            desc.building.number_of_conditioned_floors_above_grade,
        );
        let openings = enclosure
            .windows
            .iter()
            .map(|w| (w.wall_idref.as_str(), w.area))
            .chain(enclosure.doors.iter().map(|d| (d.wall_idref.as_str(), d.area)))
            .chain(
                enclosure
                    .skylights
                    .iter()
                    .map(|s| (s.roof_idref.as_str(), s.area)),
            )
            .collect();
        Self {
            desc,
            levels,
            default_azimuth: enclosure.default_azimuth(),
            openings,
            adiabatic: [None; 3],
        }
    }

    pub fn floors_above_grade(&self) -> u32 {
        self.desc.building.number_of_conditioned_floors_above_grade
    }

    pub fn azimuth(&self, declared: Option<u32>) -> u32 {
        declared.unwrap_or(self.default_azimuth)
    }

    pub fn net_area(&self, gross: f64, id: &str, surface_type: &'static str) -> EnvelopeResult<f64> {
        Ok(self.openings.net_area(gross, id, surface_type)?)
    }

    /// Shared construction for adiabatic and host surfaces, created on first use.
    pub fn adiabatic(&mut self, builder: &mut ModelBuilder, kind: AdiabaticKind) -> ConstructionId {
        let slot = &mut self.adiabatic[kind as usize];
        if let Some(id) = *slot {
            return id;
        }
        let assembly = match kind {
            AdiabaticKind::Wall => catalog::adiabatic_wall(films::exterior_wall()),
            AdiabaticKind::Floor => catalog::adiabatic_floor(films::frame_floor()),
            AdiabaticKind::Roof => catalog::adiabatic_roof(films::roof_assembly(0.0)),
        };
        let realized = assembly.realized_r();
        let id = builder.add_construction(assembly, ConstructionSource::Fixed, realized);
        *slot = Some(id);
        id
    }
}

/// Zone for an interior location, created on first use.
pub(crate) fn interior_zone(
    builder: &mut ModelBuilder,
    id: &str,
    location: &str,
) -> EnvelopeResult<(ZoneId, SpaceType)> {
    let zone = builder.zones_mut().interior(id, location)?;
    let space_type = builder
        .zones()
        .zone(zone)
        .map(|z| z.space_type)
        .ok_or_else(|| ModelError::Dangling {
            what: "zone",
            id: zone.to_string(),
        })?;
    Ok((zone, space_type))
}

pub(crate) fn exterior_adjacency(
    builder: &mut ModelBuilder,
    id: &str,
    location: &str,
) -> EnvelopeResult<Adjacency> {
    Ok(builder.zones_mut().exterior(id, location)?)
}

/// Boundary condition before any pairing. Surfaces facing another space are
/// re-linked by [`pair_exterior`].
pub(crate) fn boundary_for(exterior: Adjacency) -> BoundaryCondition {
    match exterior {
        Adjacency::Outside => BoundaryCondition::Outdoors,
        Adjacency::Ground => BoundaryCondition::Foundation(None),
        Adjacency::OtherHousingUnit | Adjacency::Space(_) => BoundaryCondition::Adiabatic,
    }
}

/// Create the reciprocal surface when the exterior side is another space.
pub(crate) fn pair_exterior(
    builder: &mut ModelBuilder,
    surface: SurfaceId,
    exterior: Adjacency,
) -> EnvelopeResult<Option<SurfaceId>> {
    let Adjacency::Space(space_type) = exterior else {
        return Ok(None);
    };
    let zone = builder.zones_mut().get_or_create(space_type);
    Ok(Some(builder.add_paired_surface(surface, zone)?))
}

pub(crate) fn drywall_in(interior: SpaceType, exterior: Adjacency) -> f64 {
    if is_thermal_boundary(interior, exterior) {
        BOUNDARY_DRYWALL_IN
    } else {
        0.0
    }
}

pub(crate) fn positive(what: &'static str, value: f64) -> EnvelopeResult<f64> {
    let value = ensure_finite(value, what).map_err(GeometryError::from)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDimension { what, value }.into())
    }
}

/// Solar absorptance and emittance of the outside face.
pub(crate) type Finish = Option<(f64, f64)>;

/// Build the construction for `id` from its insulation and assign it to
/// every surface in `surfaces`.
pub(crate) fn apply_insulation(
    builder: &mut ModelBuilder,
    surfaces: &[SurfaceId],
    id: &str,
    insulation: &Insulation,
    catalog: &[ConstructionTemplate],
    film_r: f64,
    finish: Finish,
) -> EnvelopeResult<ConstructionId> {
    match insulation.spec() {
        Some(InsulationSpec::Assembly(target)) => {
            apply_target(builder, surfaces, id, target, catalog, film_r, finish)
        }
        Some(InsulationSpec::Layered(layers)) => {
            let primary = catalog.first().ok_or_else(|| EnvelopeError::AmbiguousInsulation {
                id: id.to_string(),
            })?;
            let name = format!("{id} construction");
            let mut assembly = instantiate_layered(id, &name, primary, &layers, film_r)?;
            if let Some((solar, emittance)) = finish {
                assembly = assembly.with_surface(solar, emittance);
            }
            let realized = assembly.realized_r();
            let construction =
                builder.add_construction(assembly, ConstructionSource::Layered, realized);
            assign(builder, surfaces, construction)?;
            Ok(construction)
        }
        None => Err(EnvelopeError::AmbiguousInsulation { id: id.to_string() }),
    }
}

/// Resolve `target` against `catalog`, verify the realized R-value and assign it.
pub(crate) fn apply_target(
    builder: &mut ModelBuilder,
    surfaces: &[SurfaceId],
    id: &str,
    target: f64,
    catalog: &[ConstructionTemplate],
    film_r: f64,
    finish: Finish,
) -> EnvelopeResult<ConstructionId> {
    let name = format!("{id} construction");
    let resolved = resolve(id, &name, target, film_r, catalog)?;
    let mut assembly = resolved.assembly;
    if let Some((solar, emittance)) = finish {
        assembly = assembly.with_surface(solar, emittance);
    }
    let realized = verify(id, &assembly, target, 0.0)?;
    let construction = builder.add_construction(
        assembly,
        ConstructionSource::Resolved {
            index: resolved.index,
            target,
        },
        realized,
    );
    assign(builder, surfaces, construction)?;
    Ok(construction)
}

pub(crate) fn assign(
    builder: &mut ModelBuilder,
    surfaces: &[SurfaceId],
    construction: ConstructionId,
) -> EnvelopeResult<()> {
    for &surface in surfaces {
        builder.assign_construction(surface, construction)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drywall_only_on_thermal_boundaries() {
        assert_eq!(drywall_in(SpaceType::Living, Adjacency::Outside), 0.5);
        assert_eq!(drywall_in(SpaceType::VentedAttic, Adjacency::Outside), 0.0);
        assert_eq!(drywall_in(SpaceType::Living, Adjacency::OtherHousingUnit), 0.0);
        assert_eq!(
            drywall_in(SpaceType::Garage, Adjacency::Space(SpaceType::Living)),
            0.5
        );
    }

    #[test]
    fn boundary_mapping() {
        assert_eq!(boundary_for(Adjacency::Outside), BoundaryCondition::Outdoors);
        assert_eq!(
            boundary_for(Adjacency::Ground),
            BoundaryCondition::Foundation(None)
        );
        assert_eq!(
            boundary_for(Adjacency::OtherHousingUnit),
            BoundaryCondition::Adiabatic
        );
    }

    #[test]
    fn non_positive_dimensions_are_geometry_errors() {
        assert_eq!(positive("height", 8.0).unwrap(), 8.0);
        let err = positive("height", 0.0).unwrap_err();
        assert_eq!(err.kind(), hm_core::BuildErrorKind::GeometryConstruction);
        assert!(positive("height", f64::INFINITY).is_err());

        let err = positive("door R-value", f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Geometry(GeometryError::Numeric(hm_core::HmError::NonFinite {
                what: "door R-value",
                ..
            }))
        ));
        assert_eq!(err.kind(), hm_core::BuildErrorKind::GeometryConstruction);
    }
}
