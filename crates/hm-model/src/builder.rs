//! Incremental model builder.

use crate::construction::{Construction, ConstructionSource};
use crate::error::{ModelError, ModelResult};
use crate::foundation::Foundation;
use crate::hvac::{Duct, Equipment, EquipmentKind, EquipmentMap};
use crate::model::BuildingModel;
use crate::shading::{Shading, ShadingKind};
use crate::subsurface::{InteriorShading, SubSurface, SubSurfaceKind};
use crate::surface::{BoundaryCondition, Layout, Surface, SurfaceType};
use crate::zone::ZoneRegistry;
use hm_constructions::Assembly;
use hm_core::{
    ConstructionId, EquipmentId, FoundationId, ShadingId, SubSurfaceId, SurfaceId, ZoneId,
};
use hm_geometry::Polygon;

/// Builder for one translation run.
///
/// Envelope and HVAC stages add objects and get back compact ids; `build()`
/// checks every cross reference and freezes the result into a `BuildingModel`.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    name: String,
    zones: ZoneRegistry,
    surfaces: Vec<Surface>,
    sub_surfaces: Vec<SubSurface>,
    shading: Vec<Shading>,
    foundations: Vec<Foundation>,
    constructions: Vec<Construction>,
    equipment: Vec<Equipment>,
    ducts: Vec<Duct>,
    equipment_map: EquipmentMap,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneRegistry {
        &mut self.zones
    }

    pub fn add_surface(
        &mut self,
        name: impl Into<String>,
        zone: ZoneId,
        surface_type: SurfaceType,
        boundary: BoundaryCondition,
        polygon: Polygon,
        layout: Option<Layout>,
    ) -> SurfaceId {
        let id = SurfaceId::from_index(self.surfaces.len() as u32);
        self.surfaces.push(Surface {
            id,
            name: name.into(),
            zone,
            surface_type,
            boundary,
            polygon,
            layout,
            construction: None,
            sub_surfaces: Vec::new(),
            exposed_perimeter: None,
        });
        id
    }

    /// Create the reciprocal of `surface` inside `zone` and link the pair.
    ///
    /// The copy has reversed vertices and the reciprocal surface type.
    pub fn add_paired_surface(&mut self, surface: SurfaceId, zone: ZoneId) -> ModelResult<SurfaceId> {
        let original = self.surface(surface)?;
        let name = format!("{} reversed", original.name);
        let surface_type = original.surface_type.reciprocal();
        let polygon = original.polygon.reversed();
        let layout = original.layout;
        let paired = self.add_surface(
            name,
            zone,
            surface_type,
            BoundaryCondition::Surface(surface),
            polygon,
            layout,
        );
        self.surface_mut(surface)?.boundary = BoundaryCondition::Surface(paired);
        Ok(paired)
    }

    pub fn add_sub_surface(
        &mut self,
        name: impl Into<String>,
        host: SurfaceId,
        kind: SubSurfaceKind,
        polygon: Polygon,
        interior_shading: Option<InteriorShading>,
    ) -> ModelResult<SubSurfaceId> {
        let id = SubSurfaceId::from_index(self.sub_surfaces.len() as u32);
        self.surface_mut(host)?.sub_surfaces.push(id);
        self.sub_surfaces.push(SubSurface {
            id,
            name: name.into(),
            host,
            kind,
            polygon,
            interior_shading,
            overhang: None,
        });
        Ok(id)
    }

    pub fn add_shading(
        &mut self,
        name: impl Into<String>,
        kind: ShadingKind,
        polygon: Polygon,
    ) -> ModelResult<ShadingId> {
        let id = ShadingId::from_index(self.shading.len() as u32);
        if let ShadingKind::Overhang { window, .. } = kind {
            let sub = self
                .sub_surfaces
                .get_mut(window.slot())
                .ok_or_else(|| dangling("sub-surface", window))?;
            sub.overhang = Some(id);
        }
        self.shading.push(Shading {
            id,
            name: name.into(),
            kind,
            polygon,
        });
        Ok(id)
    }

    /// Add a ground-coupling object with no insulation yet.
    pub fn add_foundation(
        &mut self,
        name: impl Into<String>,
        slab_id: impl Into<String>,
        wall_height_above_grade: f64,
    ) -> FoundationId {
        let id = FoundationId::from_index(self.foundations.len() as u32);
        self.foundations.push(Foundation {
            id,
            name: name.into(),
            slab_id: slab_id.into(),
            wall_height_above_grade,
            wall_depth_below_slab: 8.0 / 12.0,
            exterior_vertical: None,
            interior_vertical: None,
            interior_horizontal: None,
        });
        id
    }

    pub fn add_construction(
        &mut self,
        assembly: Assembly,
        source: ConstructionSource,
        realized_r: f64,
    ) -> ConstructionId {
        let id = ConstructionId::from_index(self.constructions.len() as u32);
        self.constructions.push(Construction {
            id,
            assembly,
            source,
            realized_r,
        });
        id
    }

    pub fn assign_construction(
        &mut self,
        surface: SurfaceId,
        construction: ConstructionId,
    ) -> ModelResult<()> {
        if construction.slot() >= self.constructions.len() {
            return Err(dangling("construction", construction));
        }
        self.surface_mut(surface)?.construction = Some(construction);
        Ok(())
    }

    /// Add an equipment record with no loads assigned and register it under
    /// `system_id` when given.
    pub fn add_equipment(
        &mut self,
        name: impl Into<String>,
        system_id: Option<&str>,
        kind: EquipmentKind,
    ) -> EquipmentId {
        let id = EquipmentId::from_index(self.equipment.len() as u32);
        if let Some(system_id) = system_id {
            self.equipment_map.push(system_id, id);
        }
        self.equipment.push(Equipment {
            id,
            name: name.into(),
            system_id: system_id.map(str::to_string),
            kind,
            heating: None,
            cooling: None,
            heating_capacity: None,
            cooling_capacity: None,
            backup: None,
            dse: 1.0,
            distribution: None,
            air_loop: None,
        });
        id
    }

    /// Record that `system_id` was processed even if it creates no equipment.
    pub fn register_system(&mut self, system_id: &str) {
        self.equipment_map.register(system_id);
    }

    pub fn add_duct(&mut self, duct: Duct) {
        self.ducts.push(duct);
    }

    pub fn set_zone_volume(&mut self, zone: ZoneId, volume: f64) -> ModelResult<()> {
        let z = self
            .zones
            .zone_mut(zone)
            .ok_or_else(|| dangling("zone", zone))?;
        z.volume = Some(volume);
        Ok(())
    }

    pub fn surface(&self, id: SurfaceId) -> ModelResult<&Surface> {
        self.surfaces
            .get(id.slot())
            .ok_or_else(|| dangling("surface", id))
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> ModelResult<&mut Surface> {
        self.surfaces
            .get_mut(id.slot())
            .ok_or_else(|| dangling("surface", id))
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn sub_surfaces(&self) -> &[SubSurface] {
        &self.sub_surfaces
    }

    pub fn shading(&self) -> &[Shading] {
        &self.shading
    }

    /// Mutable geometry for in-place layout passes.
    pub fn geometry_mut(&mut self) -> (&mut [Surface], &mut [SubSurface], &mut [Shading]) {
        (&mut self.surfaces, &mut self.sub_surfaces, &mut self.shading)
    }

    pub fn foundation(&self, id: FoundationId) -> ModelResult<&Foundation> {
        self.foundations
            .get(id.slot())
            .ok_or_else(|| dangling("foundation", id))
    }

    pub fn foundation_mut(&mut self, id: FoundationId) -> ModelResult<&mut Foundation> {
        self.foundations
            .get_mut(id.slot())
            .ok_or_else(|| dangling("foundation", id))
    }

    pub fn constructions(&self) -> &[Construction] {
        &self.constructions
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn equipment_mut(&mut self, id: EquipmentId) -> ModelResult<&mut Equipment> {
        self.equipment
            .get_mut(id.slot())
            .ok_or_else(|| dangling("equipment", id))
    }

    pub fn equipment_map(&self) -> &EquipmentMap {
        &self.equipment_map
    }

    /// Surfaces whose interior faces `zone`.
    pub fn surfaces_in(&self, zone: ZoneId) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter().filter(move |s| s.zone == zone)
    }

    /// Check cross references and freeze the model.
    pub fn build(self) -> ModelResult<BuildingModel> {
        for surface in &self.surfaces {
            if self.zones.zone(surface.zone).is_none() {
                return Err(dangling("zone", surface.zone));
            }
            if let Some(c) = surface.construction
                && c.slot() >= self.constructions.len()
            {
                return Err(dangling("construction", c));
            }
            match surface.boundary {
                BoundaryCondition::Surface(other) if other.slot() >= self.surfaces.len() => {
                    return Err(dangling("surface", other));
                }
                BoundaryCondition::Foundation(Some(f)) if f.slot() >= self.foundations.len() => {
                    return Err(dangling("foundation", f));
                }
                _ => {}
            }
        }
        for duct in &self.ducts {
            if self.zones.zone(duct.zone).is_none() {
                return Err(dangling("zone", duct.zone));
            }
        }

        Ok(BuildingModel {
            name: self.name,
            zones: self.zones.into_zones(),
            surfaces: self.surfaces,
            sub_surfaces: self.sub_surfaces,
            shading: self.shading,
            foundations: self.foundations,
            constructions: self.constructions,
            equipment: self.equipment,
            ducts: self.ducts,
            equipment_map: self.equipment_map,
        })
    }
}

fn dangling(what: &'static str, id: impl std::fmt::Display) -> ModelError {
    ModelError::Dangling {
        what,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_core::SpaceType;
    use hm_geometry::{Offsets, floor_polygon, wall_polygon};

    #[test]
    fn paired_surface_is_reversed_and_linked() {
        let mut b = ModelBuilder::new("test");
        let living = b.zones_mut().get_or_create(SpaceType::Living);
        let crawl = b.zones_mut().get_or_create(SpaceType::VentedCrawlspace);
        let floor = b.add_surface(
            "floor1",
            living,
            SurfaceType::Floor,
            BoundaryCondition::Outdoors,
            floor_polygon(10.0, 10.0, 0.0),
            None,
        );
        let pair = b.add_paired_surface(floor, crawl).unwrap();

        let s = b.surface(floor).unwrap();
        let p = b.surface(pair).unwrap();
        assert_eq!(s.adjacent(), Some(pair));
        assert_eq!(p.adjacent(), Some(floor));
        assert_eq!(p.surface_type, SurfaceType::RoofCeiling);
        assert_eq!(p.zone, crawl);
        assert!((s.polygon.normal().unwrap() + p.polygon.normal().unwrap()).norm() < 1e-12);
    }

    #[test]
    fn sub_surfaces_attach_to_host() {
        let mut b = ModelBuilder::new("test");
        let living = b.zones_mut().get_or_create(SpaceType::Living);
        let wall = b.add_surface(
            "wall1",
            living,
            SurfaceType::Wall,
            BoundaryCondition::Outdoors,
            wall_polygon(20.0, 8.0, 0.0, 180.0, Offsets::NONE),
            Some(Layout::vertical(180, 20.0)),
        );
        let win = b
            .add_sub_surface(
                "win1",
                wall,
                SubSurfaceKind::FixedWindow {
                    ufactor: 0.33,
                    shgc: 0.45,
                },
                wall_polygon(5.0, 4.0, 0.0, 180.0, Offsets::WINDOW),
                None,
            )
            .unwrap();
        let oh = b
            .add_shading(
                "win1 - overhangs",
                ShadingKind::Overhang {
                    window: win,
                    depth: 2.0,
                },
                floor_polygon(5.0, 2.0, 5.0),
            )
            .unwrap();
        assert_eq!(b.surface(wall).unwrap().sub_surfaces, vec![win]);
        assert_eq!(b.sub_surfaces()[win.slot()].overhang, Some(oh));
        let model = b.build().unwrap();
        assert_eq!(model.sub_surfaces.len(), 1);
    }

    #[test]
    fn dangling_construction_is_rejected() {
        let mut b = ModelBuilder::new("test");
        let living = b.zones_mut().get_or_create(SpaceType::Living);
        let floor = b.add_surface(
            "f",
            living,
            SurfaceType::Floor,
            BoundaryCondition::Adiabatic,
            floor_polygon(1.0, 1.0, 0.0),
            None,
        );
        let err = b
            .assign_construction(floor, ConstructionId::from_index(3))
            .unwrap_err();
        assert_eq!(err.kind(), hm_core::BuildErrorKind::Attachment);
    }

    #[test]
    fn equipment_registers_in_map() {
        let mut b = ModelBuilder::new("test");
        b.register_system("hp1");
        let e = b.add_equipment("hp1 heat pump", Some("hp1"), EquipmentKind::IdealLoads);
        let ideal = b.add_equipment("ideal", None, EquipmentKind::IdealLoads);
        assert_eq!(b.equipment_map().get("hp1"), Some(&[e][..]));
        assert_eq!(b.equipment_map().len(), 1);
        assert_eq!(b.equipment()[ideal.slot()].system_id, None);
    }
}
