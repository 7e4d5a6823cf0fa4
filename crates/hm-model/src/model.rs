//! The frozen model handed to the simulation engine.

use crate::construction::Construction;
use crate::foundation::Foundation;
use crate::hvac::{Duct, Equipment, EquipmentMap};
use crate::shading::Shading;
use crate::subsurface::SubSurface;
use crate::surface::{Surface, SurfaceType};
use crate::zone::Zone;
use hm_core::{SpaceType, ZoneId};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BuildingModel {
    pub name: String,
    pub zones: Vec<Zone>,
    pub surfaces: Vec<Surface>,
    pub sub_surfaces: Vec<SubSurface>,
    pub shading: Vec<Shading>,
    pub foundations: Vec<Foundation>,
    pub constructions: Vec<Construction>,
    pub equipment: Vec<Equipment>,
    pub ducts: Vec<Duct>,
    pub equipment_map: EquipmentMap,
}

impl BuildingModel {
    pub fn zone(&self, space_type: SpaceType) -> Option<&Zone> {
        self.zones.iter().find(|z| z.space_type == space_type)
    }

    pub fn surfaces_in(&self, zone: ZoneId) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter().filter(move |s| s.zone == zone)
    }

    pub fn surface_named(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    pub fn construction_of(&self, surface: &Surface) -> Option<&Construction> {
        surface
            .construction
            .and_then(|c| self.constructions.get(c.slot()))
    }

    /// Equipment created for an input system id.
    pub fn equipment_for(&self, system_id: &str) -> Vec<&Equipment> {
        self.equipment_map
            .get(system_id)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.equipment.get(id.slot()))
            .collect()
    }

    /// Floor area of conditioned zones (ft²).
    pub fn conditioned_floor_area(&self) -> f64 {
        self.zones
            .iter()
            .filter(|z| z.is_conditioned())
            .flat_map(|z| self.surfaces_in(z.id))
            .filter(|s| s.surface_type == SurfaceType::Floor)
            .map(Surface::area)
            .sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.zones.iter().filter_map(|z| z.volume).sum()
    }
}
