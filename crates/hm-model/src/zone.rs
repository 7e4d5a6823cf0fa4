//! Canonical zones, created lazily on first reference.

use crate::error::{ModelError, ModelResult};
use hm_core::{Adjacency, SpaceType, ZoneId};
use serde::Serialize;

/// A thermal zone and its single space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub space_type: SpaceType,
    /// Set once envelope assembly has finished (ft³).
    pub volume: Option<f64>,
}

impl Zone {
    pub fn is_conditioned(&self) -> bool {
        self.space_type.is_conditioned()
    }
}

/// At most one zone per [`SpaceType`], in creation order.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, space_type: SpaceType) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|z| z.space_type == space_type)
            .map(|z| z.id)
    }

    /// Return the zone for `space_type`, creating it on first use.
    pub fn get_or_create(&mut self, space_type: SpaceType) -> ZoneId {
        if let Some(id) = self.get(space_type) {
            return id;
        }
        let id = ZoneId::from_index(self.zones.len() as u32);
        self.zones.push(Zone {
            id,
            name: space_type.location().to_string(),
            space_type,
            volume: None,
        });
        id
    }

    /// Map an interior location string for `surface_id` onto its zone.
    pub fn interior(&mut self, surface_id: &str, location: &str) -> ModelResult<ZoneId> {
        match Adjacency::from_location(location) {
            Some(Adjacency::Space(space_type)) => Ok(self.get_or_create(space_type)),
            Some(_) => Err(ModelError::NotInterior {
                id: surface_id.to_string(),
                value: location.to_string(),
            }),
            None => Err(ModelError::UnknownLocation {
                id: surface_id.to_string(),
                value: location.to_string(),
            }),
        }
    }

    /// Map an exterior location string; names of interior spaces create their zone.
    pub fn exterior(&mut self, surface_id: &str, location: &str) -> ModelResult<Adjacency> {
        let adjacency =
            Adjacency::from_location(location).ok_or_else(|| ModelError::UnknownLocation {
                id: surface_id.to_string(),
                value: location.to_string(),
            })?;
        if let Adjacency::Space(space_type) = adjacency {
            self.get_or_create(space_type);
        }
        Ok(adjacency)
    }

    /// Look up an existing zone by location without creating one.
    pub fn existing(&self, what: &str, location: &str) -> ModelResult<ZoneId> {
        let space_type =
            SpaceType::from_location(location).ok_or_else(|| ModelError::UnknownLocation {
                id: what.to_string(),
                value: location.to_string(),
            })?;
        self.get(space_type).ok_or_else(|| ModelError::MissingZone {
            what: what.to_string(),
            location: location.to_string(),
        })
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.slot())
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(id.slot())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }
}
