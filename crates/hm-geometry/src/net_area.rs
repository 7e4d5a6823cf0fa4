//! Gross-to-net area bookkeeping for surfaces that host windows, doors and
//! skylights.

use crate::error::{GeometryError, GeometryResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SubsurfaceAreas {
    by_host: HashMap<String, f64>,
}

impl SubsurfaceAreas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, host_id: &str, area: f64) {
        *self.by_host.entry(host_id.to_string()).or_insert(0.0) += area;
    }

    /// Total subsurface area attached to `host_id`.
    pub fn for_host(&self, host_id: &str) -> f64 {
        self.by_host.get(host_id).copied().unwrap_or(0.0)
    }

    pub fn net_area(
        &self,
        gross_area: f64,
        id: &str,
        surface_type: &'static str,
    ) -> GeometryResult<f64> {
        let net_area = gross_area - self.for_host(id);
        if net_area <= 0.0 {
            return Err(GeometryError::NonPositiveNetArea {
                id: id.to_string(),
                surface_type,
                net_area,
            });
        }
        Ok(net_area)
    }
}

impl<'a> FromIterator<(&'a str, f64)> for SubsurfaceAreas {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        let mut areas = Self::new();
        for (host, area) in iter {
            areas.add(host, area);
        }
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_every_subsurface_of_the_host() {
        let areas: SubsurfaceAreas = [("wall1", 20.0), ("wall1", 15.0), ("wall2", 5.0)]
            .into_iter()
            .collect();
        assert_eq!(areas.net_area(100.0, "wall1", "Wall").unwrap(), 65.0);
        assert_eq!(areas.net_area(100.0, "wall3", "Wall").unwrap(), 100.0);
    }

    #[test]
    fn zero_net_area_is_fatal() {
        let areas: SubsurfaceAreas = [("roof1", 40.0)].into_iter().collect();
        let err = areas.net_area(40.0, "roof1", "Roof").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NonPositiveNetArea { ref id, .. } if id == "roof1"
        ));
        assert_eq!(err.kind(), hm_core::BuildErrorKind::GeometryConstruction);
    }
}
