//! Content-based hashing for build ids.

use hm_input::BuildingDescription;
use sha2::{Digest, Sha256};

/// Same description and translator version always give the same id.
pub fn compute_build_id(desc: &BuildingDescription, translator_version: &str) -> String {
    let mut hasher = Sha256::new();

    let desc_json = serde_json::to_string(desc).unwrap_or_default();
    hasher.update(desc_json.as_bytes());
    hasher.update(translator_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_input::{BuildingSummary, Enclosure, HvacSystems};

    fn description(name: &str, floor_area: f64) -> BuildingDescription {
        BuildingDescription {
            version: 1,
            name: name.to_string(),
            building: BuildingSummary {
                conditioned_floor_area: floor_area,
                conditioned_building_volume: floor_area * 8.0,
                number_of_conditioned_floors: 1,
                number_of_conditioned_floors_above_grade: 1,
                use_only_ideal_air_system: false,
                neighbors: Vec::new(),
            },
            enclosure: Enclosure::default(),
            hvac: HvacSystems::default(),
        }
    }

    #[test]
    fn hash_stability() {
        let desc = description("house", 1500.0);
        let id = compute_build_id(&desc, "0.1.0");
        assert_eq!(id, compute_build_id(&desc, "0.1.0"));
        assert_eq!(id.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = description("house", 1500.0);
        let b = description("house", 1600.0);
        assert_ne!(compute_build_id(&a, "0.1.0"), compute_build_id(&b, "0.1.0"));
        assert_ne!(compute_build_id(&a, "0.1.0"), compute_build_id(&a, "0.2.0"));
    }
}
