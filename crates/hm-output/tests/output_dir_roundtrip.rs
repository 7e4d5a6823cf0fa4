use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use hm_hvac::ResidualPolicy;
use hm_model::{BuildingModel, ModelBuilder};
use hm_output::{BuildManifest, OutputDir, compute_build_id};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn ranch() -> (hm_input::BuildingDescription, BuildingModel) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/01_slab_ranch.yaml");
    let desc = hm_input::load_yaml(&path).expect("failed to load demo");
    let mut builder = ModelBuilder::new(&desc.name);
    hm_envelope::assemble(&desc, &mut builder).expect("envelope failed");
    hm_hvac::allocate(&desc, &mut builder, ResidualPolicy::Default).expect("hvac failed");
    let model = builder.build().expect("model failed");
    (desc, model)
}

#[test]
fn save_and_load_build() {
    let (desc, model) = ranch();
    let out = OutputDir::new(unique_temp_dir("hm_output_build")).expect("failed to create dir");
    assert!(!out.has_build());

    let build_id = compute_build_id(&desc, "0.1.0");
    let manifest = BuildManifest::new(build_id.clone(), &model, "0.1.0", Some("weather".into()));
    out.save_build(&manifest, &model).expect("failed to save build");
    assert!(out.has_build());

    let loaded = out.load_manifest().expect("failed to load manifest");
    assert_eq!(loaded, manifest);
    assert_eq!(loaded.build_id, build_id);
    assert!(chrono::DateTime::parse_from_rfc3339(&loaded.timestamp).is_ok());
    assert_eq!(loaded.summary.equipment, 2);
    // 1500 ft2 of conditioned slab
    assert!((loaded.summary.conditioned_floor_area_m2 - 139.354_56).abs() < 1e-3);
    assert_eq!(loaded.summary.construction_rsi.len(), model.constructions.len());
    for (rsi, construction) in loaded.summary.construction_rsi.iter().zip(&model.constructions) {
        assert_eq!(rsi.name, construction.name());
        assert!((rsi.rsi - construction.realized_r * 0.176_110_2).abs() < 1e-4);
    }

    let model_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("model.json")).expect("missing model.json"),
    )
    .expect("model.json is not JSON");
    assert_eq!(model_json["model"]["name"], desc.name.as_str());
    assert_eq!(model_json["summary"]["zones"], model.zones.len());

    let map = out.load_hvac_map().expect("failed to load map");
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(
        rows,
        [
            "System ID\tEquipment Name(s)",
            "central_ac\tcentral_ac central air conditioner",
            "furnace\tfurnace furnace",
        ]
    );
}

#[test]
fn missing_build_is_reported() {
    let out = OutputDir::new(unique_temp_dir("hm_output_empty")).expect("failed to create dir");
    assert!(out.load_manifest().is_err());
    assert!(out.load_hvac_map().is_err());
}
