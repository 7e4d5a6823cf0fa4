use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use hm_app::{
    AppError, TranslateOptions, list_constructions, list_equipment, list_zones, load_description,
    translate, translate_file,
};
use hm_core::BuildErrorKind;
use hm_hvac::ResidualPolicy;
use hm_input::NeighborBuilding;

fn demo_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn translate_with_exports() {
    let out = unique_temp_dir("hm_app_translate");
    let options = TranslateOptions {
        output_dir: Some(out.clone()),
        weather_dir: Some(PathBuf::from("weather")),
        ..TranslateOptions::default()
    };

    let translation =
        translate_file(&demo_path("01_slab_ranch.yaml"), &options).expect("translate failed");
    let manifest = translation.manifest.expect("manifest expected");
    assert_eq!(manifest.weather_dir.as_deref(), Some("weather"));
    assert_eq!(manifest.summary.equipment, translation.model.equipment.len());

    for file in ["manifest.json", "model.json", "map_hvac.tsv"] {
        assert!(out.join(file).exists(), "{file} missing");
    }
}

#[test]
fn no_exports_without_output_dir() {
    let translation = translate_file(
        &demo_path("02_basement_two_story.yaml"),
        &TranslateOptions::default(),
    )
    .expect("translate failed");
    assert!(translation.manifest.is_none());
    assert_eq!(translation.envelope.floor_area.basement_ceiling, 1200.0);
    assert_eq!(translation.allocation.ducts, 2);
}

#[test]
fn service_listings() {
    let translation = translate_file(
        &demo_path("02_basement_two_story.yaml"),
        &TranslateOptions::default(),
    )
    .expect("translate failed");
    let model = &translation.model;

    let zones = list_zones(model);
    assert_eq!(zones.len(), model.zones.len());
    assert!(zones.iter().any(|z| z.location == "basement - conditioned" && z.conditioned));
    assert!(zones.iter().all(|z| z.volume.is_some_and(|v| v > 0.0)));

    let constructions = list_constructions(model);
    assert!(!constructions.is_empty());
    assert!(constructions.len() <= model.surfaces.len());
    assert!(constructions.iter().all(|c| c.realized_r > 0.0));

    let equipment = list_equipment(model);
    let names: Vec<&str> = equipment.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["boiler boiler", "heat_pump air source heat pump"]);
}

#[test]
fn invalid_description_fails_up_front() {
    let mut desc = load_description(&demo_path("01_slab_ranch.yaml")).unwrap();
    desc.enclosure.windows[0].wall_idref = "nope".to_string();

    let err = translate(&desc, &TranslateOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::Validation(ref errors) if !errors.is_empty()));
    assert_eq!(err.kind(), Some(BuildErrorKind::StructuralValidation));
}

#[test]
fn skipped_validation_runs_after_failure() {
    let mut desc = load_description(&demo_path("01_slab_ranch.yaml")).unwrap();
    desc.enclosure.windows[0].wall_idref = "nope".to_string();
    let options = TranslateOptions {
        skip_validation: true,
        ..TranslateOptions::default()
    };

    match translate(&desc, &options).unwrap_err() {
        AppError::BuildInvalid {
            kind, validation, ..
        } => {
            assert_eq!(kind, BuildErrorKind::Attachment);
            assert!(validation.iter().any(|m| m.contains("nope")));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn valid_description_keeps_the_build_error() {
    let mut desc = load_description(&demo_path("01_slab_ranch.yaml")).unwrap();
    desc.building.neighbors.push(NeighborBuilding {
        azimuth: 45,
        distance: 10.0,
    });
    let options = TranslateOptions {
        skip_validation: true,
        ..TranslateOptions::default()
    };

    let err = translate(&desc, &options).unwrap_err();
    assert!(matches!(err, AppError::Build { .. }));
    assert_eq!(err.kind(), Some(BuildErrorKind::GeometryConstruction));
}

#[test]
fn residual_policy_is_passed_through() {
    let mut desc = load_description(&demo_path("01_slab_ranch.yaml")).unwrap();
    desc.hvac.cooling_systems.clear();
    let options = TranslateOptions {
        residual_policy: ResidualPolicy::CoverAll,
        ..TranslateOptions::default()
    };

    let translation = translate(&desc, &options).unwrap();
    assert!(translation.allocation.residual.is_some());
}

#[test]
fn missing_input_file() {
    let err = load_description(&demo_path("missing.yaml")).unwrap_err();
    assert!(matches!(err, AppError::InputFileRead { .. }));
}
