use hm_core::BuildErrorKind;
use hm_hvac::{IDEAL_AIR_NAME, ResidualPolicy, allocate};
use hm_input::{BuildingDescription, DistributionKind, DuctSide};
use hm_model::{Capacity, Equipment, EquipmentKind, ModelBuilder, Speeds};
use std::path::Path;

fn demo(name: &str) -> BuildingDescription {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name);
    hm_input::load_yaml(&path).unwrap()
}

fn envelope(desc: &BuildingDescription) -> ModelBuilder {
    let mut builder = ModelBuilder::new(&desc.name);
    hm_envelope::assemble(desc, &mut builder).unwrap();
    builder
}

fn by_system<'a>(builder: &'a ModelBuilder, system: &str) -> &'a Equipment {
    let ids = builder.equipment_map().get(system).unwrap();
    &builder.equipment()[ids[0].slot()]
}

#[test]
fn furnace_shares_the_air_conditioner_loop() {
    let desc = demo("01_slab_ranch.yaml");
    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    assert_eq!(summary.residual, None);
    assert_eq!(summary.ducts, 2);

    let ac = by_system(&builder, "central_ac");
    let furnace = by_system(&builder, "furnace");
    assert_eq!(ac.name, "central_ac central air conditioner");
    assert_eq!(ac.air_loop.as_deref(), Some("central_ac air loop"));
    assert_eq!(furnace.air_loop, ac.air_loop);
    match furnace.kind {
        EquipmentKind::Furnace { attached_to, .. } => assert_eq!(attached_to, Some(ac.id)),
        ref other => panic!("unexpected {other:?}"),
    }
    assert_eq!(furnace.heating_capacity, Some(Capacity::Btuh(64000.0)));

    let order: Vec<&str> = builder.equipment_map().iter().map(|(id, _)| id).collect();
    assert_eq!(order, ["central_ac", "furnace"]);
}

#[test]
fn duct_leakage_split_by_area() {
    let desc = demo("01_slab_ranch.yaml");
    let mut builder = envelope(&desc);
    allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    let model = builder.build().unwrap();
    let supply = model
        .ducts
        .iter()
        .find(|d| d.side == DuctSide::Supply)
        .unwrap();
    assert_eq!(supply.leakage_cfm25, 75.0);
    assert_eq!(supply.air_loop.as_deref(), Some("central_ac air loop"));
}

#[test]
fn heat_pump_takes_what_the_boiler_leaves() {
    let desc = demo("02_basement_two_story.yaml");
    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    assert_eq!(summary.residual, None);

    let boiler = by_system(&builder, "boiler");
    assert_eq!(boiler.heating.unwrap().sequential, 0.4);
    assert_eq!(boiler.air_loop, None);

    let hp = by_system(&builder, "heat_pump");
    assert!((hp.heating.unwrap().sequential - 1.0).abs() < 1e-9);
    assert_eq!(hp.cooling.unwrap().sequential, 1.0);
    assert_eq!(hp.cooling_capacity, Some(Capacity::Btuh(36000.0)));
    assert_eq!(hp.backup.unwrap().capacity, Capacity::Autosize);
    match hp.kind {
        EquipmentKind::AirToAirHeatPump {
            speeds,
            fan_power_w_per_cfm,
            ..
        } => {
            assert_eq!(speeds, Speeds::One);
            assert_eq!(fan_power_w_per_cfm, 0.365);
        }
        ref other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn conditioned_duct_runs_are_not_modeled() {
    let desc = demo("02_basement_two_story.yaml");
    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    assert_eq!(summary.ducts, 2);

    let model = builder.build().unwrap();
    let leakage: Vec<(DuctSide, f64)> = model
        .ducts
        .iter()
        .map(|d| (d.side, d.leakage_cfm25))
        .collect();
    assert_eq!(leakage, [(DuctSide::Supply, 60.0), (DuctSide::Return, 20.0)]);
    assert!(
        model
            .ducts
            .iter()
            .all(|d| d.air_loop.as_deref() == Some("heat_pump air loop"))
    );
}

#[test]
fn ideal_mode_replaces_declared_systems() {
    let desc = demo("03_crawlspace_garage_ideal.yaml");
    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    assert!(summary.ideal_only);
    assert_eq!(summary.ducts, 0);
    assert_eq!(builder.equipment().len(), 1);

    let ideal = &builder.equipment()[0];
    assert_eq!(ideal.name, IDEAL_AIR_NAME);
    assert_eq!(ideal.heating.unwrap().sequential, 1.0);
    assert_eq!(ideal.cooling.unwrap().declared, 1.0);
}

#[test]
fn partial_heating_gets_a_residual() {
    let mut desc = demo("01_slab_ranch.yaml");
    desc.hvac.heating_systems[0].fraction_heat_load_served = 0.7;
    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();

    let residual = summary.residual.unwrap();
    let ideal = &builder.equipment()[residual.slot()];
    assert!((ideal.heating.unwrap().declared - 0.3).abs() < 1e-9);
    assert_eq!(ideal.heating.unwrap().sequential, 1.0);
    assert_eq!(ideal.cooling.unwrap().sequential, 0.0);
}

#[test]
fn untouched_cooling_depends_on_policy() {
    let mut desc = demo("01_slab_ranch.yaml");
    desc.hvac.cooling_systems.clear();

    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap();
    assert_eq!(summary.residual, None);
    assert_eq!(summary.unserved_cooling, 1.0);
    assert_eq!(
        by_system(&builder, "furnace").air_loop.as_deref(),
        Some("furnace air loop")
    );

    let mut builder = envelope(&desc);
    let summary = allocate(&desc, &mut builder, ResidualPolicy::CoverAll).unwrap();
    let ideal = &builder.equipment()[summary.residual.unwrap().slot()];
    assert_eq!(ideal.cooling.unwrap().declared, 1.0);
}

#[test]
fn two_furnaces_on_one_distribution_are_rejected() {
    let mut desc = demo("01_slab_ranch.yaml");
    let mut second = desc.hvac.heating_systems[0].clone();
    second.id = "furnace2".to_string();
    second.fraction_heat_load_served = 0.5;
    desc.hvac.heating_systems[0].fraction_heat_load_served = 0.5;
    desc.hvac.heating_systems.push(second);

    let mut builder = envelope(&desc);
    let err = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::Attachment);
    assert!(err.to_string().contains("Multiple heating systems"));
}

#[test]
fn heat_pump_rejects_split_dse() {
    let mut desc = demo("02_basement_two_story.yaml");
    let ducts = desc
        .hvac
        .distributions
        .iter_mut()
        .find(|d| d.id == "ducts")
        .unwrap();
    ducts.kind = DistributionKind::Dse {
        annual_heating_dse: 0.8,
        annual_cooling_dse: 0.7,
    };

    let mut builder = envelope(&desc);
    let err = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::AllocationConsistency);
}

#[test]
fn furnace_and_air_conditioner_reject_split_dse() {
    let mut desc = demo("01_slab_ranch.yaml");
    let ducts = desc
        .hvac
        .distributions
        .iter_mut()
        .find(|d| d.id == "ducts")
        .unwrap();
    ducts.kind = DistributionKind::Dse {
        annual_heating_dse: 0.8,
        annual_cooling_dse: 0.7,
    };

    let mut builder = envelope(&desc);
    let err = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::AllocationConsistency);
    assert!(err.to_string().contains("'furnace'"));
    assert!(builder.equipment().is_empty());
}

#[test]
fn over_declared_heating_is_rejected() {
    let mut desc = demo("02_basement_two_story.yaml");
    desc.hvac.heating_systems[0].fraction_heat_load_served = 0.6;
    let mut builder = envelope(&desc);
    let err = allocate(&desc, &mut builder, ResidualPolicy::Default).unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::AllocationConsistency);
    assert!(err.to_string().contains("heat_pump"));
}
