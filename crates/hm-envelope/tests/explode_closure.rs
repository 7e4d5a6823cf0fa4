use hm_envelope::assemble;
use hm_geometry::check_rectangle;
use hm_input::BuildingDescription;
use hm_model::ModelBuilder;
use proptest::prelude::*;
use std::path::Path;

fn ranch() -> BuildingDescription {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/01_slab_ranch.yaml");
    hm_input::load_yaml(&path).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn exploded_surfaces_stay_closed(
        areas in prop::collection::vec(150.0f64..800.0, 4),
        rotation in 0u32..90,
    ) {
        let mut desc = ranch();
        for (wall, area) in desc.enclosure.walls.iter_mut().zip(&areas) {
            wall.area = *area;
            wall.azimuth = wall.azimuth.map(|az| (az + rotation) % 360);
        }
        for roof in &mut desc.enclosure.roofs {
            roof.azimuth = roof.azimuth.map(|az| (az + rotation) % 360);
        }
        for window in &mut desc.enclosure.windows {
            window.azimuth = (window.azimuth + rotation) % 360;
        }
        for door in &mut desc.enclosure.doors {
            door.azimuth = (door.azimuth + rotation) % 360;
        }

        let mut builder = ModelBuilder::new(&desc.name);
        let summary = assemble(&desc, &mut builder).unwrap();
        let plan = summary.explode.unwrap();
        prop_assert!(plan.sides >= 4);
        prop_assert!(plan.distance > 0.0);

        for surface in builder.surfaces() {
            prop_assert!(
                check_rectangle(&surface.name, &surface.polygon, surface.area()).is_ok(),
                "{} lost closure", surface.name
            );
            if let Some(other) = surface.adjacent() {
                let other = builder.surface(other).unwrap();
                prop_assert_eq!(&other.polygon, &surface.polygon.reversed());
            }
        }
        for sub in builder.sub_surfaces() {
            prop_assert!(sub.polygon.is_planar());
        }
    }
}
