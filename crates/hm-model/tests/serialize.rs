use hm_constructions::{Assembly, Material};
use hm_core::SpaceType;
use hm_geometry::{Offsets, floor_polygon, wall_polygon};
use hm_model::{BoundaryCondition, ConstructionSource, Layout, ModelBuilder, SurfaceType};

#[test]
fn model_serializes_to_json() {
    let mut b = ModelBuilder::new("tiny");
    let living = b.zones_mut().get_or_create(SpaceType::Living);
    let wall = b.add_surface(
        "wall1",
        living,
        SurfaceType::Wall,
        BoundaryCondition::Outdoors,
        wall_polygon(10.0, 8.0, 0.0, 90.0, Offsets::NONE),
        Some(Layout::vertical(90, 10.0)),
    );
    b.add_surface(
        "floor1",
        living,
        SurfaceType::Floor,
        BoundaryCondition::Foundation(None),
        floor_polygon(10.0, 10.0, 0.0),
        None,
    );
    let assembly = Assembly::new("wall1 construction", "test", 0.68)
        .with_layer(Material::resistance("rigid insulation", 10.0));
    let realized = assembly.realized_r();
    let c = b.add_construction(assembly, ConstructionSource::Fixed, realized);
    b.assign_construction(wall, c).unwrap();
    b.set_zone_volume(living, 800.0).unwrap();

    let model = b.build().unwrap();
    assert!((model.conditioned_floor_area() - 100.0).abs() < 1e-9);
    assert_eq!(model.total_volume(), 800.0);
    let w = model.surface_named("wall1").unwrap();
    assert_eq!(model.construction_of(w).unwrap().name(), "wall1 construction");

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["zones"][0]["space_type"], "living");
    assert_eq!(json["surfaces"][0]["surface_type"], "Wall");
    assert_eq!(json["surfaces"][0]["polygon"]["vertices"].as_array().unwrap().len(), 4);
}
