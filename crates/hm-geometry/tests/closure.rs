use hm_geometry::{
    Offsets, check_rectangle, ceiling_polygon, floor_polygon, roof_polygon, shift, wall_polygon,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn walls_close(
        length in 0.5f64..200.0,
        height in 0.5f64..30.0,
        z in -10.0f64..30.0,
        azimuth in 0u32..360,
    ) {
        let wall = wall_polygon(length, height, z, f64::from(azimuth), Offsets::NONE);
        prop_assert!(check_rectangle("wall", &wall, length * height).is_ok());
    }

    #[test]
    fn roofs_close(
        area in 1.0f64..5000.0,
        pitch in 0.0f64..24.0,
        azimuth in 0u32..360,
    ) {
        let width = area.sqrt();
        let length = area / width;
        let roof = roof_polygon(length, width, 17.0, f64::from(azimuth), pitch / 12.0);
        prop_assert!(check_rectangle("roof", &roof, area).is_ok());
    }

    #[test]
    fn floors_and_ceilings_close(x in 0.5f64..200.0, y in 0.5f64..200.0, z in -10.0f64..30.0) {
        prop_assert!(check_rectangle("floor", &floor_polygon(x, y, z), x * y).is_ok());
        prop_assert!(check_rectangle("ceiling", &ceiling_polygon(x, y, z), x * y).is_ok());
    }

    #[test]
    fn translation_preserves_closure(
        length in 0.5f64..200.0,
        azimuth in 0u32..360,
        distance in 0.0f64..500.0,
        side in -500.0f64..500.0,
    ) {
        let az = f64::from(azimuth);
        let mut wall = wall_polygon(length, 8.0, 0.0, az, Offsets::NONE);
        wall.translate(&shift(distance, az));
        wall.translate(&shift(side, az + 90.0));
        prop_assert!(check_rectangle("wall", &wall, length * 8.0).is_ok());
    }
}
