//! hm-geometry: planar polygons and rectangle synthesis.
//!
//! All lengths are feet. Azimuth is degrees clockwise from north (+y), so a
//! wall at azimuth `az` faces `(sin az, cos az, 0)`.

pub mod error;
pub mod levels;
pub mod net_area;
pub mod polygon;
pub mod synth;

pub use error::{GeometryError, GeometryResult};
pub use levels::{Levels, STOREY_HEIGHT};
pub use net_area::SubsurfaceAreas;
pub use polygon::{Polygon, check_rectangle};
pub use synth::{
    Offsets, ceiling_polygon, floor_polygon, horizontal_direction, overhang_polygon, roof_polygon,
    shift, wall_polygon,
};

pub use nalgebra::{Point3, Vector3};
