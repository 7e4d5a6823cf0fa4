//! hm-core: stable foundation for the house model translator.
//!
//! Contains:
//! - units (uom SI types + IP constructors/conversions)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for zones, surfaces, equipment)
//! - location (closed adjacency vocabulary)
//! - error (shared error type + build error taxonomy)

pub mod error;
pub mod ids;
pub mod location;
pub mod numeric;
pub mod units;

pub use error::{BuildErrorKind, HmError, HmResult};
pub use ids::*;
pub use location::{Adjacency, SpaceType, is_thermal_boundary};
pub use numeric::*;
pub use units::*;
