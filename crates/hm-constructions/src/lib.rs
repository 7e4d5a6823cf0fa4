//! hm-constructions: layered assemblies solved to hit a target R-value.
//!
//! Contains:
//! - materials (base conductivities, studs, finishes)
//! - films (air film resistances)
//! - template (one layered template type, one inverse solver per framing family)
//! - assembly (realized material stack and its parallel-path R-value)
//! - catalog (prioritized templates per surface family)
//! - resolver (first-positive search and realized-R verification)

pub mod assembly;
pub mod catalog;
pub mod error;
pub mod films;
pub mod materials;
pub mod resolver;
pub mod template;

pub use assembly::{Assembly, FramingPath, SurfaceProperties};
pub use error::{ConstructionError, ConstructionResult};
pub use materials::{ExteriorFinish, Material, Stud};
pub use resolver::{Resolved, instantiate_layered, resolve, verify};
pub use template::{ConstructionTemplate, Framing, GenericMaterial};
