//! hm-model: the energy-model object graph produced by one build.
//!
//! Contains:
//! - zone (canonical zones and the create-or-get registry)
//! - surface / subsurface / shading (geometry entities)
//! - foundation (Kiva ground-coupling objects)
//! - construction (assemblies assigned to surfaces)
//! - hvac (equipment records, ducts, system id -> equipment map)
//! - builder (incremental construction, frozen into a `BuildingModel`)

pub mod builder;
pub mod construction;
pub mod error;
pub mod foundation;
pub mod hvac;
pub mod model;
pub mod shading;
pub mod subsurface;
pub mod surface;
pub mod zone;

pub use builder::ModelBuilder;
pub use construction::{Construction, ConstructionSource};
pub use error::{ModelError, ModelResult};
pub use foundation::{Foundation, InsulationBlock};
pub use hvac::{
    BackupHeat, Capacity, Duct, Equipment, EquipmentKind, EquipmentMap, LoadShare, Speeds,
    fan_power_installed,
};
pub use model::BuildingModel;
pub use shading::{Shading, ShadingKind};
pub use subsurface::{InteriorShading, SubSurface, SubSurfaceKind};
pub use surface::{BoundaryCondition, Layout, Surface, SurfaceType};
pub use zone::{Zone, ZoneRegistry};
