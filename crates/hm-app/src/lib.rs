//! Shared application service layer for the house model translator.
//!
//! The CLI talks to this crate only: it loads and validates descriptions,
//! runs the build pipeline, writes exports and summarises the result.

pub mod error;
pub mod options;
pub mod query;
pub mod translate;

pub use error::{AppError, AppResult};
pub use options::TranslateOptions;
pub use query::{
    ConstructionSummary, EquipmentSummary, ZoneSummary, list_constructions, list_equipment,
    list_zones,
};
pub use translate::{
    TRANSLATOR_VERSION, Translation, build_model, load_description, translate, translate_file,
    validate_description,
};
