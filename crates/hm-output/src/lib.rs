//! hm-output: build manifests and diagnostic exports of a finished model.

pub mod hash;
pub mod mapping;
pub mod store;
pub mod types;

pub use hash::compute_build_id;
pub use mapping::hvac_map_tsv;
pub use store::OutputDir;
pub use types::*;

pub type OutputResult<T> = Result<T, OutputError>;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Build not found in {path}")]
    BuildNotFound { path: String },
}
