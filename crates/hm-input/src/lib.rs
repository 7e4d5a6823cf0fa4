//! hm-input: building description file format and structural validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, ValidationErrors, validate_building};

use std::path::Path;

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),
}

/// Parse without validating. Used when validation is deferred.
pub fn read_description(path: &Path) -> InputResult<BuildingDescription> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        other => Err(InputError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

pub fn load_yaml(path: &Path) -> InputResult<BuildingDescription> {
    let content = std::fs::read_to_string(path)?;
    let desc: BuildingDescription = serde_yaml::from_str(&content)?;
    validate_building(&desc)?;
    Ok(desc)
}

pub fn save_yaml(path: &Path, desc: &BuildingDescription) -> InputResult<()> {
    validate_building(desc)?;
    let content = serde_yaml::to_string(desc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> InputResult<BuildingDescription> {
    let content = std::fs::read_to_string(path)?;
    let desc: BuildingDescription = serde_json::from_str(&content)?;
    validate_building(&desc)?;
    Ok(desc)
}

pub fn save_json(path: &Path, desc: &BuildingDescription) -> InputResult<()> {
    validate_building(desc)?;
    let content = serde_json::to_string_pretty(desc)?;
    std::fs::write(path, content)?;
    Ok(())
}
