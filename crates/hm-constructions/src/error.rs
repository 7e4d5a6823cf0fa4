use hm_core::BuildErrorKind;

pub type ConstructionResult<T> = Result<T, ConstructionError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("Unable to calculate a construction for '{id}' using the provided assembly R-value ({target})")]
    CatalogExhausted { id: String, target: f64 },

    #[error("Construction R-value ({realized}) does not match Assembly R-value ({target}) for '{id}'")]
    RealizedMismatch {
        id: String,
        realized: f64,
        target: f64,
    },

    #[error("Invalid layered insulation for '{id}': {reason}")]
    InvalidLayers { id: String, reason: String },
}

impl ConstructionError {
    pub fn kind(&self) -> BuildErrorKind {
        BuildErrorKind::ConstructionResolution
    }
}
