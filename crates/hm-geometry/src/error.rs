use hm_core::{BuildErrorKind, HmError};

pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Calculated a non-positive net surface area ({net_area}) for {surface_type} '{id}'")]
    NonPositiveNetArea {
        id: String,
        surface_type: &'static str,
        net_area: f64,
    },

    #[error("Invalid dimension for {what}: {value}")]
    InvalidDimension { what: &'static str, value: f64 },

    #[error(transparent)]
    Numeric(#[from] HmError),

    #[error("Polygon closure failed for '{id}': {reason}")]
    Closure { id: String, reason: String },
}

impl GeometryError {
    pub fn kind(&self) -> BuildErrorKind {
        BuildErrorKind::GeometryConstruction
    }
}
