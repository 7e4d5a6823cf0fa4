use hm_core::BuildErrorKind;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unhandled AdjacentTo value ({value}) for surface '{id}'.")]
    UnknownLocation { id: String, value: String },

    #[error("Location '{value}' for '{id}' cannot be used as an interior space")]
    NotInterior { id: String, value: String },

    #[error("{what} location is '{location}' but building does not have this location specified.")]
    MissingZone { what: String, location: String },

    #[error("Zone '{zone}' has no {missing} surface")]
    IncompleteZone { zone: String, missing: &'static str },

    #[error("Thermal zone '{zone}' has a calculated volume ({volume}) that is not positive")]
    NonPositiveVolume { zone: String, volume: f64 },

    #[error("Dangling {what} reference: {id}")]
    Dangling { what: &'static str, id: String },
}

impl ModelError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            ModelError::UnknownLocation { .. } | ModelError::NotInterior { .. } => {
                BuildErrorKind::AdjacencyMapping
            }
            ModelError::MissingZone { .. } | ModelError::Dangling { .. } => {
                BuildErrorKind::Attachment
            }
            ModelError::IncompleteZone { .. } | ModelError::NonPositiveVolume { .. } => {
                BuildErrorKind::GeometryConstruction
            }
        }
    }
}
