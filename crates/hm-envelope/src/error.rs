use hm_constructions::ConstructionError;
use hm_core::BuildErrorKind;
use hm_geometry::GeometryError;
use hm_model::ModelError;

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Attached {host} '{idref}' not found for {kind} '{id}'.")]
    MissingHost {
        host: &'static str,
        idref: String,
        kind: &'static str,
        id: String,
    },

    #[error("A neighbor building has an azimuth ({azimuth}) not equal to the azimuth of any wall.")]
    NeighborAzimuth { azimuth: u32 },

    #[error(
        "Sum of conditioned floor surface areas {model_cfa} is greater than ConditionedFloorArea specified {cfa}."
    )]
    FloorAreaExceeded { model_cfa: f64, cfa: f64 },

    #[error("Surface '{id}' must give exactly one of an assembly R-value or insulation layers")]
    AmbiguousInsulation { id: String },
}

impl EnvelopeError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            EnvelopeError::Geometry(e) => e.kind(),
            EnvelopeError::Construction(e) => e.kind(),
            EnvelopeError::Model(e) => e.kind(),
            EnvelopeError::MissingHost { .. } => BuildErrorKind::Attachment,
            EnvelopeError::NeighborAzimuth { .. } | EnvelopeError::FloorAreaExceeded { .. } => {
                BuildErrorKind::GeometryConstruction
            }
            EnvelopeError::AmbiguousInsulation { .. } => BuildErrorKind::StructuralValidation,
        }
    }
}
