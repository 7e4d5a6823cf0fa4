use hm_core::BuildErrorKind;
use hm_model::ModelError;

pub type HvacResult<T> = Result<T, HvacError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HvacError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Attached HVAC distribution system '{distribution}' cannot be found for HVAC system '{system}'.")]
    MissingDistribution { distribution: String, system: String },

    #[error("Cannot handle different distribution system efficiency (DSE) values for heating and cooling on '{system}'.")]
    MismatchedDse { system: String },

    #[error(
        "HVAC system '{system}' declares {fraction} of the {load} load but only {remaining} remains unserved"
    )]
    OverAllocated {
        system: String,
        load: &'static str,
        fraction: f64,
        remaining: f64,
    },

    #[error("Multiple {load} systems found attached to distribution system '{distribution}'.")]
    MultipleAttached {
        load: &'static str,
        distribution: String,
    },
}

impl HvacError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            HvacError::Model(e) => e.kind(),
            HvacError::MissingDistribution { .. } | HvacError::MultipleAttached { .. } => {
                BuildErrorKind::Attachment
            }
            HvacError::MismatchedDse { .. } | HvacError::OverAllocated { .. } => {
                BuildErrorKind::AllocationConsistency
            }
        }
    }
}
