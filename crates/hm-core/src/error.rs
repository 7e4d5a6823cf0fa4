use core::fmt;
use thiserror::Error;

pub type HmResult<T> = Result<T, HmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// Category of a failed build.
///
/// Every domain error in the workspace maps onto exactly one of these so the
/// application layer can report failures uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildErrorKind {
    StructuralValidation,
    GeometryConstruction,
    ConstructionResolution,
    AdjacencyMapping,
    AllocationConsistency,
    Attachment,
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildErrorKind::StructuralValidation => "structural validation",
            BuildErrorKind::GeometryConstruction => "geometry construction",
            BuildErrorKind::ConstructionResolution => "construction resolution",
            BuildErrorKind::AdjacencyMapping => "adjacency mapping",
            BuildErrorKind::AllocationConsistency => "allocation consistency",
            BuildErrorKind::Attachment => "attachment",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(
            BuildErrorKind::GeometryConstruction.to_string(),
            "geometry construction"
        );
        assert_eq!(BuildErrorKind::Attachment.to_string(), "attachment");
    }
}
