//! Controlled adjacency vocabulary.
//!
//! Input documents name spaces with a small closed set of strings. They are
//! mapped onto [`SpaceType`] / [`Adjacency`] once, at the boundary, and
//! matched exhaustively from then on.

use core::fmt;

/// Canonical zone/space types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpaceType {
    Living,
    Garage,
    UnconditionedBasement,
    ConditionedBasement,
    VentedCrawlspace,
    UnventedCrawlspace,
    VentedAttic,
    UnventedAttic,
}

impl SpaceType {
    pub const ALL: [SpaceType; 8] = [
        SpaceType::Living,
        SpaceType::Garage,
        SpaceType::UnconditionedBasement,
        SpaceType::ConditionedBasement,
        SpaceType::VentedCrawlspace,
        SpaceType::UnventedCrawlspace,
        SpaceType::VentedAttic,
        SpaceType::UnventedAttic,
    ];

    /// Map an input location string onto a space type.
    pub fn from_location(location: &str) -> Option<Self> {
        let space = match location {
            "living space" => SpaceType::Living,
            "garage" => SpaceType::Garage,
            "basement - unconditioned" => SpaceType::UnconditionedBasement,
            "basement - conditioned" => SpaceType::ConditionedBasement,
            "crawlspace - vented" => SpaceType::VentedCrawlspace,
            "crawlspace - unvented" => SpaceType::UnventedCrawlspace,
            "attic - vented" => SpaceType::VentedAttic,
            "attic - unvented" => SpaceType::UnventedAttic,
            _ => return None,
        };
        Some(space)
    }

    /// The input vocabulary string for this space type.
    pub fn location(self) -> &'static str {
        match self {
            SpaceType::Living => "living space",
            SpaceType::Garage => "garage",
            SpaceType::UnconditionedBasement => "basement - unconditioned",
            SpaceType::ConditionedBasement => "basement - conditioned",
            SpaceType::VentedCrawlspace => "crawlspace - vented",
            SpaceType::UnventedCrawlspace => "crawlspace - unvented",
            SpaceType::VentedAttic => "attic - vented",
            SpaceType::UnventedAttic => "attic - unvented",
        }
    }

    pub fn is_conditioned(self) -> bool {
        matches!(self, SpaceType::Living | SpaceType::ConditionedBasement)
    }

    pub fn is_attic(self) -> bool {
        matches!(self, SpaceType::VentedAttic | SpaceType::UnventedAttic)
    }

    pub fn is_below_grade(self) -> bool {
        matches!(
            self,
            SpaceType::UnconditionedBasement
                | SpaceType::ConditionedBasement
                | SpaceType::VentedCrawlspace
                | SpaceType::UnventedCrawlspace
        )
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location())
    }
}

/// What lies on the far side of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Adjacency {
    Outside,
    Ground,
    OtherHousingUnit,
    Space(SpaceType),
}

impl Adjacency {
    pub fn from_location(location: &str) -> Option<Self> {
        match location {
            "outside" => Some(Adjacency::Outside),
            "ground" => Some(Adjacency::Ground),
            "other housing unit" => Some(Adjacency::OtherHousingUnit),
            other => SpaceType::from_location(other).map(Adjacency::Space),
        }
    }

    pub fn space(self) -> Option<SpaceType> {
        match self {
            Adjacency::Space(space) => Some(space),
            _ => None,
        }
    }

    pub fn is_conditioned(self) -> bool {
        self.space().is_some_and(SpaceType::is_conditioned)
    }

    pub fn is_attic(self) -> bool {
        self.space().is_some_and(SpaceType::is_attic)
    }
}

/// True when exactly one side of the surface is conditioned space.
///
/// Surfaces shared with another housing unit are adiabatic and never a
/// thermal boundary.
pub fn is_thermal_boundary(interior: SpaceType, exterior: Adjacency) -> bool {
    if exterior == Adjacency::OtherHousingUnit {
        return false;
    }
    interior.is_conditioned() != exterior.is_conditioned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_round_trips() {
        for space in SpaceType::ALL {
            assert_eq!(SpaceType::from_location(space.location()), Some(space));
        }
        assert_eq!(SpaceType::from_location("outside"), None);
        assert_eq!(SpaceType::from_location("Living Space"), None);
    }

    #[test]
    fn exterior_vocabulary() {
        assert_eq!(Adjacency::from_location("ground"), Some(Adjacency::Ground));
        assert_eq!(
            Adjacency::from_location("attic - vented"),
            Some(Adjacency::Space(SpaceType::VentedAttic))
        );
        assert_eq!(Adjacency::from_location("roof"), None);
    }

    #[test]
    fn thermal_boundary_rules() {
        assert!(is_thermal_boundary(SpaceType::Living, Adjacency::Outside));
        assert!(is_thermal_boundary(
            SpaceType::Garage,
            Adjacency::Space(SpaceType::Living)
        ));
        assert!(!is_thermal_boundary(
            SpaceType::Living,
            Adjacency::Space(SpaceType::ConditionedBasement)
        ));
        assert!(!is_thermal_boundary(
            SpaceType::Living,
            Adjacency::OtherHousingUnit
        ));
        assert!(!is_thermal_boundary(SpaceType::VentedAttic, Adjacency::Outside));
    }
}
