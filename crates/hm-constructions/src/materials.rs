//! Building materials.
//!
//! Conductivities are Btu·in/(h·ft²·°F), thicknesses are inches, so a layer's
//! R-value is simply `thickness / conductivity`.

use serde::Serialize;

pub const WOOD_CONDUCTIVITY: f64 = 0.8004;
pub const GYPSUM_CONDUCTIVITY: f64 = 1.1112;
pub const CONCRETE_CONDUCTIVITY: f64 = 12.5;
pub const BRICK_CONDUCTIVITY: f64 = 5.5;
pub const STONE_CONDUCTIVITY: f64 = 12.5;
pub const STRAW_BALE_CONDUCTIVITY: f64 = 0.4164;
pub const SOIL_CONDUCTIVITY: f64 = 12.0;

/// Covering over frame floors.
pub const FLOOR_COVERING_R: f64 = 2.08 * 0.8;
pub const FLOOR_COVERING_THICKNESS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    pub thickness_in: f64,
    pub r_value: f64,
}

impl Material {
    pub fn new(name: impl Into<String>, thickness_in: f64, r_value: f64) -> Self {
        Self {
            name: name.into(),
            thickness_in,
            r_value,
        }
    }

    pub fn solid(name: impl Into<String>, thickness_in: f64, conductivity: f64) -> Self {
        Self::new(name, thickness_in, thickness_in / conductivity)
    }

    pub fn wood(name: impl Into<String>, thickness_in: f64) -> Self {
        Self::solid(name, thickness_in, WOOD_CONDUCTIVITY)
    }

    pub fn gypsum(thickness_in: f64) -> Self {
        Self::solid("drywall", thickness_in, GYPSUM_CONDUCTIVITY)
    }

    pub fn concrete(thickness_in: f64) -> Self {
        Self::solid("concrete", thickness_in, CONCRETE_CONDUCTIVITY)
    }

    /// Massless resistance layer such as rigid insulation or an air film.
    pub fn resistance(name: impl Into<String>, r_value: f64) -> Self {
        Self::new(name, 0.0, r_value)
    }
}

pub fn wood_r(thickness_in: f64) -> f64 {
    thickness_in / WOOD_CONDUCTIVITY
}

pub fn gypsum_r(thickness_in: f64) -> f64 {
    thickness_in / GYPSUM_CONDUCTIVITY
}

pub fn concrete_r(thickness_in: f64) -> f64 {
    thickness_in / CONCRETE_CONDUCTIVITY
}

/// Nominal lumber size with its actual depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stud {
    TwoByTwo,
    TwoByFour,
    TwoBySix,
    TwoByEight,
}

impl Stud {
    pub fn depth_in(self) -> f64 {
        match self {
            Stud::TwoByTwo => 1.5,
            Stud::TwoByFour => 3.5,
            Stud::TwoBySix => 5.5,
            Stud::TwoByEight => 7.25,
        }
    }

    pub fn r_value(self) -> f64 {
        wood_r(self.depth_in())
    }

    pub fn label(self) -> &'static str {
        match self {
            Stud::TwoByTwo => "2x2",
            Stud::TwoByFour => "2x4",
            Stud::TwoBySix => "2x6",
            Stud::TwoByEight => "2x8",
        }
    }
}

/// Outermost layer of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExteriorFinish {
    WoodSiding,
    AsphaltShingles,
    FloorCovering,
}

impl ExteriorFinish {
    pub fn material(self) -> Material {
        match self {
            ExteriorFinish::WoodSiding => Material::solid("wood siding", 0.75, 0.71),
            ExteriorFinish::AsphaltShingles => Material::solid("asphalt shingles", 0.25, 1.128),
            ExteriorFinish::FloorCovering => {
                Material::new("floor covering", FLOOR_COVERING_THICKNESS, FLOOR_COVERING_R)
            }
        }
    }

    pub fn r_value(self) -> f64 {
        self.material().r_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_r_is_thickness_over_conductivity() {
        assert!((wood_r(0.8004) - 1.0).abs() < 1e-12);
        assert!((Material::concrete(8.0).r_value - 0.64).abs() < 1e-12);
        assert!((Material::gypsum(0.5).r_value - 0.5 / 1.1112).abs() < 1e-12);
    }

    #[test]
    fn stud_depths() {
        assert_eq!(Stud::TwoByTwo.depth_in(), 1.5);
        assert_eq!(Stud::TwoByEight.depth_in(), 7.25);
        assert!((Stud::TwoBySix.r_value() - 5.5 / 0.8004).abs() < 1e-12);
    }

    #[test]
    fn finishes() {
        assert!((ExteriorFinish::WoodSiding.r_value() - 0.75 / 0.71).abs() < 1e-12);
        assert!((ExteriorFinish::FloorCovering.r_value() - 1.664).abs() < 1e-12);
    }
}
