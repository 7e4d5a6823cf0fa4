//! Realized layered assemblies.
//!
//! An assembly is a stack of continuous layers shared by every heat-flow
//! path, plus one or more parallel framing paths. Its R-value is the
//! parallel-path combination `1 / Σ fᵢ / (R_continuous + R_pathᵢ)`.

use crate::materials::Material;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramingPath {
    pub name: String,
    pub fraction: f64,
    pub layers: Vec<Material>,
}

impl FramingPath {
    pub fn new(name: impl Into<String>, fraction: f64, layers: Vec<Material>) -> Self {
        Self {
            name: name.into(),
            fraction,
            layers,
        }
    }

    pub fn r_value(&self) -> f64 {
        self.layers.iter().map(|m| m.r_value).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceProperties {
    pub solar_absorptance: f64,
    pub emittance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assembly {
    pub name: String,
    /// Label of the template the assembly was built from.
    pub template: String,
    pub film_r: f64,
    /// Outside to inside, excluding films.
    pub continuous: Vec<Material>,
    pub paths: Vec<FramingPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceProperties>,
}

impl Assembly {
    pub fn new(name: impl Into<String>, template: impl Into<String>, film_r: f64) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            film_r,
            continuous: Vec::new(),
            paths: Vec::new(),
            surface: None,
        }
    }

    pub fn with_layer(mut self, layer: Material) -> Self {
        self.continuous.push(layer);
        self
    }

    pub fn with_path(mut self, path: FramingPath) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_surface(mut self, solar_absorptance: f64, emittance: f64) -> Self {
        self.surface = Some(SurfaceProperties {
            solar_absorptance,
            emittance,
        });
        self
    }

    /// Films plus every continuous layer.
    pub fn continuous_r(&self) -> f64 {
        self.film_r + self.continuous.iter().map(|m| m.r_value).sum::<f64>()
    }

    /// Whole-assembly R-value including films.
    pub fn realized_r(&self) -> f64 {
        let nc = self.continuous_r();
        if self.paths.is_empty() {
            return nc;
        }
        let conductance: f64 = self
            .paths
            .iter()
            .map(|p| p.fraction / (nc + p.r_value()))
            .sum();
        1.0 / conductance
    }

    pub fn u_factor(&self) -> f64 {
        1.0 / self.realized_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_only_assembly_sums_layers() {
        let a = Assembly::new("a", "series", 0.68)
            .with_layer(Material::resistance("rigid", 5.0))
            .with_layer(Material::concrete(8.0));
        assert!((a.realized_r() - (0.68 + 5.0 + 0.64)).abs() < 1e-12);
    }

    #[test]
    fn parallel_paths_weight_conductance() {
        let a = Assembly::new("a", "framed", 1.0)
            .with_path(FramingPath::new(
                "stud",
                0.5,
                vec![Material::resistance("stud", 1.0)],
            ))
            .with_path(FramingPath::new(
                "cavity",
                0.5,
                vec![Material::resistance("cavity", 3.0)],
            ));
        // 1 / (0.5/2 + 0.5/4)
        assert!((a.realized_r() - 1.0 / 0.375).abs() < 1e-12);
        assert!((a.u_factor() - 0.375).abs() < 1e-12);
    }
}
