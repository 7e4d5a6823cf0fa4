//! Catalog search and realized R-value verification.

use crate::assembly::Assembly;
use crate::error::{ConstructionError, ConstructionResult};
use crate::template::{ConstructionTemplate, Framing};
use hm_core::R_VALUE_TOLERANCE;
use hm_input::LayeredInsulation;
use tracing::debug;

/// A catalog entry selected for a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Position of the chosen template in its catalog.
    pub index: usize,
    pub template: ConstructionTemplate,
    /// Solved R-value of the unknown layer.
    pub unknown_r: f64,
    pub assembly: Assembly,
}

/// Walk `catalog` in priority order and take the first template whose
/// unknown layer solves to a positive R-value.
pub fn resolve(
    id: &str,
    name: &str,
    target: f64,
    film_r: f64,
    catalog: &[ConstructionTemplate],
) -> ConstructionResult<Resolved> {
    for (index, template) in catalog.iter().enumerate() {
        let unknown_r = template.solve(target, film_r);
        if unknown_r.is_finite() && unknown_r > 0.0 {
            let assembly = template.assemble(name, unknown_r, film_r);
            debug!(
                id,
                index,
                template = %assembly.template,
                unknown_r,
                "resolved construction"
            );
            return Ok(Resolved {
                index,
                template: *template,
                unknown_r,
                assembly,
            });
        }
    }
    Err(ConstructionError::CatalogExhausted {
        id: id.to_string(),
        target,
    })
}

/// Compare an assembly's realized R-value (plus any resistance modeled
/// outside it) with the requested target.
pub fn verify(id: &str, assembly: &Assembly, target: f64, extra_r: f64) -> ConstructionResult<f64> {
    let realized = assembly.realized_r() + extra_r;
    if (realized - target).abs() > R_VALUE_TOLERANCE {
        return Err(ConstructionError::RealizedMismatch {
            id: id.to_string(),
            realized,
            target,
        });
    }
    Ok(realized)
}

/// Build an assembly from explicit cavity/continuous layers on top of the
/// catalog's primary template. The realized R-value is whatever the layers
/// produce; no target is enforced.
pub fn instantiate_layered(
    id: &str,
    name: &str,
    primary: &ConstructionTemplate,
    layers: &LayeredInsulation,
    film_r: f64,
) -> ConstructionResult<Assembly> {
    let invalid = |reason: String| ConstructionError::InvalidLayers {
        id: id.to_string(),
        reason,
    };
    if !(0.0..1.0).contains(&layers.framing_factor) {
        return Err(invalid(format!(
            "framing factor {} must be in [0, 1)",
            layers.framing_factor
        )));
    }
    if layers.cavity_r_value < 0.0 || layers.continuous_r_value < 0.0 {
        return Err(invalid("layer R-values must be non-negative".to_string()));
    }

    let ff = layers.framing_factor;
    let mut template = *primary;
    template.rigid_r = layers.continuous_r_value;
    let unknown_r = match &mut template.framing {
        Framing::WoodStud { framing_factor, .. } | Framing::SteelStud { framing_factor, .. } => {
            *framing_factor = ff;
            layers.cavity_r_value
        }
        Framing::DoubleStud {
            framing_factor,
            spacing_in,
            ..
        } => {
            let stud_frac = 1.5 / *spacing_in;
            if ff < stud_frac {
                return Err(invalid(format!(
                    "framing factor {ff} is below the stud fraction {stud_frac:.4}"
                )));
            }
            *framing_factor = ff;
            layers.cavity_r_value
        }
        Framing::Sip { framing_factor, .. } => {
            *framing_factor = ff;
            layers.cavity_r_value
        }
        Framing::Cmu { framing_factor, .. } => {
            // Filled cores and furring insulation both sit in the solved rigid layer.
            *framing_factor = ff;
            template.rigid_r = 0.0;
            layers.continuous_r_value + layers.cavity_r_value
        }
        Framing::Icf { framing_factor, .. } => {
            *framing_factor = ff;
            layers.cavity_r_value / 2.0
        }
        Framing::Generic { material } => material.r_value() + layers.cavity_r_value,
    };

    let assembly = template.assemble(name, unknown_r, film_r);
    debug!(
        id,
        template = %assembly.template,
        realized_r = assembly.realized_r(),
        "instantiated layered construction"
    );
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::films;
    use crate::materials::ExteriorFinish;
    use hm_input::WallType;

    fn wood_walls() -> Vec<ConstructionTemplate> {
        catalog::wall(WallType::WoodStud, 0.5, Some(ExteriorFinish::WoodSiding))
    }

    #[test]
    fn low_target_skips_rigid_templates() {
        let r = resolve("w", "w", 8.0, films::exterior_wall(), &wood_walls()).unwrap();
        assert_eq!(r.index, 2, "2x6 with no rigid");
        assert!((r.unknown_r - 4.61).abs() < 0.01, "cavity {}", r.unknown_r);
        assert!(verify("w", &r.assembly, 8.0, 0.0).is_ok());
    }

    #[test]
    fn high_target_takes_first_template() {
        let r = resolve("w", "w", 23.0, films::exterior_wall(), &wood_walls()).unwrap();
        assert_eq!(r.index, 0);
        assert!((r.unknown_r - 10.91).abs() < 0.01, "cavity {}", r.unknown_r);
    }

    #[test]
    fn exhausted_catalog_reports_target() {
        let catalog = &wood_walls()[..1];
        let err = resolve("wall1", "w", 5.0, films::exterior_wall(), catalog).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to calculate a construction for 'wall1' using the provided assembly R-value (5)"
        );
    }

    #[test]
    fn verify_rejects_outside_tolerance() {
        let r = resolve("w", "w", 13.0, films::exterior_wall(), &wood_walls()).unwrap();
        assert!(verify("w", &r.assembly, 13.005, 0.0).is_ok());
        assert!(matches!(
            verify("w", &r.assembly, 13.5, 0.0),
            Err(ConstructionError::RealizedMismatch { .. })
        ));
    }

    #[test]
    fn layered_wood_stud_uses_given_layers() {
        let primary = wood_walls()[0];
        let layers = LayeredInsulation {
            cavity_r_value: 19.0,
            continuous_r_value: 5.0,
            framing_factor: 0.25,
        };
        let a = instantiate_layered("w", "w", &primary, &layers, films::exterior_wall()).unwrap();
        let rigid: f64 = a
            .continuous
            .iter()
            .filter(|m| m.name == "rigid insulation")
            .map(|m| m.r_value)
            .sum();
        assert_eq!(rigid, 5.0);
        assert_eq!(a.paths[0].fraction, 0.25);
        assert_eq!(a.paths[1].layers[0].r_value, 19.0);
    }

    #[test]
    fn layered_double_stud_rejects_small_framing_factor() {
        let primary = catalog::wall(WallType::DoubleWoodStud, 0.5, None)[0];
        let layers = LayeredInsulation {
            cavity_r_value: 30.0,
            continuous_r_value: 0.0,
            framing_factor: 0.02,
        };
        assert!(matches!(
            instantiate_layered("w", "w", &primary, &layers, films::exterior_wall()),
            Err(ConstructionError::InvalidLayers { .. })
        ));
    }
}
