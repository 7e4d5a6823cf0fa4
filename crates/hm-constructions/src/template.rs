//! Generic layered construction template.
//!
//! A template fixes every layer but one. [`ConstructionTemplate::solve`]
//! back-solves that unknown layer from a target assembly R-value with the
//! closed form of its framing family, and [`ConstructionTemplate::assemble`]
//! builds the material stack whose parallel-path R-value reproduces the target.

use crate::assembly::{Assembly, FramingPath};
use crate::materials::{
    CONCRETE_CONDUCTIVITY, ExteriorFinish, Material, Stud, concrete_r, gypsum_r, wood_r,
};
use serde::Serialize;

/// Width of the splines joining structural insulated panels (in).
const SIP_SPLINE_THICKNESS: f64 = 0.5;
/// One 4 in spline per 48 in panel.
const SIP_SPLINE_FRACTION: f64 = 4.0 / 48.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenericMaterial {
    pub name: &'static str,
    pub thickness_in: f64,
    pub conductivity: f64,
}

impl GenericMaterial {
    pub fn r_value(&self) -> f64 {
        self.thickness_in / self.conductivity
    }
}

/// Framing family and its fixed geometry. Each variant owns one inverse solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Framing {
    WoodStud {
        stud: Stud,
        framing_factor: f64,
    },
    SteelStud {
        cavity_depth_in: f64,
        framing_factor: f64,
        correction: f64,
    },
    DoubleStud {
        stud: Stud,
        framing_factor: f64,
        spacing_in: f64,
    },
    Cmu {
        thickness_in: f64,
        conductivity: f64,
        framing_factor: f64,
    },
    Sip {
        thickness_in: f64,
        framing_factor: f64,
        sheathing_in: f64,
    },
    Icf {
        insulation_in: f64,
        concrete_in: f64,
        framing_factor: f64,
    },
    Generic {
        material: GenericMaterial,
    },
}

impl Framing {
    pub fn framing_factor(&self) -> f64 {
        match *self {
            Framing::WoodStud { framing_factor, .. }
            | Framing::SteelStud { framing_factor, .. }
            | Framing::DoubleStud { framing_factor, .. }
            | Framing::Cmu { framing_factor, .. }
            | Framing::Sip { framing_factor, .. }
            | Framing::Icf { framing_factor, .. } => framing_factor,
            Framing::Generic { .. } => 0.0,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            Framing::WoodStud {
                stud,
                framing_factor,
            } => format!("wood stud {} ff {framing_factor}", stud.label()),
            Framing::SteelStud {
                cavity_depth_in,
                framing_factor,
                ..
            } => format!("steel stud {cavity_depth_in} in ff {framing_factor}"),
            Framing::DoubleStud {
                stud, spacing_in, ..
            } => format!("double stud {} {spacing_in} in o.c.", stud.label()),
            Framing::Cmu { thickness_in, .. } => format!("cmu {thickness_in} in"),
            Framing::Sip { thickness_in, .. } => format!("sip {thickness_in} in"),
            Framing::Icf {
                insulation_in,
                concrete_in,
                ..
            } => format!("icf {insulation_in}/{concrete_in} in"),
            Framing::Generic { material } => format!("{} {} in", material.name, material.thickness_in),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstructionTemplate {
    pub framing: Framing,
    pub rigid_r: f64,
    pub osb_in: f64,
    pub drywall_in: f64,
    pub exterior: Option<ExteriorFinish>,
}

impl ConstructionTemplate {
    pub fn new(framing: Framing, rigid_r: f64, osb_in: f64, drywall_in: f64) -> Self {
        Self {
            framing,
            rigid_r,
            osb_in,
            drywall_in,
            exterior: None,
        }
    }

    pub fn with_exterior(mut self, exterior: Option<ExteriorFinish>) -> Self {
        self.exterior = exterior;
        self
    }

    /// Films plus every layer outside the framing paths.
    pub fn non_cavity_r(&self, film_r: f64) -> f64 {
        let mut r = film_r
            + self.exterior.map_or(0.0, ExteriorFinish::r_value)
            + self.rigid_r
            + wood_r(self.osb_in)
            + gypsum_r(self.drywall_in);
        if let Framing::Sip { sheathing_in, .. } = self.framing {
            r += wood_r(sheathing_in);
        }
        r
    }

    /// R-value of the unknown layer that makes the assembly hit `target`.
    ///
    /// Wood, steel, double stud and SIP solve the cavity insulation; CMU
    /// solves a continuous rigid layer; ICF solves each insulating form
    /// layer; generic walls solve the mass layer itself. The result may be
    /// non-positive or NaN when the template cannot reach the target.
    pub fn solve(&self, target: f64, film_r: f64) -> f64 {
        let a = target;
        let nc = self.non_cavity_r(film_r);
        match self.framing {
            Framing::WoodStud {
                stud,
                framing_factor: ff,
            } => (1.0 - ff) / (1.0 / a - ff / (stud.r_value() + nc)) - nc,
            Framing::SteelStud { correction, .. } => (a - nc) / correction,
            Framing::DoubleStud {
                stud,
                framing_factor,
                spacing_in,
            } => {
                let b = 1.5 / spacing_in;
                let c = stud.r_value();
                let d = nc;
                let e = framing_factor - b;
                let disc = 4.0 * a * a * b * b + 12.0 * a * a * b * e + 4.0 * a * a * b
                    + 9.0 * a * a * e * e
                    - 6.0 * a * a * e
                    + a * a
                    - 48.0 * a * b * c
                    - 16.0 * a * b * d
                    - 36.0 * a * c * e
                    + 12.0 * a * c
                    - 12.0 * a * d * e
                    + 4.0 * a * d
                    + 36.0 * c * c
                    + 24.0 * c * d
                    + 4.0 * d * d;
                let x = ((3.0 * c + d) * disc.sqrt()
                    + 6.0 * a * b * c
                    + 2.0 * a * b * d
                    + 3.0 * a * c * e
                    + 3.0 * a * c
                    + 3.0 * a * d * e
                    + a * d
                    - 18.0 * c * c
                    - 18.0 * c * d
                    - 4.0 * d * d)
                    / (2.0 * (-3.0 * a * e + 9.0 * c + 3.0 * d));
                3.0 * x
            }
            Framing::Sip {
                thickness_in,
                framing_factor,
                ..
            } => {
                let b = framing_factor;
                let c = wood_r(thickness_in);
                let d = nc;
                let e = SIP_SPLINE_FRACTION;
                let f = wood_r(SIP_SPLINE_THICKNESS);
                let g = thickness_in - 2.0 * SIP_SPLINE_THICKNESS;
                let h = thickness_in;
                let p = a * b * c * g - a * b * d * h - 2.0 * a * b * f * h + a * c * e * g
                    - a * c * e * h
                    - a * c * g
                    + a * d * e * g
                    - a * d * e * h
                    - a * d * g
                    + c * d * g
                    + c * d * h
                    + 2.0 * c * f * h
                    + d * d * g
                    + d * d * h
                    + 2.0 * d * f * h;
                let q = a * b * c * d * h + 2.0 * a * b * c * f * h - a * c * d * h
                    + 2.0 * a * c * e * f * h
                    - 2.0 * a * c * f * h
                    - a * d * d * h
                    + 2.0 * a * d * e * f * h
                    - 2.0 * a * d * f * h
                    + c * d * d * h
                    + 2.0 * c * d * f * h
                    + d * d * d * h
                    + 2.0 * d * d * f * h;
                let denom = -a * b * g + c * g + d * g;
                ((p * p - 4.0 * denom * q).sqrt() - p) / (2.0 * denom)
            }
            Framing::Cmu {
                thickness_in,
                conductivity,
                framing_factor: b,
            } => {
                let c = wood_r(thickness_in);
                let d = thickness_in / conductivity;
                let e = nc;
                0.5 * ((a * a - 4.0 * a * b * c + 4.0 * a * b * d + 2.0 * a * c - 2.0 * a * d
                    + c * c
                    - 2.0 * c * d
                    + d * d)
                    .sqrt()
                    + a
                    - c
                    - d
                    - 2.0 * e)
            }
            Framing::Icf {
                insulation_in,
                concrete_in,
                framing_factor: b,
            } => {
                let c = wood_r(2.0 * insulation_in + concrete_in);
                let d = concrete_r(concrete_in);
                let e = nc;
                (a * b * c - a * b * d - a * c - a * e + c * d + c * e + d * e + e * e)
                    / (2.0 * (a * b - c - e))
            }
            Framing::Generic { .. } => a - nc,
        }
    }

    /// Material stack for a solved (or given) unknown layer R-value.
    pub fn assemble(&self, name: impl Into<String>, unknown_r: f64, film_r: f64) -> Assembly {
        let mut assembly = Assembly::new(name, self.framing.label(), film_r);
        if let Some(exterior) = self.exterior {
            assembly = assembly.with_layer(exterior.material());
        }
        if let Framing::Sip { sheathing_in, .. } = self.framing {
            assembly = assembly.with_layer(Material::wood("sip sheathing", sheathing_in));
        }
        if self.rigid_r > 0.0 {
            assembly = assembly.with_layer(Material::resistance("rigid insulation", self.rigid_r));
        }
        if self.osb_in > 0.0 {
            assembly = assembly.with_layer(Material::wood("osb sheathing", self.osb_in));
        }

        let cavity = |r: f64| Material::resistance("cavity insulation", r);
        assembly = match self.framing {
            Framing::WoodStud {
                stud,
                framing_factor,
            } => assembly
                .with_path(FramingPath::new(
                    "stud",
                    framing_factor,
                    vec![Material::wood("stud", stud.depth_in())],
                ))
                .with_path(FramingPath::new(
                    "cavity",
                    1.0 - framing_factor,
                    vec![cavity(unknown_r)],
                )),
            Framing::SteelStud { correction, .. } => assembly.with_path(FramingPath::new(
                "corrected cavity",
                1.0,
                vec![cavity(correction * unknown_r)],
            )),
            Framing::DoubleStud {
                stud,
                framing_factor,
                spacing_in,
            } => {
                let stud_frac = 1.5 / spacing_in;
                let misc = framing_factor - stud_frac;
                let x = unknown_r / 3.0;
                let wood = || Material::wood("stud", stud.depth_in());
                assembly
                    .with_path(FramingPath::new(
                        "studs",
                        stud_frac,
                        vec![wood(), cavity(x), wood()],
                    ))
                    .with_path(FramingPath::new("misc framing", misc, vec![wood(), wood(), wood()]))
                    .with_path(FramingPath::new(
                        "cavity",
                        1.0 - stud_frac - misc,
                        vec![cavity(x), cavity(x), cavity(x)],
                    ))
            }
            Framing::Sip {
                thickness_in,
                framing_factor,
                ..
            } => {
                let core = thickness_in - 2.0 * SIP_SPLINE_THICKNESS;
                let spline = || Material::wood("spline", SIP_SPLINE_THICKNESS);
                assembly
                    .with_path(FramingPath::new(
                        "framing",
                        framing_factor,
                        vec![Material::wood("framing", thickness_in)],
                    ))
                    .with_path(FramingPath::new(
                        "spline",
                        SIP_SPLINE_FRACTION,
                        vec![spline(), cavity(core / thickness_in * unknown_r), spline()],
                    ))
                    .with_path(FramingPath::new(
                        "core",
                        1.0 - framing_factor - SIP_SPLINE_FRACTION,
                        vec![cavity(unknown_r)],
                    ))
            }
            Framing::Cmu {
                thickness_in,
                conductivity,
                framing_factor,
            } => assembly
                .with_layer(Material::resistance("rigid insulation", unknown_r))
                .with_path(FramingPath::new(
                    "furring",
                    framing_factor,
                    vec![Material::wood("framing", thickness_in)],
                ))
                .with_path(FramingPath::new(
                    "cmu",
                    1.0 - framing_factor,
                    vec![Material::solid("cmu", thickness_in, conductivity)],
                )),
            Framing::Icf {
                insulation_in,
                concrete_in,
                framing_factor,
            } => {
                let form = || Material::new("icf insulation", insulation_in, unknown_r);
                assembly
                    .with_path(FramingPath::new(
                        "ties",
                        framing_factor,
                        vec![Material::wood("framing", 2.0 * insulation_in + concrete_in)],
                    ))
                    .with_path(FramingPath::new(
                        "form",
                        1.0 - framing_factor,
                        vec![
                            form(),
                            Material::solid("concrete", concrete_in, CONCRETE_CONDUCTIVITY),
                            form(),
                        ],
                    ))
            }
            Framing::Generic { material } => assembly.with_path(FramingPath::new(
                material.name,
                1.0,
                vec![Material::new(material.name, material.thickness_in, unknown_r)],
            )),
        };

        if self.drywall_in > 0.0 {
            assembly = assembly.with_layer(Material::gypsum(self.drywall_in));
        }
        assembly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::films;

    fn wood_stud_2x6(rigid_r: f64) -> ConstructionTemplate {
        ConstructionTemplate::new(
            Framing::WoodStud {
                stud: Stud::TwoBySix,
                framing_factor: 0.20,
            },
            rigid_r,
            0.5,
            0.5,
        )
        .with_exterior(Some(ExteriorFinish::WoodSiding))
    }

    #[test]
    fn wood_stud_non_cavity_r() {
        let t = wood_stud_2x6(10.0);
        let expected = 0.89 + 0.75 / 0.71 + 10.0 + 0.5 / 0.8004 + 0.5 / 1.1112;
        assert!((t.non_cavity_r(films::exterior_wall()) - expected).abs() < 1e-12);
    }

    #[test]
    fn wood_stud_solution_reproduces_target() {
        let t = wood_stud_2x6(5.0);
        let film = films::exterior_wall();
        let cavity = t.solve(13.0, film);
        assert!(cavity > 0.0);
        let a = t.assemble("wall", cavity, film);
        assert!((a.realized_r() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn steel_stud_is_series_with_correction() {
        let t = ConstructionTemplate::new(
            Framing::SteelStud {
                cavity_depth_in: 5.5,
                framing_factor: 0.2,
                correction: 0.45,
            },
            0.0,
            0.5,
            0.5,
        );
        let film = films::interior_wall();
        let cavity = t.solve(12.0, film);
        assert!((cavity - (12.0 - t.non_cavity_r(film)) / 0.45).abs() < 1e-12);
        assert!((t.assemble("w", cavity, film).realized_r() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn generic_layer_takes_the_remainder() {
        let t = ConstructionTemplate::new(
            Framing::Generic {
                material: GenericMaterial {
                    name: "brick",
                    thickness_in: 8.0,
                    conductivity: 5.5,
                },
            },
            0.0,
            0.5,
            0.0,
        );
        let x = t.solve(6.0, 0.89);
        assert!((x - (6.0 - 0.89 - 0.5 / 0.8004)).abs() < 1e-12);
    }

    #[test]
    fn unreachable_target_is_non_positive() {
        // R10 rigid alone already exceeds an R-5 target
        let t = wood_stud_2x6(10.0);
        assert!(t.solve(5.0, films::exterior_wall()) <= 0.0);
    }
}
