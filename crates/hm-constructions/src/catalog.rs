//! Prioritized construction catalogs.
//!
//! Each list is ordered from most to least insulated; the resolver takes the
//! first entry whose unknown layer comes out positive. Every list ends with a
//! near-empty fallback that can reach almost any target.

use crate::assembly::Assembly;
use crate::materials::{
    BRICK_CONDUCTIVITY, CONCRETE_CONDUCTIVITY, ExteriorFinish, Material, SOIL_CONDUCTIVITY,
    STONE_CONDUCTIVITY, STRAW_BALE_CONDUCTIVITY, Stud, WOOD_CONDUCTIVITY,
};
use crate::template::{ConstructionTemplate, Framing, GenericMaterial};
use hm_input::WallType;

/// Rigid insulation that makes an adiabatic surface effectively opaque to heat.
const ADIABATIC_RIGID_R: f64 = 999.0;

const STEEL_CORRECTION: f64 = 0.45;
const SIP_SHEATHING: f64 = 0.44;

fn wood_stud(stud: Stud, framing_factor: f64) -> Framing {
    Framing::WoodStud {
        stud,
        framing_factor,
    }
}

/// Mass layer for a wall type with no framing.
pub fn generic_material(wall_type: WallType) -> Option<GenericMaterial> {
    let (name, thickness_in, conductivity) = match wall_type {
        WallType::SolidConcrete => ("solid concrete", 6.0, CONCRETE_CONDUCTIVITY),
        WallType::StructuralBrick => ("structural brick", 8.0, BRICK_CONDUCTIVITY),
        WallType::StrawBale => ("straw bale", 23.0, STRAW_BALE_CONDUCTIVITY),
        WallType::Stone => ("stone", 6.0, STONE_CONDUCTIVITY),
        WallType::LogWall => ("log", 6.0, WOOD_CONDUCTIVITY),
        _ => return None,
    };
    Some(GenericMaterial {
        name,
        thickness_in,
        conductivity,
    })
}

/// Above-grade wall catalog for a wall type.
pub fn wall(
    wall_type: WallType,
    drywall_in: f64,
    exterior: Option<ExteriorFinish>,
) -> Vec<ConstructionTemplate> {
    let t = |framing, rigid_r, osb_in| {
        ConstructionTemplate::new(framing, rigid_r, osb_in, drywall_in).with_exterior(exterior)
    };
    let fallback = |framing| ConstructionTemplate::new(framing, 0.0, 0.0, 0.0);

    match wall_type {
        WallType::WoodStud => vec![
            t(wood_stud(Stud::TwoBySix, 0.20), 10.0, 0.5),
            t(wood_stud(Stud::TwoBySix, 0.20), 5.0, 0.5),
            t(wood_stud(Stud::TwoBySix, 0.20), 0.0, 0.5),
            t(wood_stud(Stud::TwoByFour, 0.23), 0.0, 0.5),
            fallback(wood_stud(Stud::TwoByFour, 0.01)),
        ],
        WallType::SteelFrame => {
            let steel = |depth, ff, correction| Framing::SteelStud {
                cavity_depth_in: depth,
                framing_factor: ff,
                correction,
            };
            vec![
                t(steel(5.5, 0.20, STEEL_CORRECTION), 10.0, 0.5),
                t(steel(5.5, 0.20, STEEL_CORRECTION), 5.0, 0.5),
                t(steel(5.5, 0.20, STEEL_CORRECTION), 0.0, 0.5),
                t(steel(3.5, 0.23, STEEL_CORRECTION), 0.0, 0.5),
                fallback(steel(3.5, 0.01, 1.0)),
            ]
        }
        WallType::DoubleWoodStud => vec![
            t(
                Framing::DoubleStud {
                    stud: Stud::TwoByFour,
                    framing_factor: 0.23,
                    spacing_in: 24.0,
                },
                0.0,
                0.5,
            ),
            fallback(Framing::DoubleStud {
                stud: Stud::TwoByFour,
                framing_factor: 0.01,
                spacing_in: 16.0,
            }),
        ],
        WallType::ConcreteMasonryUnit => vec![
            t(
                Framing::Cmu {
                    thickness_in: 8.0,
                    conductivity: 1.4,
                    framing_factor: 0.08,
                },
                0.0,
                0.5,
            ),
            fallback(Framing::Cmu {
                thickness_in: 6.0,
                conductivity: 5.29,
                framing_factor: 0.01,
            }),
        ],
        WallType::StructurallyInsulatedPanel => {
            let sip = |thickness_in, ff| Framing::Sip {
                thickness_in,
                framing_factor: ff,
                sheathing_in: SIP_SHEATHING,
            };
            vec![
                t(sip(10.0, 0.16), 0.0, 0.0),
                t(sip(5.0, 0.16), 0.0, 0.0),
                fallback(sip(1.0, 0.01)),
            ]
        }
        WallType::InsulatedConcreteForms => vec![
            t(
                Framing::Icf {
                    insulation_in: 2.0,
                    concrete_in: 4.0,
                    framing_factor: 0.08,
                },
                0.0,
                0.5,
            ),
            fallback(Framing::Icf {
                insulation_in: 1.0,
                concrete_in: 1.0,
                framing_factor: 0.01,
            }),
        ],
        WallType::SolidConcrete
        | WallType::StructuralBrick
        | WallType::StrawBale
        | WallType::Stone
        | WallType::LogWall => match generic_material(wall_type) {
            Some(material) => vec![
                t(Framing::Generic { material }, 10.0, 0.5),
                t(Framing::Generic { material }, 0.0, 0.5),
                fallback(Framing::Generic { material }),
            ],
            None => Vec::new(),
        },
    }
}

pub fn roof(drywall_in: f64) -> Vec<ConstructionTemplate> {
    let shingles = Some(ExteriorFinish::AsphaltShingles);
    let t = |stud, ff, rigid_r, osb_in, drywall_in| {
        ConstructionTemplate::new(wood_stud(stud, ff), rigid_r, osb_in, drywall_in)
            .with_exterior(shingles)
    };
    vec![
        t(Stud::TwoByEight, 0.07, 10.0, 0.75, drywall_in),
        t(Stud::TwoByEight, 0.07, 5.0, 0.75, drywall_in),
        t(Stud::TwoByEight, 0.07, 0.0, 0.75, drywall_in),
        t(Stud::TwoBySix, 0.07, 0.0, 0.75, drywall_in),
        t(Stud::TwoByFour, 0.07, 0.0, 0.5, drywall_in),
        t(Stud::TwoByFour, 0.01, 0.0, 0.0, 0.0),
    ]
}

pub fn rim_joist(drywall_in: f64, exterior: Option<ExteriorFinish>) -> Vec<ConstructionTemplate> {
    let t = |rigid_r| {
        ConstructionTemplate::new(wood_stud(Stud::TwoByTwo, 0.17), rigid_r, 2.0, drywall_in)
            .with_exterior(exterior)
    };
    vec![
        t(10.0),
        t(5.0),
        t(0.0),
        ConstructionTemplate::new(wood_stud(Stud::TwoByTwo, 0.01), 0.0, 0.0, 0.0),
    ]
}

/// Frame floors carry the floor covering on their exterior side and no drywall.
pub fn frame_floor() -> Vec<ConstructionTemplate> {
    let covering = Some(ExteriorFinish::FloorCovering);
    let t = |stud, ff, rigid_r, osb_in| {
        ConstructionTemplate::new(wood_stud(stud, ff), rigid_r, osb_in, 0.0).with_exterior(covering)
    };
    vec![
        t(Stud::TwoBySix, 0.10, 10.0, 0.75),
        t(Stud::TwoBySix, 0.10, 0.0, 0.75),
        t(Stud::TwoByFour, 0.13, 0.0, 0.5),
        ConstructionTemplate::new(wood_stud(Stud::TwoByFour, 0.01), 0.0, 0.0, 0.0),
    ]
}

pub fn adiabatic_wall(film_r: f64) -> Assembly {
    ConstructionTemplate::new(
        wood_stud(Stud::TwoByFour, 0.1),
        ADIABATIC_RIGID_R,
        0.0,
        0.5,
    )
    .with_exterior(Some(ExteriorFinish::WoodSiding))
    .assemble("AdiabaticWallConstruction", 0.0, film_r)
}

pub fn adiabatic_floor(film_r: f64) -> Assembly {
    ConstructionTemplate::new(
        wood_stud(Stud::TwoBySix, 0.07),
        ADIABATIC_RIGID_R,
        0.75,
        0.0,
    )
    .with_exterior(Some(ExteriorFinish::FloorCovering))
    .assemble("AdiabaticFloorConstruction", 0.0, film_r)
}

pub fn adiabatic_roof(film_r: f64) -> Assembly {
    ConstructionTemplate::new(
        wood_stud(Stud::TwoByEight, 0.07),
        ADIABATIC_RIGID_R,
        0.75,
        0.0,
    )
    .with_exterior(Some(ExteriorFinish::AsphaltShingles))
    .assemble("AdiabaticRoofConstruction", 0.0, film_r)
}

/// Below-grade wall construction. Its insulation lives in the linked
/// foundation object, so the stack is only concrete and optional drywall.
pub fn foundation_wall(name: impl Into<String>, concrete_in: f64, drywall_in: f64) -> Assembly {
    let mut assembly = Assembly::new(name, "foundation wall", crate::films::ground_wall())
        .with_layer(Material::concrete(concrete_in));
    if drywall_in > 0.0 {
        assembly = assembly.with_layer(Material::gypsum(drywall_in));
    }
    assembly.with_surface(0.75, 0.9)
}

/// Slab construction: optional whole-slab rigid insulation, the slab itself
/// (a thin soil layer for dirt floors) and an optional partial carpet layer.
pub fn slab(
    name: impl Into<String>,
    thickness_in: f64,
    whole_slab_r: f64,
    carpet_fraction: f64,
    carpet_r: f64,
) -> Assembly {
    let mut assembly = Assembly::new(name, "slab", 0.0);
    if whole_slab_r > 0.0 {
        assembly = assembly.with_layer(Material::resistance("slab rigid insulation", whole_slab_r));
    }
    assembly = if thickness_in > 0.0 {
        assembly.with_layer(Material::concrete(thickness_in))
    } else {
        assembly.with_layer(Material::solid("soil", 0.5, SOIL_CONDUCTIVITY))
    };
    if carpet_fraction > 0.0 && carpet_r > 0.0 {
        assembly = assembly.with_layer(Material::resistance("carpet", carpet_fraction * carpet_r));
    }
    assembly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::films;

    #[test]
    fn every_wall_type_has_a_catalog() {
        for wall_type in [
            WallType::WoodStud,
            WallType::SteelFrame,
            WallType::DoubleWoodStud,
            WallType::ConcreteMasonryUnit,
            WallType::StructurallyInsulatedPanel,
            WallType::InsulatedConcreteForms,
            WallType::SolidConcrete,
            WallType::StructuralBrick,
            WallType::StrawBale,
            WallType::Stone,
            WallType::LogWall,
        ] {
            let catalog = wall(wall_type, 0.5, Some(ExteriorFinish::WoodSiding));
            assert!(catalog.len() >= 2, "{wall_type:?}");
            let last = catalog.last().map(|t| t.exterior);
            assert_eq!(last, Some(None), "fallback has no finish for {wall_type:?}");
        }
    }

    #[test]
    fn adiabatic_surfaces_are_nearly_opaque() {
        assert!(adiabatic_wall(films::interior_wall()).realized_r() > 900.0);
        assert!(adiabatic_floor(films::frame_floor()).realized_r() > 900.0);
        assert!(adiabatic_roof(films::roof_assembly(6.0)).realized_r() > 900.0);
    }

    #[test]
    fn slab_layers() {
        assert_eq!(slab("s", 4.0, 0.0, 0.0, 2.5).continuous.len(), 1);
        assert_eq!(slab("s", 4.0, 0.0, 0.8, 0.0).continuous.len(), 1);
        let carpeted = slab("s", 4.0, 0.0, 0.8, 2.5);
        assert!((carpeted.realized_r() - (4.0 / 12.5 + 2.0)).abs() < 1e-12);
        let dirt = slab("s", 0.0, 0.0, 0.0, 0.0);
        assert_eq!(dirt.continuous[0].name, "soil");
        assert_eq!(slab("s", 4.0, 10.0, 0.0, 0.0).continuous.len(), 2);
    }
}
