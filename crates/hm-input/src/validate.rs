//! Structural validation of a building description.
//!
//! Every check runs; failures are collected rather than returned on the
//! first hit so a caller can report the whole list at once.

use crate::schema::{
    BuildingDescription, DistributionKind, FoundationWall, HeatingSystemKind, Insulation,
    InsulationSpec,
};
use hm_core::{Adjacency, SpaceType};
use std::collections::HashSet;
use std::fmt;

/// Latest schema version understood by this crate.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown location '{value}' for {id}.{field}")]
    UnknownLocation {
        id: String,
        field: String,
        value: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// All validation failures of one description, in discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for e in &self.0 {
            write!(f, "; {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_building(desc: &BuildingDescription) -> Result<(), ValidationErrors> {
    let mut v = Validator::default();

    if desc.version > LATEST_VERSION {
        v.push(ValidationError::UnsupportedVersion {
            version: desc.version,
        });
    }

    v.check_summary(desc);
    v.check_enclosure(desc);
    v.check_hvac(desc);

    if v.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(v.errors))
    }
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn push(&mut self, e: ValidationError) {
        self.errors.push(e);
    }

    fn invalid(&mut self, field: String, value: impl fmt::Display, reason: &str) {
        self.push(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        });
    }

    fn positive(&mut self, field: String, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.invalid(field, value, "must be positive and finite");
        }
    }

    fn non_negative(&mut self, field: String, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.invalid(field, value, "must be non-negative and finite");
        }
    }

    fn fraction(&mut self, field: String, value: f64) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            self.invalid(field, value, "must be in [0, 1]");
        }
    }

    fn azimuth(&mut self, field: String, value: Option<u32>) {
        if let Some(az) = value
            && az >= 360
        {
            self.invalid(field, az, "must be in [0, 360)");
        }
    }

    fn interior(&mut self, id: &str, value: &str) {
        if SpaceType::from_location(value).is_none() {
            self.push(ValidationError::UnknownLocation {
                id: id.to_string(),
                field: "interior_adjacent_to".to_string(),
                value: value.to_string(),
            });
        }
    }

    fn exterior(&mut self, id: &str, value: &str) {
        if Adjacency::from_location(value).is_none() {
            self.push(ValidationError::UnknownLocation {
                id: id.to_string(),
                field: "exterior_adjacent_to".to_string(),
                value: value.to_string(),
            });
        }
    }

    fn insulation(&mut self, id: &str, insulation: &Insulation) {
        match insulation.spec() {
            None => self.invalid(
                format!("{id}.insulation"),
                "assembly_r_value/layers",
                "exactly one of assembly_r_value or layers is required",
            ),
            Some(InsulationSpec::Assembly(r)) => {
                self.positive(format!("{id}.insulation.assembly_r_value"), r)
            }
            Some(InsulationSpec::Layered(layers)) => {
                self.non_negative(
                    format!("{id}.insulation.cavity_r_value"),
                    layers.cavity_r_value,
                );
                self.non_negative(
                    format!("{id}.insulation.continuous_r_value"),
                    layers.continuous_r_value,
                );
                self.fraction(
                    format!("{id}.insulation.framing_factor"),
                    layers.framing_factor,
                );
            }
        }
    }

    fn check_summary(&mut self, desc: &BuildingDescription) {
        let b = &desc.building;
        self.positive(
            "building.conditioned_floor_area".to_string(),
            b.conditioned_floor_area,
        );
        self.positive(
            "building.conditioned_building_volume".to_string(),
            b.conditioned_building_volume,
        );
        if b.number_of_conditioned_floors_above_grade == 0 {
            self.invalid(
                "building.number_of_conditioned_floors_above_grade".to_string(),
                0,
                "at least one floor above grade is required",
            );
        }
        if b.number_of_conditioned_floors_above_grade > b.number_of_conditioned_floors {
            self.invalid(
                "building.number_of_conditioned_floors_above_grade".to_string(),
                b.number_of_conditioned_floors_above_grade,
                "exceeds number_of_conditioned_floors",
            );
        }
        for (i, n) in b.neighbors.iter().enumerate() {
            self.azimuth(format!("building.neighbors[{i}].azimuth"), Some(n.azimuth));
            self.positive(format!("building.neighbors[{i}].distance"), n.distance);
        }
    }

    fn check_enclosure(&mut self, desc: &BuildingDescription) {
        let e = &desc.enclosure;
        let mut ids = HashSet::new();
        let mut unique = |v: &mut Self, id: &str| {
            if !ids.insert(id.to_string()) {
                v.push(ValidationError::DuplicateId {
                    id: id.to_string(),
                    context: "enclosure".to_string(),
                });
            }
        };

        for r in &e.roofs {
            unique(self, &r.id);
            self.interior(&r.id, &r.interior_adjacent_to);
            self.positive(format!("{}.area", r.id), r.area);
            self.non_negative(format!("{}.pitch", r.id), r.pitch);
            self.azimuth(format!("{}.azimuth", r.id), r.azimuth);
            self.fraction(format!("{}.solar_absorptance", r.id), r.solar_absorptance);
            self.fraction(format!("{}.emittance", r.id), r.emittance);
            self.insulation(&r.id, &r.insulation);
        }
        for w in &e.walls {
            unique(self, &w.id);
            self.interior(&w.id, &w.interior_adjacent_to);
            self.exterior(&w.id, &w.exterior_adjacent_to);
            self.positive(format!("{}.area", w.id), w.area);
            self.azimuth(format!("{}.azimuth", w.id), w.azimuth);
            self.fraction(format!("{}.solar_absorptance", w.id), w.solar_absorptance);
            self.fraction(format!("{}.emittance", w.id), w.emittance);
            self.insulation(&w.id, &w.insulation);
        }
        for r in &e.rim_joists {
            unique(self, &r.id);
            self.interior(&r.id, &r.interior_adjacent_to);
            self.exterior(&r.id, &r.exterior_adjacent_to);
            self.positive(format!("{}.area", r.id), r.area);
            self.azimuth(format!("{}.azimuth", r.id), r.azimuth);
            self.insulation(&r.id, &r.insulation);
        }
        for f in &e.frame_floors {
            unique(self, &f.id);
            self.interior(&f.id, &f.interior_adjacent_to);
            self.exterior(&f.id, &f.exterior_adjacent_to);
            self.positive(format!("{}.area", f.id), f.area);
            self.insulation(&f.id, &f.insulation);
        }
        for fw in &e.foundation_walls {
            unique(self, &fw.id);
            self.foundation_wall(fw);
        }
        for s in &e.slabs {
            unique(self, &s.id);
            self.interior(&s.id, &s.interior_adjacent_to);
            self.positive(format!("{}.area", s.id), s.area);
            self.non_negative(format!("{}.thickness", s.id), s.thickness);
            self.non_negative(format!("{}.exposed_perimeter", s.id), s.exposed_perimeter);
            self.non_negative(format!("{}.depth_below_grade", s.id), s.depth_below_grade);
            self.non_negative(
                format!("{}.perimeter_insulation_depth", s.id),
                s.perimeter_insulation_depth,
            );
            self.non_negative(
                format!("{}.under_slab_insulation_width", s.id),
                s.under_slab_insulation_width,
            );
            self.non_negative(
                format!("{}.perimeter_insulation_r_value", s.id),
                s.perimeter_insulation_r_value,
            );
            self.non_negative(
                format!("{}.under_slab_insulation_r_value", s.id),
                s.under_slab_insulation_r_value,
            );
            self.fraction(format!("{}.carpet_fraction", s.id), s.carpet_fraction);
            self.non_negative(format!("{}.carpet_r_value", s.id), s.carpet_r_value);
        }

        let wall_hosts: HashSet<&str> = e
            .walls
            .iter()
            .map(|w| w.id.as_str())
            .chain(e.foundation_walls.iter().map(|f| f.id.as_str()))
            .collect();
        let roof_ids: HashSet<&str> = e.roofs.iter().map(|r| r.id.as_str()).collect();

        for w in &e.windows {
            unique(self, &w.id);
            self.positive(format!("{}.area", w.id), w.area);
            self.azimuth(format!("{}.azimuth", w.id), Some(w.azimuth));
            self.positive(format!("{}.ufactor", w.id), w.ufactor);
            self.fraction(format!("{}.shgc", w.id), w.shgc);
            self.fraction(
                format!("{}.interior_shading_factor_summer", w.id),
                w.interior_shading_factor_summer,
            );
            self.fraction(
                format!("{}.interior_shading_factor_winter", w.id),
                w.interior_shading_factor_winter,
            );
            if !wall_hosts.contains(w.wall_idref.as_str()) {
                self.push(ValidationError::MissingReference {
                    id: w.wall_idref.clone(),
                    context: format!("window '{}' wall_idref", w.id),
                });
            }
            if let Some(o) = &w.overhangs {
                self.non_negative(format!("{}.overhangs.depth", w.id), o.depth);
                self.non_negative(
                    format!("{}.overhangs.distance_to_top_of_window", w.id),
                    o.distance_to_top_of_window,
                );
                if o.distance_to_bottom_of_window <= o.distance_to_top_of_window {
                    self.invalid(
                        format!("{}.overhangs.distance_to_bottom_of_window", w.id),
                        o.distance_to_bottom_of_window,
                        "must exceed distance_to_top_of_window",
                    );
                }
            }
        }
        for s in &e.skylights {
            unique(self, &s.id);
            self.positive(format!("{}.area", s.id), s.area);
            self.azimuth(format!("{}.azimuth", s.id), Some(s.azimuth));
            self.positive(format!("{}.ufactor", s.id), s.ufactor);
            self.fraction(format!("{}.shgc", s.id), s.shgc);
            if !roof_ids.contains(s.roof_idref.as_str()) {
                self.push(ValidationError::MissingReference {
                    id: s.roof_idref.clone(),
                    context: format!("skylight '{}' roof_idref", s.id),
                });
            }
        }
        for d in &e.doors {
            unique(self, &d.id);
            self.positive(format!("{}.area", d.id), d.area);
            self.azimuth(format!("{}.azimuth", d.id), Some(d.azimuth));
            self.positive(format!("{}.r_value", d.id), d.r_value);
            if !wall_hosts.contains(d.wall_idref.as_str()) {
                self.push(ValidationError::MissingReference {
                    id: d.wall_idref.clone(),
                    context: format!("door '{}' wall_idref", d.id),
                });
            }
        }
    }

    fn foundation_wall(&mut self, fw: &FoundationWall) {
        self.interior(&fw.id, &fw.interior_adjacent_to);
        self.exterior(&fw.id, &fw.exterior_adjacent_to);
        self.positive(format!("{}.height", fw.id), fw.height);
        self.positive(format!("{}.area", fw.id), fw.area);
        self.positive(format!("{}.thickness", fw.id), fw.thickness);
        self.azimuth(format!("{}.azimuth", fw.id), fw.azimuth);
        self.non_negative(format!("{}.depth_below_grade", fw.id), fw.depth_below_grade);
        if fw.depth_below_grade > fw.height {
            self.invalid(
                format!("{}.depth_below_grade", fw.id),
                fw.depth_below_grade,
                "must not exceed height",
            );
        }
        let ins = &fw.insulation;
        if let Some(r) = ins.assembly_r_value {
            self.positive(format!("{}.insulation.assembly_r_value", fw.id), r);
        }
        self.non_negative(format!("{}.insulation.r_value", fw.id), ins.r_value);
        self.non_negative(
            format!("{}.insulation.distance_to_bottom", fw.id),
            ins.distance_to_bottom,
        );
    }

    fn check_hvac(&mut self, desc: &BuildingDescription) {
        let hvac = &desc.hvac;
        let mut ids = HashSet::new();
        let mut dist_ids = HashSet::new();

        for d in &hvac.distributions {
            if !dist_ids.insert(d.id.as_str()) || !ids.insert(d.id.as_str()) {
                self.push(ValidationError::DuplicateId {
                    id: d.id.clone(),
                    context: "hvac".to_string(),
                });
            }
            match &d.kind {
                DistributionKind::Dse {
                    annual_heating_dse,
                    annual_cooling_dse,
                } => {
                    for (field, value) in [
                        ("annual_heating_dse", *annual_heating_dse),
                        ("annual_cooling_dse", *annual_cooling_dse),
                    ] {
                        if !value.is_finite() || value <= 0.0 || value > 1.0 {
                            self.invalid(format!("{}.{field}", d.id), value, "must be in (0, 1]");
                        }
                    }
                }
                DistributionKind::Air {
                    ducts,
                    leakage_measurements,
                } => {
                    for (i, duct) in ducts.iter().enumerate() {
                        self.positive(
                            format!("{}.ducts[{i}].surface_area", d.id),
                            duct.surface_area,
                        );
                        self.non_negative(
                            format!("{}.ducts[{i}].insulation_r_value", d.id),
                            duct.insulation_r_value,
                        );
                        if SpaceType::from_location(&duct.location).is_none() {
                            self.push(ValidationError::UnknownLocation {
                                id: format!("{}.ducts[{i}]", d.id),
                                field: "location".to_string(),
                                value: duct.location.clone(),
                            });
                        }
                    }
                    for (i, m) in leakage_measurements.iter().enumerate() {
                        self.non_negative(
                            format!("{}.leakage_measurements[{i}].value", d.id),
                            m.value,
                        );
                    }
                }
                DistributionKind::Hydronic => {}
            }
        }

        let check_ref = |v: &mut Self, id: &str, dist: &Option<String>| {
            if let Some(dist) = dist
                && !dist_ids.contains(dist.as_str())
            {
                v.push(ValidationError::MissingReference {
                    id: dist.clone(),
                    context: format!("'{id}' distribution_system_idref"),
                });
            }
        };

        let mut heat_sum = 0.0;
        let mut cool_sum = 0.0;

        for h in &hvac.heating_systems {
            if !ids.insert(h.id.as_str()) {
                self.push(ValidationError::DuplicateId {
                    id: h.id.clone(),
                    context: "hvac".to_string(),
                });
            }
            check_ref(self, &h.id, &h.distribution_system_idref);
            self.fraction(
                format!("{}.fraction_heat_load_served", h.id),
                h.fraction_heat_load_served,
            );
            heat_sum += h.fraction_heat_load_served;
            let efficiency = match h.kind {
                HeatingSystemKind::Furnace { afue }
                | HeatingSystemKind::WallFurnace { afue }
                | HeatingSystemKind::Boiler { afue } => afue,
                HeatingSystemKind::ElectricResistance { efficiency_percent }
                | HeatingSystemKind::Stove { efficiency_percent } => efficiency_percent,
            };
            self.positive(format!("{}.efficiency", h.id), efficiency);
        }
        for c in &hvac.cooling_systems {
            if !ids.insert(c.id.as_str()) {
                self.push(ValidationError::DuplicateId {
                    id: c.id.clone(),
                    context: "hvac".to_string(),
                });
            }
            check_ref(self, &c.id, &c.distribution_system_idref);
            self.fraction(
                format!("{}.fraction_cool_load_served", c.id),
                c.fraction_cool_load_served,
            );
            cool_sum += c.fraction_cool_load_served;
        }
        for hp in &hvac.heat_pumps {
            if !ids.insert(hp.id.as_str()) {
                self.push(ValidationError::DuplicateId {
                    id: hp.id.clone(),
                    context: "hvac".to_string(),
                });
            }
            check_ref(self, &hp.id, &hp.distribution_system_idref);
            self.fraction(
                format!("{}.fraction_heat_load_served", hp.id),
                hp.fraction_heat_load_served,
            );
            self.fraction(
                format!("{}.fraction_cool_load_served", hp.id),
                hp.fraction_cool_load_served,
            );
            heat_sum += hp.fraction_heat_load_served;
            cool_sum += hp.fraction_cool_load_served;
        }

        let limit = 1.0 + hm_core::LOAD_FRACTION_EPSILON;
        if heat_sum > limit {
            self.invalid(
                "hvac.fraction_heat_load_served".to_string(),
                heat_sum,
                "sum over systems exceeds 1",
            );
        }
        if cool_sum > limit {
            self.invalid(
                "hvac.fraction_cool_load_served".to_string(),
                cool_sum,
                "sum over systems exceeds 1",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn minimal() -> BuildingDescription {
        BuildingDescription {
            version: 1,
            name: "box".to_string(),
            building: BuildingSummary {
                conditioned_floor_area: 1000.0,
                conditioned_building_volume: 8000.0,
                number_of_conditioned_floors: 1,
                number_of_conditioned_floors_above_grade: 1,
                use_only_ideal_air_system: false,
                neighbors: vec![],
            },
            enclosure: Enclosure {
                walls: vec![Wall {
                    id: "wall1".to_string(),
                    exterior_adjacent_to: "outside".to_string(),
                    interior_adjacent_to: "living space".to_string(),
                    wall_type: WallType::WoodStud,
                    area: 1000.0,
                    azimuth: Some(0),
                    insulation: Insulation::assembly(13.0),
                    solar_absorptance: 0.7,
                    emittance: 0.9,
                }],
                ..Default::default()
            },
            hvac: HvacSystems::default(),
        }
    }

    #[test]
    fn minimal_description_is_valid() {
        assert!(validate_building(&minimal()).is_ok());
    }

    #[test]
    fn errors_accumulate() {
        let mut desc = minimal();
        desc.version = 99;
        desc.enclosure.walls[0].area = -1.0;
        desc.enclosure.walls[0].interior_adjacent_to = "kitchen".to_string();
        desc.enclosure.walls.push(desc.enclosure.walls[0].clone());

        let errs = validate_building(&desc).unwrap_err();
        // version, two bad areas, two bad locations, one duplicate
        assert_eq!(errs.len(), 6);
        assert!(
            errs.iter()
                .any(|e| matches!(e, ValidationError::DuplicateId { id, .. } if id == "wall1"))
        );
    }

    #[test]
    fn insulation_requires_exactly_one_form() {
        let mut desc = minimal();
        desc.enclosure.walls[0].insulation = Insulation::default();
        assert!(validate_building(&desc).is_err());

        desc.enclosure.walls[0].insulation = Insulation {
            assembly_r_value: Some(13.0),
            layers: Some(LayeredInsulation {
                cavity_r_value: 13.0,
                continuous_r_value: 0.0,
                framing_factor: 0.25,
            }),
        };
        assert!(validate_building(&desc).is_err());
    }

    #[test]
    fn dangling_window_host_is_reported() {
        let mut desc = minimal();
        desc.enclosure.windows.push(Window {
            id: "win1".to_string(),
            area: 20.0,
            azimuth: 0,
            ufactor: 0.3,
            shgc: 0.4,
            wall_idref: "nowhere".to_string(),
            overhangs: None,
            interior_shading_factor_summer: 0.7,
            interior_shading_factor_winter: 0.85,
        });
        let errs = validate_building(&desc).unwrap_err();
        assert!(matches!(
            &errs.0[0],
            ValidationError::MissingReference { id, .. } if id == "nowhere"
        ));
    }

    #[test]
    fn load_fraction_sum_is_bounded() {
        let mut desc = minimal();
        for (i, frac) in [0.6, 0.5].into_iter().enumerate() {
            desc.hvac.cooling_systems.push(CoolingSystem {
                id: format!("ac{i}"),
                distribution_system_idref: None,
                kind: CoolingSystemKind::RoomAirConditioner { eer: 10.0 },
                cooling_capacity: None,
                fraction_cool_load_served: frac,
            });
        }
        let errs = validate_building(&desc).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs.messages()[0].contains("fraction_cool_load_served"));
    }

    #[test]
    fn dse_out_of_range() {
        let mut desc = minimal();
        desc.hvac.distributions.push(HvacDistribution {
            id: "dse".to_string(),
            kind: DistributionKind::Dse {
                annual_heating_dse: 1.2,
                annual_cooling_dse: 0.8,
            },
        });
        assert!(validate_building(&desc).is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn with_cooling(fractions: &[f64]) -> BuildingDescription {
            let mut desc = minimal();
            for (i, frac) in fractions.iter().enumerate() {
                desc.hvac.cooling_systems.push(CoolingSystem {
                    id: format!("ac{i}"),
                    distribution_system_idref: None,
                    kind: CoolingSystemKind::RoomAirConditioner { eer: 10.0 },
                    cooling_capacity: None,
                    fraction_cool_load_served: *frac,
                });
            }
            desc
        }

        proptest! {
            #[test]
            fn fractions_within_one_validate(weights in prop::collection::vec(0.01f64..1.0, 1..6)) {
                let total: f64 = weights.iter().sum();
                let fractions: Vec<f64> = weights.iter().map(|w| w / total).collect();
                prop_assert!(validate_building(&with_cooling(&fractions)).is_ok());
            }

            #[test]
            fn fractions_over_one_are_rejected(weights in prop::collection::vec(0.01f64..1.0, 2..6)) {
                let total: f64 = weights.iter().sum();
                // scale so the sum is 1.05 while each entry stays below 1
                let fractions: Vec<f64> = weights.iter().map(|w| 1.05 * w / total).collect();
                prop_assume!(fractions.iter().all(|f| *f <= 1.0));
                prop_assert!(validate_building(&with_cooling(&fractions)).is_err());
            }
        }
    }
}
