//! Tab-separated system id -> equipment name mapping.

use hm_model::BuildingModel;

pub const HVAC_MAP_HEADER: &str = "System ID\tEquipment Name(s)";

/// One row per input system that created at least one equipment object, in
/// processing order. Names of a multi-object system are comma separated.
pub fn hvac_map_tsv(model: &BuildingModel) -> String {
    let mut out = String::from(HVAC_MAP_HEADER);
    out.push('\n');
    for (system_id, ids) in model.equipment_map.iter() {
        let names: Vec<&str> = ids
            .iter()
            .filter_map(|id| model.equipment.get(id.slot()))
            .map(|e| e.name.as_str())
            .collect();
        if names.is_empty() {
            continue;
        }
        out.push_str(system_id);
        out.push('\t');
        out.push_str(&names.join(", "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_input::Fuel;
    use hm_model::{EquipmentKind, ModelBuilder, Speeds};

    #[test]
    fn rows_follow_processing_order() {
        let mut builder = ModelBuilder::new("map");
        builder.add_equipment(
            "ac central air conditioner",
            Some("ac"),
            EquipmentKind::CentralAirConditioner {
                speeds: Speeds::One,
                seer: 13.0,
                fan_power_w_per_cfm: 0.365,
            },
        );
        builder.register_system("unused");
        builder.add_equipment(
            "gas furnace",
            Some("gas"),
            EquipmentKind::Furnace {
                fuel: Fuel::NaturalGas,
                afue: 0.8,
                attached_to: None,
            },
        );
        builder.add_equipment("ideal air loads", None, EquipmentKind::IdealLoads);
        let model = builder.build().unwrap();

        let tsv = hvac_map_tsv(&model);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(
            lines,
            [
                HVAC_MAP_HEADER,
                "ac\tac central air conditioner",
                "gas\tgas furnace"
            ]
        );
    }
}
