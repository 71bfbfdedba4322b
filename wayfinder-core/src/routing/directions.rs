//! Human readable route instructions

use itertools::Itertools;

use super::segment::StairTransition;
use crate::{RoutingConfig, model::FloorId};

/// "Take {stair} to {floor}"
pub fn transition_instruction(transition: &StairTransition, config: &RoutingConfig) -> String {
    format!(
        "Take {} to {}",
        transition.stair_name,
        config.floor_display_name(&transition.to_floor)
    )
}

pub fn route_summary(
    start_floor: &FloorId,
    end_floor: &FloorId,
    transitions: &[StairTransition],
    config: &RoutingConfig,
) -> String {
    let from = config.floor_display_name(start_floor);
    let to = config.floor_display_name(end_floor);

    if transitions.is_empty() {
        format!("Route from {from} to {to} (no stairs needed).")
    } else {
        let via = transitions.iter().map(|t| t.stair_name.as_str()).join(" and ");
        format!("Route from {from} to {to} via {via}.")
    }
}
