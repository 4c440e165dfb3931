//! Intent classification: map a travel reason to an optimization goal.
//!
//! Deterministic and total over every string; no LLM involved.

use serde::{Deserialize, Serialize};

use crate::reason::RouteReason;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationIntent {
    pub goal: String,
    pub algorithm_label: String,
}

pub const GOAL_QUICKEST: &str = "quickest route, minimal traffic delay";
pub const GOAL_FUEL: &str = "most fuel-efficient / shortest distance";
pub const GOAL_SCENIC: &str = "scenic leisure route";
pub const GOAL_DEFAULT: &str = "optimal route";

/// Classify a reason string. First match wins.
pub fn classify(reason: &str) -> OptimizationIntent {
    let (goal, algorithm) = match RouteReason::parse(reason) {
        RouteReason::Emergency | RouteReason::Quick => (GOAL_QUICKEST, "A*"),
        RouteReason::Fuel => (GOAL_FUEL, "Dijkstra"),
        RouteReason::Drive => (GOAL_SCENIC, "Custom"),
        RouteReason::Other => (GOAL_DEFAULT, "Dijkstra"),
    };

    OptimizationIntent {
        goal: goal.to_string(),
        algorithm_label: algorithm.to_string(),
    }
}
