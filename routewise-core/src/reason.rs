//! Travel purposes and the constant profiles attached to each of them.

use serde::{Deserialize, Serialize};

/// Recognized travel purposes. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteReason {
    Emergency,
    Quick,
    Fuel,
    Drive,
    Other,
}

/// Baseline quality scores for a travel purpose, before jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    pub speed: f64,
    pub efficiency: f64,
    pub scenery: f64,
    pub safety: f64,
    pub simplicity: f64,
    pub traffic: f64,
}

/// Baseline A* / Dijkstra comparison ratings, before jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmRatings {
    pub astar_speed: f64,
    pub astar_optimality: f64,
    pub dijkstra_speed: f64,
    pub dijkstra_optimality: f64,
}

impl RouteReason {
    /// Case-sensitive exact match; unknown and empty strings map to `Other`.
    pub fn parse(reason: &str) -> Self {
        match reason {
            "Emergency" => RouteReason::Emergency,
            "Quick" => RouteReason::Quick,
            "Fuel" => RouteReason::Fuel,
            "Drive" => RouteReason::Drive,
            _ => RouteReason::Other,
        }
    }

    pub fn quality_profile(&self) -> QualityProfile {
        match self {
            // Speed and traffic awareness over scenery
            RouteReason::Emergency => QualityProfile {
                speed: 9.0,
                efficiency: 6.0,
                scenery: 3.0,
                safety: 7.0,
                simplicity: 7.0,
                traffic: 8.0,
            },
            RouteReason::Quick => QualityProfile {
                speed: 8.0,
                efficiency: 7.0,
                scenery: 4.0,
                safety: 7.0,
                simplicity: 7.0,
                traffic: 7.0,
            },
            RouteReason::Fuel => QualityProfile {
                speed: 5.0,
                efficiency: 9.0,
                scenery: 5.0,
                safety: 8.0,
                simplicity: 6.0,
                traffic: 6.0,
            },
            RouteReason::Drive => QualityProfile {
                speed: 4.0,
                efficiency: 5.0,
                scenery: 9.0,
                safety: 8.0,
                simplicity: 5.0,
                traffic: 5.0,
            },
            RouteReason::Other => QualityProfile {
                speed: 6.0,
                efficiency: 6.0,
                scenery: 6.0,
                safety: 7.0,
                simplicity: 6.0,
                traffic: 6.0,
            },
        }
    }

    pub fn algorithm_ratings(&self) -> AlgorithmRatings {
        match self {
            RouteReason::Emergency => AlgorithmRatings {
                astar_speed: 1.4,
                astar_optimality: 1.0,
                dijkstra_speed: 1.0,
                dijkstra_optimality: 1.2,
            },
            RouteReason::Quick => AlgorithmRatings {
                astar_speed: 1.3,
                astar_optimality: 1.1,
                dijkstra_speed: 1.0,
                dijkstra_optimality: 1.2,
            },
            RouteReason::Fuel => AlgorithmRatings {
                astar_speed: 1.1,
                astar_optimality: 1.2,
                dijkstra_speed: 0.9,
                dijkstra_optimality: 1.4,
            },
            RouteReason::Drive => AlgorithmRatings {
                astar_speed: 1.0,
                astar_optimality: 1.1,
                dijkstra_speed: 1.0,
                dijkstra_optimality: 1.2,
            },
            RouteReason::Other => AlgorithmRatings {
                astar_speed: 1.2,
                astar_optimality: 1.0,
                dijkstra_speed: 1.0,
                dijkstra_optimality: 1.1,
            },
        }
    }

    /// Relative fuel consumption multiplier.
    pub fn fuel_multiplier(&self) -> f64 {
        match self {
            RouteReason::Emergency => 1.3,
            RouteReason::Quick => 1.2,
            RouteReason::Fuel => 1.0,
            RouteReason::Drive => 1.5,
            RouteReason::Other => 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact_and_case_sensitive() {
        assert_eq!(RouteReason::parse("Emergency"), RouteReason::Emergency);
        assert_eq!(RouteReason::parse("Quick"), RouteReason::Quick);
        assert_eq!(RouteReason::parse("Fuel"), RouteReason::Fuel);
        assert_eq!(RouteReason::parse("Drive"), RouteReason::Drive);
        assert_eq!(RouteReason::parse("fuel"), RouteReason::Other);
        assert_eq!(RouteReason::parse(" Quick"), RouteReason::Other);
        assert_eq!(RouteReason::parse(""), RouteReason::Other);
    }

    #[test]
    fn test_fuel_multipliers() {
        assert_eq!(RouteReason::Emergency.fuel_multiplier(), 1.3);
        assert_eq!(RouteReason::Quick.fuel_multiplier(), 1.2);
        assert_eq!(RouteReason::Fuel.fuel_multiplier(), 1.0);
        assert_eq!(RouteReason::Drive.fuel_multiplier(), 1.5);
        assert_eq!(RouteReason::Other.fuel_multiplier(), 1.2);
    }

    #[test]
    fn test_default_profile_is_neutral() {
        let p = RouteReason::Other.quality_profile();
        assert_eq!(p.speed, 6.0);
        assert_eq!(p.safety, 7.0);
        assert_eq!(p.traffic, 6.0);
    }

    #[test]
    fn test_emergency_favors_speed_over_scenery() {
        let p = RouteReason::Emergency.quality_profile();
        assert!(p.speed > p.scenery);
        assert!(p.traffic > p.scenery);
    }
}
