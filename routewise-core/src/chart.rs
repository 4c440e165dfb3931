//! Chart data synthesis: bounded route metrics for client-side charts.
//!
//! Scores start from the reason's profile, get jittered, then nudged by
//! keywords in the descriptive text. Every step re-clamps, so the bounds
//! below hold for any input text and any jitter draw.

use serde::{Deserialize, Serialize};

use crate::jitter::Jitter;
use crate::reason::RouteReason;

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;
pub const RATING_MIN: f64 = 0.8;
pub const RATING_MAX: f64 = 1.5;

const SCORE_SPREAD: f64 = 1.0;
const RATING_SPREAD: f64 = 0.1;

/// Fixed relative fuel consumption per travel purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelConsumption {
    #[serde(rename = "Emergency")]
    pub emergency: f64,
    #[serde(rename = "Quick")]
    pub quick: f64,
    #[serde(rename = "Fuel")]
    pub fuel: f64,
    #[serde(rename = "Drive")]
    pub drive: f64,
}

impl FuelConsumption {
    pub fn table() -> Self {
        Self {
            emergency: RouteReason::Emergency.fuel_multiplier(),
            quick: RouteReason::Quick.fuel_multiplier(),
            fuel: RouteReason::Fuel.fuel_multiplier(),
            drive: RouteReason::Drive.fuel_multiplier(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub speed_score: f64,
    pub efficiency_score: f64,
    pub scenery_score: f64,
    pub safety_score: f64,
    pub simplicity_score: f64,
    pub traffic_score: f64,

    pub astar_speed_rating: f64,
    pub astar_optimality_rating: f64,
    pub dijkstra_speed_rating: f64,
    pub dijkstra_optimality_rating: f64,

    pub fuel_consumption: FuelConsumption,
    pub current_route_type: String,
    pub current_route_fuel_usage: f64,
}

impl ChartData {
    pub fn scores(&self) -> [f64; 6] {
        [
            self.speed_score,
            self.efficiency_score,
            self.scenery_score,
            self.safety_score,
            self.simplicity_score,
            self.traffic_score,
        ]
    }

    pub fn ratings(&self) -> [f64; 4] {
        [
            self.astar_speed_rating,
            self.astar_optimality_rating,
            self.dijkstra_speed_rating,
            self.dijkstra_optimality_rating,
        ]
    }

    /// True when every score and rating lies inside its bound.
    pub fn within_bounds(&self) -> bool {
        self.scores()
            .iter()
            .all(|s| (SCORE_MIN..=SCORE_MAX).contains(s))
            && self
                .ratings()
                .iter()
                .all(|r| (RATING_MIN..=RATING_MAX).contains(r))
    }

    /// Clamp and round every score and rating in place. NaN collapses to the floor.
    pub fn clamp(&mut self) {
        for s in [
            &mut self.speed_score,
            &mut self.efficiency_score,
            &mut self.scenery_score,
            &mut self.safety_score,
            &mut self.simplicity_score,
            &mut self.traffic_score,
        ] {
            *s = round_to(clamp_score(*s), 1);
        }

        for r in [
            &mut self.astar_speed_rating,
            &mut self.astar_optimality_rating,
            &mut self.dijkstra_speed_rating,
            &mut self.dijkstra_optimality_rating,
        ] {
            *r = round_to(clamp_rating(*r), 2);
        }
    }

    /// Re-derive the reason-dependent fields that upstream text may not override.
    fn stamp_reason(&mut self, reason: &str) {
        let parsed = RouteReason::parse(reason);
        self.fuel_consumption = FuelConsumption::table();
        self.current_route_type = reason.to_string();
        self.current_route_fuel_usage = parsed.fuel_multiplier();
    }
}

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        return SCORE_MIN;
    }
    v.clamp(SCORE_MIN, SCORE_MAX)
}

fn clamp_rating(v: f64) -> f64 {
    if v.is_nan() {
        return RATING_MIN;
    }
    v.clamp(RATING_MIN, RATING_MAX)
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

/// Synthesize a full chart for `reason`, nudged by keywords in `text`.
pub fn synthesize(reason: &str, text: &str, jitter: &mut impl Jitter) -> ChartData {
    let parsed = RouteReason::parse(reason);
    let profile = parsed.quality_profile();

    let mut jittered = |base: f64| clamp_score(base + jitter.offset(SCORE_SPREAD));
    let mut speed = jittered(profile.speed);
    let efficiency = jittered(profile.efficiency);
    let mut scenery = jittered(profile.scenery);
    let safety = jittered(profile.safety);
    let mut simplicity = jittered(profile.simplicity);
    let mut traffic = jittered(profile.traffic);

    let lower = text.to_lowercase();
    if lower.contains("direct") || lower.contains("shortest") {
        simplicity = clamp_score(simplicity + 1.0);
    }
    if lower.contains("congestion") || lower.contains("traffic") {
        traffic = clamp_score(traffic - 2.0);
    }
    if lower.contains("scenic") || lower.contains("beautiful") {
        scenery = clamp_score(scenery + 1.5);
    }
    if lower.contains("highway") || lower.contains("expressway") {
        speed = clamp_score(speed + 1.0);
    }

    let ratings = parsed.algorithm_ratings();
    let mut rated = |base: f64| clamp_rating(base + jitter.offset(RATING_SPREAD));

    let mut chart = ChartData {
        speed_score: speed,
        efficiency_score: efficiency,
        scenery_score: scenery,
        safety_score: safety,
        simplicity_score: simplicity,
        traffic_score: traffic,
        astar_speed_rating: rated(ratings.astar_speed),
        astar_optimality_rating: rated(ratings.astar_optimality),
        dijkstra_speed_rating: rated(ratings.dijkstra_speed),
        dijkstra_optimality_rating: rated(ratings.dijkstra_optimality),
        fuel_consumption: FuelConsumption::table(),
        current_route_type: String::new(),
        current_route_fuel_usage: 0.0,
    };
    chart.stamp_reason(reason);
    chart.clamp();
    chart
}

/// Chart values supplied by the generator. Any subset of keys may be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialChartData {
    pub speed_score: Option<f64>,
    pub efficiency_score: Option<f64>,
    pub scenery_score: Option<f64>,
    pub safety_score: Option<f64>,
    pub simplicity_score: Option<f64>,
    pub traffic_score: Option<f64>,
    pub astar_speed_rating: Option<f64>,
    pub astar_optimality_rating: Option<f64>,
    pub dijkstra_speed_rating: Option<f64>,
    pub dijkstra_optimality_rating: Option<f64>,
}

impl PartialChartData {
    /// Overlay the supplied values on `base`, then restamp the reason fields
    /// and clamp everything back into bounds.
    pub fn merge_over(self, mut base: ChartData, reason: &str) -> ChartData {
        let pairs = [
            (self.speed_score, &mut base.speed_score),
            (self.efficiency_score, &mut base.efficiency_score),
            (self.scenery_score, &mut base.scenery_score),
            (self.safety_score, &mut base.safety_score),
            (self.simplicity_score, &mut base.simplicity_score),
            (self.traffic_score, &mut base.traffic_score),
            (self.astar_speed_rating, &mut base.astar_speed_rating),
            (self.astar_optimality_rating, &mut base.astar_optimality_rating),
            (self.dijkstra_speed_rating, &mut base.dijkstra_speed_rating),
            (self.dijkstra_optimality_rating, &mut base.dijkstra_optimality_rating),
        ];
        for (supplied, slot) in pairs {
            if let Some(v) = supplied {
                *slot = v;
            }
        }

        base.stamp_reason(reason);
        base.clamp();
        base
    }
}
