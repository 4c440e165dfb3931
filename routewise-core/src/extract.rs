//! Structured extraction: recover an advisory object from generator text.
//!
//! Order:
//! 1) a ```json fenced block, if present (a bad block is a miss, no retry on the raw text)
//! 2) otherwise the whole text as JSON
//!
//! Anything that does not decode into the expected field types is a miss.

use anyhow::Result;
use regex::Regex;
use serde::Deserialize;

use crate::advisory::{tidy_landmarks, RouteAdvisory, DEFAULT_TRAFFIC_NOTE, UNKNOWN};
use crate::chart::{self, PartialChartData};
use crate::jitter::Jitter;

/// Outcome of structured extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Hit(StructuredAdvisory),
    Miss,
}

/// Fields recovered from a structured response. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredAdvisory {
    pub description: Option<String>,
    pub distance: Option<String>,
    pub time: Option<String>,
    pub algorithm: Option<String>,
    pub landmarks: Option<Vec<String>>,
    pub traffic_notes: Option<String>,
    pub chart_data: Option<PartialChartData>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

impl TextOrNumber {
    fn into_text(self, unit: &str) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => format!("{n} {unit}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStructured {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    distance: Option<TextOrNumber>,
    #[serde(default)]
    time: Option<TextOrNumber>,
    #[serde(default)]
    algorithm: Option<String>,
    #[serde(default)]
    landmarks: Option<Vec<String>>,
    #[serde(default, alias = "traffic_notes")]
    traffic_notes: Option<String>,
    #[serde(default, alias = "chart_data")]
    chart_data: Option<PartialChartData>,
}

impl From<RawStructured> for StructuredAdvisory {
    fn from(raw: RawStructured) -> Self {
        Self {
            description: raw.description,
            distance: raw.distance.map(|d| d.into_text("kilometers")),
            time: raw.time.map(|t| t.into_text("minutes")),
            algorithm: raw.algorithm,
            landmarks: raw.landmarks,
            traffic_notes: raw.traffic_notes,
            chart_data: raw.chart_data,
        }
    }
}

pub struct StructuredExtractor {
    fence: Regex,
}

impl StructuredExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fence: Regex::new(r"(?s)```json\s*(.*?)```")?,
        })
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let candidate = match self.fence.captures(text) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            None => text,
        };

        match serde_json::from_str::<RawStructured>(candidate.trim()) {
            Ok(raw) => Extraction::Hit(raw.into()),
            Err(e) => {
                tracing::debug!(error = %e, "structured extraction missed");
                Extraction::Miss
            }
        }
    }
}

impl StructuredAdvisory {
    /// Build a complete advisory, backfilling every absent field.
    ///
    /// A supplied chart is overlaid on a fresh synthesis and clamped; an
    /// absent one is synthesized from `reason` and the description.
    pub fn into_advisory(
        self,
        reason: &str,
        algorithm_label: &str,
        jitter: &mut impl Jitter,
    ) -> RouteAdvisory {
        let description = self
            .description
            .unwrap_or_else(|| "No description provided".to_string());

        let synthesized = chart::synthesize(reason, &description, jitter);
        let chart_data = match self.chart_data {
            Some(partial) => partial.merge_over(synthesized, reason),
            None => synthesized,
        };

        RouteAdvisory {
            pickup: None,
            destination: None,
            reason: None,
            distance: self.distance.unwrap_or_else(|| UNKNOWN.to_string()),
            time: self.time.unwrap_or_else(|| UNKNOWN.to_string()),
            algorithm: self
                .algorithm
                .unwrap_or_else(|| algorithm_label.to_string()),
            landmarks: tidy_landmarks(self.landmarks.unwrap_or_default()),
            traffic_notes: self
                .traffic_notes
                .unwrap_or_else(|| DEFAULT_TRAFFIC_NOTE.to_string()),
            description,
            chart_data,
            timestamp: String::new(),
            error: None,
        }
    }
}
