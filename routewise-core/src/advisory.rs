//! Request and advisory types exchanged with callers.

use serde::{Deserialize, Serialize};

use crate::chart::ChartData;

pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_TRAFFIC_NOTE: &str = "No specific traffic information available";
pub const MAX_LANDMARKS: usize = 5;

/// Inbound travel request. Absent fields stay `None` and echo back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub pickup: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl RouteRequest {
    pub fn new(
        pickup: impl Into<String>,
        destination: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            pickup: Some(pickup.into()),
            destination: Some(destination.into()),
            reason: Some(reason.into()),
        }
    }

    /// The reason as seen by the classifier and synthesizer; empty when absent.
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }

    pub fn pickup(&self) -> &str {
        self.pickup.as_deref().unwrap_or("")
    }

    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or("")
    }
}

/// The route advisory returned for every request, on every path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAdvisory {
    pub pickup: Option<String>,
    pub destination: Option<String>,
    pub reason: Option<String>,
    pub description: String,
    pub distance: String,
    pub time: String,
    pub algorithm: String,
    pub landmarks: Vec<String>,
    pub traffic_notes: String,
    pub chart_data: ChartData,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteAdvisory {
    /// Overwrite the request echo fields and the timestamp.
    pub fn stamp(&mut self, request: &RouteRequest, timestamp: String) {
        self.pickup = request.pickup.clone();
        self.destination = request.destination.clone();
        self.reason = request.reason.clone();
        self.timestamp = timestamp;
    }
}

/// Trim, drop empty items and cap at [`MAX_LANDMARKS`].
pub fn tidy_landmarks<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| {
            s.as_ref()
                .trim()
                .trim_end_matches(['.', ',', ';'])
                .trim()
                .to_string()
        })
        .filter(|s| !s.is_empty())
        .take(MAX_LANDMARKS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::synthesize;
    use crate::jitter::NoJitter;

    #[test]
    fn test_request_missing_fields_deserialize_as_none() {
        let r: RouteRequest = serde_json::from_str(r#"{"pickup":"Mumbai Central"}"#).unwrap();
        assert_eq!(r.pickup.as_deref(), Some("Mumbai Central"));
        assert_eq!(r.destination, None);
        assert_eq!(r.reason(), "");
    }

    #[test]
    fn test_advisory_serializes_camel_case_and_null_echo() {
        let a = RouteAdvisory {
            pickup: None,
            destination: Some("BKC".to_string()),
            reason: Some("Quick".to_string()),
            description: "d".to_string(),
            distance: UNKNOWN.to_string(),
            time: UNKNOWN.to_string(),
            algorithm: "A*".to_string(),
            landmarks: vec![],
            traffic_notes: DEFAULT_TRAFFIC_NOTE.to_string(),
            chart_data: synthesize("Quick", "", &mut NoJitter),
            timestamp: "2026-02-21T05:59:00+00:00".to_string(),
            error: None,
        };
        let v = serde_json::to_value(&a).unwrap();
        assert!(v["pickup"].is_null());
        assert_eq!(v["trafficNotes"], DEFAULT_TRAFFIC_NOTE);
        assert!(v.get("chartData").is_some());
        assert!(v.get("error").is_none());
    }

    #[test]
    fn test_tidy_landmarks_caps_and_trims() {
        let out = tidy_landmarks([" Gate ", "", "Fort.", "Museum", "Park", "Lake", "Zoo", "Pier"]);
        assert_eq!(out, vec!["Gate", "Fort", "Museum", "Park", "Lake"]);
    }
}
