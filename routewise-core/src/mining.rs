//! Fallback text miner: best-effort field recovery from free text.
//!
//! Used only when structured extraction misses. Fields with no match get
//! placeholder values; nothing here fails.
//!
//! Expected shape (loosely):
//!   "... 42.5 kilometers ... 30-45 minutes ...
//!    Landmarks: - Old Bridge - City Park.
//!    Traffic: heavy near downtown."

use anyhow::Result;
use regex::Regex;

use crate::advisory::{tidy_landmarks, RouteAdvisory, DEFAULT_TRAFFIC_NOTE, UNKNOWN};
use crate::chart;
use crate::jitter::Jitter;

const DESCRIPTION_LIMIT: usize = 500;

pub struct TextMiner {
    distance_re: Regex,
    time_re: Regex,
    landmarks_re: Regex,
    bullet_re: Regex,
    sentence_re: Regex,
    traffic_re: Regex,
}

impl TextMiner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            distance_re: Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*kilometers?")?,
            time_re: Regex::new(r"(?i)(\d+(?:\s*[-–]\s*\d+)?)\s*minutes")?,
            landmarks_re: Regex::new(r"(?is)landmarks?:(.*?)(?:traffic|\z)")?,
            // "- item", "• item", "* item" anywhere; "1. item", "2) item" only at line start
            bullet_re: Regex::new(r"(?m)(?:(?:^|\s)[-•*]|^\s*\d+[.)])\s+")?,
            sentence_re: Regex::new(r"\.(?:\s+|\z)")?,
            traffic_re: Regex::new(r"(?is)traffic[^:\n.]*:\s*(.*?)(?:\n\s*\n|\z)")?,
        })
    }

    /// First "<n> kilometer(s)", normalized to "<n> kilometers".
    pub fn distance(&self, text: &str) -> String {
        self.distance_re
            .captures(text)
            .map(|caps| format!("{} kilometers", &caps[1]))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// First "<n> minutes" or "<n>-<m> minutes", number kept verbatim.
    pub fn time(&self, text: &str) -> String {
        self.time_re
            .captures(text)
            .map(|caps| format!("{} minutes", &caps[1]))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Items from the "Landmarks:" section, up to the next "traffic" or end of text.
    pub fn landmarks(&self, text: &str) -> Vec<String> {
        let Some(caps) = self.landmarks_re.captures(text) else {
            return Vec::new();
        };
        let section = caps.get(1).map_or("", |m| m.as_str()).trim();
        if section.is_empty() {
            return Vec::new();
        }

        if self.bullet_re.is_match(section) {
            // The chunk before the first marker is an item unless it is a
            // lead-in such as "Along the way you will pass:".
            let items = self
                .bullet_re
                .split(section)
                .enumerate()
                .filter(|(i, item)| *i > 0 || !item.trim_end().ends_with(':'))
                .map(|(_, item)| item);
            return tidy_landmarks(items);
        }

        tidy_landmarks(self.sentence_re.split(section))
    }

    /// The "Traffic ...:" section up to a blank line or end of text. The header
    /// must reach its colon within one sentence.
    pub fn traffic_notes(&self, text: &str) -> String {
        self.traffic_re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_TRAFFIC_NOTE.to_string())
    }

    /// Mine a full advisory from `text`. Request echo fields and the
    /// timestamp are left for the caller to stamp.
    pub fn mine(
        &self,
        text: &str,
        reason: &str,
        algorithm_label: &str,
        jitter: &mut impl Jitter,
    ) -> RouteAdvisory {
        RouteAdvisory {
            pickup: None,
            destination: None,
            reason: None,
            description: describe(text),
            distance: self.distance(text),
            time: self.time(text),
            algorithm: algorithm_label.to_string(),
            landmarks: self.landmarks(text),
            traffic_notes: self.traffic_notes(text),
            chart_data: chart::synthesize(reason, text, jitter),
            timestamp: String::new(),
            error: None,
        }
    }
}

/// First 500 characters, with "..." when truncated.
pub fn describe(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::NoJitter;

    const SAMPLE: &str = "The trip is 42.5 kilometers and takes 30-45 minutes. \
Landmarks: - Old Bridge - City Park. Traffic: heavy near downtown.";

    fn miner() -> TextMiner {
        TextMiner::new().unwrap()
    }

    #[test]
    fn test_mine_sample_text() {
        let m = miner();
        let a = m.mine(SAMPLE, "Quick", "A*", &mut NoJitter);
        assert_eq!(a.distance, "42.5 kilometers");
        assert!(a.time.contains("30-45"));
        assert!(a.time.contains("minutes"));
        assert_eq!(a.landmarks, vec!["Old Bridge", "City Park"]);
        assert!(a.traffic_notes.contains("heavy near downtown"));
        assert_eq!(a.algorithm, "A*");
        assert_eq!(a.description, SAMPLE);
        // "traffic" appears in the text
        assert_eq!(a.chart_data.traffic_score, 5.0);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let m = miner();
        let a = m.mine("Head north and keep going.", "", "Dijkstra", &mut NoJitter);
        assert_eq!(a.distance, UNKNOWN);
        assert_eq!(a.time, UNKNOWN);
        assert!(a.landmarks.is_empty());
        assert_eq!(a.traffic_notes, DEFAULT_TRAFFIC_NOTE);
        assert!(a.chart_data.within_bounds());
    }

    #[test]
    fn test_distance_singular_and_case() {
        let m = miner();
        assert_eq!(m.distance("About 1 Kilometer away"), "1 kilometers");
        assert_eq!(m.distance("roughly 7.25 KILOMETERS"), "7.25 kilometers");
    }

    #[test]
    fn test_time_single_value() {
        let m = miner();
        assert_eq!(m.time("It takes 25 Minutes by car"), "25 minutes");
        assert_eq!(m.time("between 10 - 15 minutes"), "10 - 15 minutes");
        assert_eq!(m.time("about 30–45 minutes"), "30–45 minutes");
    }

    #[test]
    fn test_inline_first_landmark_is_kept() {
        let m = miner();
        assert_eq!(
            m.landmarks("Landmarks: Gateway of India - Marine Drive - Haji Ali. Traffic: light"),
            vec!["Gateway of India", "Marine Drive", "Haji Ali"]
        );
        assert_eq!(
            m.landmarks("Landmarks: Gateway of India\n- Marine Drive\n- Haji Ali\n"),
            vec!["Gateway of India", "Marine Drive", "Haji Ali"]
        );
    }

    #[test]
    fn test_lead_in_before_list_is_dropped() {
        let text = "Landmarks: Along the way you will pass:\n- Old Bridge\n- City Park";
        assert_eq!(miner().landmarks(text), vec!["Old Bridge", "City Park"]);
    }

    #[test]
    fn test_year_in_prose_is_not_a_list_marker() {
        let text = "Landmarks: The old fort, built in 1850. The city museum.";
        assert_eq!(
            miner().landmarks(text),
            vec!["The old fort, built in 1850", "The city museum"]
        );
    }

    #[test]
    fn test_traffic_in_prose_is_not_a_header() {
        let text = "Expect light traffic. Landmarks: - Old Bridge - City Park. \
Traffic notes: heavy near downtown.";
        let m = miner();
        assert_eq!(m.traffic_notes(text), "heavy near downtown.");
        assert_eq!(m.landmarks(text), vec!["Old Bridge", "City Park"]);
    }

    #[test]
    fn test_numbered_landmarks_on_lines() {
        let text = "Landmarks:\n1. Gateway of India\n2. Marine Drive\n3) Haji Ali\n\nTraffic notes: moderate";
        assert_eq!(
            miner().landmarks(text),
            vec!["Gateway of India", "Marine Drive", "Haji Ali"]
        );
    }

    #[test]
    fn test_landmarks_sentence_fallback_and_cap() {
        let text = "Landmark: Fort. Museum. Park. Lake. Zoo. Pier. Tower.";
        assert_eq!(
            miner().landmarks(text),
            vec!["Fort", "Museum", "Park", "Lake", "Zoo"]
        );
    }

    #[test]
    fn test_bullet_glyph_landmarks() {
        let text = "Landmarks:\n• Siddhivinayak Temple\n• Worli Sea Face\nTraffic: light";
        assert_eq!(
            miner().landmarks(text),
            vec!["Siddhivinayak Temple", "Worli Sea Face"]
        );
    }

    #[test]
    fn test_traffic_section_stops_at_blank_line() {
        let text = "Traffic conditions: slow at the toll plaza\nexpect delays\n\nEnjoy the ride!";
        assert_eq!(
            miner().traffic_notes(text),
            "slow at the toll plaza\nexpect delays"
        );
    }

    #[test]
    fn test_describe_truncates_on_char_boundary() {
        let long = "é".repeat(600);
        let d = describe(&long);
        assert!(d.ends_with("..."));
        assert_eq!(d.chars().count(), 503);
        assert_eq!(describe("short"), "short");
    }
}
