//! Advisory assembly: classify, generate, extract, fall back, stamp.
//!
//! Every path ends in a complete advisory. Generator failures become an
//! `error` field, never an `Err`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::advisory::{RouteAdvisory, RouteRequest, DEFAULT_TRAFFIC_NOTE, UNKNOWN};
use crate::chart;
use crate::extract::{Extraction, StructuredExtractor};
use crate::generator::{GenerationError, TextGenerator};
use crate::intent::{classify, OptimizationIntent};
use crate::jitter::{Jitter, RngJitter};
use crate::mining::TextMiner;
use crate::prompt::build_prompt;
use crate::time::now_timestamp;

/// Which branch produced an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryPath {
    Structured,
    Mined,
    Unavailable,
}

impl AdvisoryPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryPath::Structured => "structured",
            AdvisoryPath::Mined => "mined",
            AdvisoryPath::Unavailable => "unavailable",
        }
    }
}

pub struct AdvisoryAssembler {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    extractor: StructuredExtractor,
    miner: TextMiner,
}

impl AdvisoryAssembler {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            generator,
            timeout,
            extractor: StructuredExtractor::new()?,
            miner: TextMiner::new()?,
        })
    }

    /// Produce an advisory with fresh per-request jitter.
    pub async fn advise(&self, request: &RouteRequest) -> RouteAdvisory {
        let mut jitter = RngJitter::from_entropy();
        self.advise_with(request, &mut jitter).await
    }

    /// Produce an advisory with caller-supplied jitter.
    pub async fn advise_with(
        &self,
        request: &RouteRequest,
        jitter: &mut impl Jitter,
    ) -> RouteAdvisory {
        let reason = request.reason();
        let intent = classify(reason);
        let prompt = build_prompt(request, &intent);

        let (mut advisory, path) = match self.call_generator(&prompt).await {
            Ok(text) => self.interpret(&text, reason, &intent.algorithm_label, jitter),
            Err(e) => {
                tracing::warn!(reason, error = %e, "generation unavailable; synthesizing advisory");
                (unavailable(request, &intent, &e, jitter), AdvisoryPath::Unavailable)
            }
        };

        advisory.stamp(request, now_timestamp());
        tracing::info!(reason, path = path.as_str(), "advisory assembled");
        advisory
    }

    /// Turn generator text into an advisory: structured first, mined otherwise.
    /// Request echo fields and the timestamp are not set here.
    pub fn interpret(
        &self,
        text: &str,
        reason: &str,
        algorithm_label: &str,
        jitter: &mut impl Jitter,
    ) -> (RouteAdvisory, AdvisoryPath) {
        match self.extractor.extract(text) {
            Extraction::Hit(structured) => (
                structured.into_advisory(reason, algorithm_label, jitter),
                AdvisoryPath::Structured,
            ),
            Extraction::Miss => {
                tracing::debug!(reason, "falling back to text mining");
                (
                    self.miner.mine(text, reason, algorithm_label, jitter),
                    AdvisoryPath::Mined,
                )
            }
        }
    }

    /// One attempt, bounded by the configured timeout.
    async fn call_generator(&self, prompt: &str) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
            Ok(Err(e)) => Err(match e.downcast::<GenerationError>() {
                Ok(known) => known,
                Err(other) => GenerationError::Provider(format!("{other:#}")),
            }),
            Ok(Ok(text)) => Ok(text),
        }
    }
}

fn unavailable(
    request: &RouteRequest,
    intent: &OptimizationIntent,
    error: &GenerationError,
    jitter: &mut impl Jitter,
) -> RouteAdvisory {
    let description = format!(
        "Unable to generate a route advisory from {} to {}: the route description service is unavailable. \
Chart values are estimates for a {} trip.",
        or_unknown(request.pickup()),
        or_unknown(request.destination()),
        intent.goal,
    );

    RouteAdvisory {
        pickup: None,
        destination: None,
        reason: None,
        description,
        distance: UNKNOWN.to_string(),
        time: UNKNOWN.to_string(),
        algorithm: intent.algorithm_label.clone(),
        landmarks: Vec::new(),
        traffic_notes: DEFAULT_TRAFFIC_NOTE.to_string(),
        chart_data: chart::synthesize(request.reason(), "", jitter),
        timestamp: String::new(),
        error: Some(error.to_string()),
    }
}

fn or_unknown(s: &str) -> &str {
    if s.trim().is_empty() { "an unknown location" } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::DisabledGenerator;
    use crate::jitter::NoJitter;

    fn assembler() -> AdvisoryAssembler {
        AdvisoryAssembler::new(Arc::new(DisabledGenerator), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_interpret_prefers_structured() {
        let (a, path) = assembler().interpret(
            r#"{"description":"Take the sea link","distance":"9 kilometers"}"#,
            "Quick",
            "A*",
            &mut NoJitter,
        );
        assert_eq!(path, AdvisoryPath::Structured);
        assert_eq!(a.description, "Take the sea link");
        assert_eq!(a.distance, "9 kilometers");
    }

    #[test]
    fn test_interpret_mines_free_text() {
        let (a, path) = assembler().interpret(
            "Roughly 14 kilometers, about 35 minutes.",
            "Drive",
            "Custom",
            &mut NoJitter,
        );
        assert_eq!(path, AdvisoryPath::Mined);
        assert_eq!(a.distance, "14 kilometers");
        assert_eq!(a.time, "35 minutes");
        assert_eq!(a.algorithm, "Custom");
    }

    #[tokio::test]
    async fn test_disabled_generator_yields_error_advisory() {
        let req = RouteRequest::new("A", "B", "Drive");
        let a = assembler().advise_with(&req, &mut NoJitter).await;
        assert_eq!(a.error.as_deref(), Some("text generation is disabled"));
        assert_eq!(a.pickup.as_deref(), Some("A"));
        assert_eq!(a.algorithm, "Custom");
        assert!(a.description.contains("from A to B"));
        assert_eq!(a.chart_data.current_route_fuel_usage, 1.5);
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(""), "an unknown location");
        assert_eq!(or_unknown("Pune"), "Pune");
    }
}
