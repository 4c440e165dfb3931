//! routewise-core: response normalization and fallback synthesis for route advisories

pub mod advisory;
pub mod assembler;
pub mod chart;
pub mod extract;
pub mod generator;
pub mod intent;
pub mod jitter;
pub mod mining;
pub mod prompt;
pub mod reason;
pub mod time;

pub use advisory::{RouteAdvisory, RouteRequest, DEFAULT_TRAFFIC_NOTE, MAX_LANDMARKS, UNKNOWN};
pub use assembler::{AdvisoryAssembler, AdvisoryPath};
pub use chart::{synthesize, ChartData, FuelConsumption, PartialChartData};
pub use extract::{Extraction, StructuredAdvisory, StructuredExtractor};
pub use generator::{DisabledGenerator, GenerationError, TextGenerator};
pub use intent::{classify, OptimizationIntent};
pub use jitter::{Jitter, NoJitter, RngJitter};
pub use mining::TextMiner;
pub use reason::{AlgorithmRatings, QualityProfile, RouteReason};
