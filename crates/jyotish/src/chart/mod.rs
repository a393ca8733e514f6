//! Chart assembly: numeric core, descriptive text and the primary/fallback cascade.

pub mod orchestrator;
pub mod payload;
pub mod text;

pub use orchestrator::{compute_chart, ChartError, ChartOrchestrator, StageError};
pub use payload::{Ascendant, ChartCore, ChartOutcome, ChartPayload, ChartRequest, ChartSource};
pub use text::{ChartText, ChartTextProvider, EphemerisChartText, ProviderError};
