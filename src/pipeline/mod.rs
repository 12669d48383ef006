//! Extraction pipeline: document preparation feeds the Gemini-backed
//! extraction client, the batch runner sequences documents with pacing
//! and error isolation, and aggregation derives the presentation values.

pub mod aggregate;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod runner;
pub mod types;

pub use aggregate::{checklist_view, completeness, enrich, record_summary, requirements_counts};
pub use error::ExtractError;
pub use gemini::{ExtractionBackend, ExtractionClient, ExtractionRequest, GeminiBackend};
pub use runner::{BatchRunner, Pacer, TokioPacer};
pub use types::{
    BatchConfig, BatchResult, CancelFlag, NullProgress, Progress, ProgressSink, Record,
    RunTimestamp,
};
