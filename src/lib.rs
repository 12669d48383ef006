//! Taqdeer — batch analysis of Saudi real-estate valuation reports.
//!
//! PDF reports go through a generative extraction service twice over:
//! an audit pass that pulls the report's facts and image evidence, and
//! a verification pass that checks the authority's professional and
//! regulatory requirements. Results land in xlsx workbooks and,
//! optionally, a remote spreadsheet endpoint.

pub mod config; // env-driven service configuration
pub mod document; // file gate, base64 payload preparation
pub mod export; // xlsx workbooks and the remote sheet push
pub mod links; // membership register lookup URLs
pub mod pipeline; // batch runner, extraction client, aggregation
pub mod schema; // the audit and verification field schemas
pub mod session; // caller roles and view access

use tracing_subscriber::EnvFilter;

pub use document::{filter_supported, prepare, Document, PrepareError};
pub use export::{ExportError, SyncOutcome};
pub use pipeline::{
    BatchConfig, BatchResult, BatchRunner, ExtractError, GeminiBackend, Record, TokioPacer,
};
pub use schema::{Registry, Schema, SchemaKind};
pub use session::{Session, UserRole};

/// Install the global tracing subscriber. Honors `RUST_LOG`, falling
/// back to the crate-level default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    tracing::info!(version = config::APP_VERSION, "{} starting", config::APP_NAME);
}
