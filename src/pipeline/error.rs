//! Extraction-specific error types.
//!
//! Per-document failures never cross a document boundary: the batch
//! runner converts them into the failed document's `BatchResult` and
//! moves on.

use thiserror::Error;

use crate::document::PrepareError;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Network or service failure reaching the extraction endpoint.
    #[error("Extraction service unreachable: {0}")]
    Transport(String),

    /// Upstream returned non-JSON text or a non-array top-level value.
    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),

    /// Document preparation rejected the file.
    #[error(transparent)]
    Prepare(#[from] PrepareError),

    /// No supported documents were submitted.
    #[error("Batch is empty: no supported documents were submitted")]
    EmptyBatch,

    /// Client-side configuration problem (missing API key, bad base URL).
    #[error("Configuration error: {0}")]
    Config(String),
}
