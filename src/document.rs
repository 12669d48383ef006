//! Input documents and the payload gate in front of the extraction call.
//!
//! Only PDF documents enter a batch. Anything else is dropped with a
//! per-file notice — a filtering step, never a batch-fatal error.

use std::path::Path;

use base64::Engine;
use thiserror::Error;

/// The single media type accepted into a batch.
pub const SUPPORTED_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("الملف '{name}' ليس من نوع PDF وسيتم تجاهله.")]
    UnsupportedFileType { name: String, media_type: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opaque input document: bytes + declared media type + display name.
/// Created by the caller, consumed once by [`prepare`], never mutated.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Load a document from disk, fully buffered. The declared media type
    /// comes from the extension; a `%PDF` magic header wins over a missing
    /// or misleading extension.
    pub fn from_path(path: &Path) -> Result<Self, PrepareError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let guessed = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        let media_type = if bytes.starts_with(b"%PDF") {
            SUPPORTED_MEDIA_TYPE
        } else {
            guessed
        };

        Ok(Self::new(name, media_type, bytes))
    }
}

/// Base64 payload handed to the extraction service as an inline part.
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub data: String,
    pub media_type: String,
}

/// Convert a document into the inline payload the extraction call needs.
///
/// Rejects any document whose declared media type is not PDF. The whole
/// file is buffered before returning — documents are bounded-size, no
/// streaming is needed.
pub fn prepare(document: &Document) -> Result<DocumentPayload, PrepareError> {
    if document.media_type != SUPPORTED_MEDIA_TYPE {
        return Err(PrepareError::UnsupportedFileType {
            name: document.name.clone(),
            media_type: document.media_type.clone(),
        });
    }
    Ok(DocumentPayload {
        data: base64::engine::general_purpose::STANDARD.encode(&document.bytes),
        media_type: document.media_type.clone(),
    })
}

/// A document dropped at the batch gate, with its user-facing notice.
#[derive(Debug, Clone)]
pub struct RejectedDocument {
    pub name: String,
    pub media_type: String,
    pub notice: String,
}

/// Split candidate documents into the accepted batch and per-file
/// rejections. Sibling documents are unaffected by a rejection.
pub fn filter_supported(documents: Vec<Document>) -> (Vec<Document>, Vec<RejectedDocument>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for document in documents {
        if document.media_type == SUPPORTED_MEDIA_TYPE {
            accepted.push(document);
        } else {
            tracing::info!(
                document = %document.name,
                media_type = %document.media_type,
                "Dropping unsupported file from batch"
            );
            rejected.push(RejectedDocument {
                notice: format!(
                    "الملف '{}' ليس من نوع PDF وسيتم تجاهله.",
                    document.name
                ),
                name: document.name,
                media_type: document.media_type,
            });
        }
    }
    (accepted, rejected)
}
