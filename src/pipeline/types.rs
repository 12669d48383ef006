//! Core types for the batch analysis pipeline.
//!
//! These model the lifecycle: documents in → paced extraction calls →
//! per-document results → enriched records out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::schema::ABSENT;

// ═══════════════════════════════════════════
// Report identifiers
// ═══════════════════════════════════════════

/// Timestamp captured once at the start of a batch run. All report
/// numbers generated in the run share it, so uniqueness needs only the
/// (document index, record index) pair.
#[derive(Debug, Clone, Copy)]
pub struct RunTimestamp(DateTime<Local>);

impl RunTimestamp {
    pub fn now() -> Self {
        Self(Local::now())
    }

    #[cfg(test)]
    pub(crate) fn fixed(ts: DateTime<Local>) -> Self {
        Self(ts)
    }

    /// `VT-YYYYMMDD-HHMMSS-<doc>-<record>`, both indices 1-based.
    pub fn report_number(&self, document_index: usize, record_index: usize) -> String {
        format!(
            "VT-{}-{document_index}-{record_index}",
            self.0.format("%Y%m%d-%H%M%S")
        )
    }
}

// ═══════════════════════════════════════════
// Records
// ═══════════════════════════════════════════

/// One recognized sub-report inside a document: schema field keys mapped
/// to the values the model returned, plus the generated report number
/// once the orchestrator assigns it.
///
/// Enrichment is append-only — the report number and the cached
/// completeness ratio are added, extracted fields are never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Completeness ratio ("met/total"), cached on first computation.
    #[serde(rename = "requirementsMet", skip_serializing_if = "Option::is_none")]
    pub requirements_met: Option<String>,
}

impl Record {
    /// Wrap a parsed JSON object. Returns `None` for non-objects — the
    /// upstream contract promises array-of-object, anything else is a
    /// malformed response.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(fields) => Some(Self {
                fields,
                requirements_met: None,
            }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// String view of a field, with the absence sentinel for anything
    /// missing or null.
    pub fn display(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => ABSENT.to_string(),
        }
    }

    pub fn report_number(&self) -> Option<&str> {
        self.fields.get("reportNumber").and_then(|v| v.as_str())
    }

    pub(crate) fn set_report_number(&mut self, number: String) {
        self.fields
            .insert("reportNumber".to_string(), serde_json::Value::String(number));
    }

    /// Is this field value present and not the absence sentinel?
    /// Incidental whitespace is trimmed before comparing.
    pub fn field_met(value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                !trimmed.is_empty() && trimmed != ABSENT
            }
            serde_json::Value::Number(_) => true,
            serde_json::Value::Bool(_) => true,
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════
// Batch results
// ═══════════════════════════════════════════

/// Outcome for one input document: records or an error, never both.
/// Empty records with no error is a valid outcome ("not a recognizable
/// valuation report").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub document_name: String,
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResult {
    pub fn success(document_name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            document_name: document_name.into(),
            records,
            error: None,
        }
    }

    /// A failed document carries its error and no records.
    pub fn failure(document_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            records: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ═══════════════════════════════════════════
// Progress
// ═══════════════════════════════════════════

/// Notification emitted once per document before its extraction begins.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    /// 1-based position in the batch.
    pub document_index: usize,
    pub total_documents: usize,
    pub document_name: String,
}

impl Progress {
    /// User-facing loading message.
    pub fn message(&self) -> String {
        format!(
            "جاري تحليل الملف {} من {}: {}...",
            self.document_index, self.total_documents, self.document_name
        )
    }
}

/// Caller-supplied progress consumer.
pub trait ProgressSink: Send + Sync {
    fn on_document(&self, progress: &Progress);
}

/// Discards progress notifications.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_document(&self, _progress: &Progress) {}
}

// ═══════════════════════════════════════════
// Batch configuration
// ═══════════════════════════════════════════

/// Cooperative cancellation flag, checked between documents. Cancelling
/// never interrupts an in-flight extraction call.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum interval elapsed before every extraction call, including
    /// the first. Rate-limit contract with the upstream service, not an
    /// optimization.
    pub pacing: Duration,
    pub cancel: CancelFlag,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(2),
            cancel: CancelFlag::new(),
        }
    }
}
