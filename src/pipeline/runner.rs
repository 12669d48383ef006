//! BatchRunner — drives the extraction client over a sequence of
//! documents.
//!
//! Strictly sequential, one in-flight extraction call at a time: the
//! fixed pause before every call is the rate-limiting strategy, not a
//! limitation to lift. One document's failure never aborts the batch.

use std::time::Duration;

use async_trait::async_trait;

use super::error::ExtractError;
use super::gemini::{ExtractionBackend, ExtractionClient};
use super::types::{BatchConfig, BatchResult, Progress, ProgressSink, Record, RunTimestamp};
use crate::document::{prepare, Document};
use crate::schema::Schema;

/// Injectable inter-call timer, so tests can observe pacing without
/// real waits.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self, interval: Duration);
}

/// Production pacer: a real suspension on the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pace(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Orchestrates one batch run. Owns the ordered result list; nothing
/// else appends to it.
pub struct BatchRunner<'a> {
    backend: &'a dyn ExtractionBackend,
    pacer: &'a dyn Pacer,
    progress: &'a dyn ProgressSink,
    config: BatchConfig,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        backend: &'a dyn ExtractionBackend,
        pacer: &'a dyn Pacer,
        progress: &'a dyn ProgressSink,
        config: BatchConfig,
    ) -> Self {
        Self {
            backend,
            pacer,
            progress,
            config,
        }
    }

    /// Run the batch: one `BatchResult` per document, input order
    /// preserved exactly. Within a document, record order is whatever
    /// the extraction client returned — upstream order is authoritative.
    ///
    /// Per-document state machine:
    /// `Pending -> Preparing -> Extracting -> {Succeeded | Failed}` —
    /// terminal states only, no retries within a run. Cancellation is
    /// checked at the `Pending` transition; cancelling returns the
    /// results accumulated so far.
    pub async fn run_batch(
        &self,
        documents: &[Document],
        schema: &Schema,
        instructions: &str,
    ) -> Result<Vec<BatchResult>, ExtractError> {
        if documents.is_empty() {
            return Err(ExtractError::EmptyBatch);
        }

        let run = RunTimestamp::now();
        let total = documents.len();
        let mut results = Vec::with_capacity(total);

        for (i, document) in documents.iter().enumerate() {
            if self.config.cancel.is_cancelled() {
                tracing::info!(
                    completed = results.len(),
                    total,
                    "Batch cancelled between documents"
                );
                break;
            }

            self.progress.on_document(&Progress {
                document_index: i + 1,
                total_documents: total,
                document_name: document.name.clone(),
            });

            // The pause elapses before every extraction call, including
            // the first, and regardless of the previous call's outcome.
            self.pacer.pace(self.config.pacing).await;

            match self.process_document(document, schema, instructions).await {
                Ok(mut records) => {
                    for (j, record) in records.iter_mut().enumerate() {
                        record.set_report_number(run.report_number(i + 1, j + 1));
                    }
                    tracing::info!(
                        document = %document.name,
                        records = records.len(),
                        "Document analyzed"
                    );
                    results.push(BatchResult::success(&document.name, records));
                }
                Err(e) => {
                    tracing::warn!(
                        document = %document.name,
                        error = %e,
                        "Document failed, continuing batch"
                    );
                    results.push(BatchResult::failure(&document.name, e.to_string()));
                }
            }
        }

        Ok(results)
    }

    async fn process_document(
        &self,
        document: &Document,
        schema: &Schema,
        instructions: &str,
    ) -> Result<Vec<Record>, ExtractError> {
        let payload = prepare(document)?;
        let client = ExtractionClient::new(self.backend);
        client.extract(schema, &payload, instructions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SUPPORTED_MEDIA_TYPE;
    use crate::pipeline::gemini::ExtractionRequest;
    use crate::pipeline::types::{CancelFlag, NullProgress};
    use crate::schema::{audit, ABSENT};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend with one canned response per call, in order. `"FAIL"`
    /// simulates a transport failure for that call.
    struct ScriptedBackend {
        responses: Vec<&'static str>,
        next: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<&'static str>) -> Self {
            Self {
                responses,
                next: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExtractionBackend for ScriptedBackend {
        async fn generate(
            &self,
            _request: &ExtractionRequest<'_>,
        ) -> Result<String, ExtractError> {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            match self.responses[i] {
                "FAIL" => Err(ExtractError::Transport("service unavailable".to_string())),
                response => Ok(response.to_string()),
            }
        }
    }

    /// Pacer that records every requested interval instead of sleeping.
    #[derive(Default)]
    struct RecordingPacer {
        intervals: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pace(&self, interval: Duration) {
            self.intervals.lock().unwrap().push(interval);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(usize, usize, String)>>,
    }

    impl ProgressSink for RecordingProgress {
        fn on_document(&self, progress: &Progress) {
            self.events.lock().unwrap().push((
                progress.document_index,
                progress.total_documents,
                progress.document_name.clone(),
            ));
        }
    }

    /// Progress sink that cancels the batch once a given document index
    /// is announced.
    struct CancelAt {
        index: usize,
        flag: CancelFlag,
    }

    impl ProgressSink for CancelAt {
        fn on_document(&self, progress: &Progress) {
            if progress.document_index >= self.index {
                self.flag.cancel();
            }
        }
    }

    fn pdf(name: &str) -> Document {
        Document::new(name, SUPPORTED_MEDIA_TYPE, b"%PDF-1.7".to_vec())
    }

    #[tokio::test]
    async fn failure_is_isolated_to_its_document() {
        let backend = ScriptedBackend::new(vec![
            r#"[{"propertyCity": "الرياض"}]"#,
            "FAIL",
            r#"[{"propertyCity": "جدة"}]"#,
        ]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());
        let docs = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];

        let results = runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].document_name, "a.pdf");
        assert_eq!(results[1].document_name, "b.pdf");
        assert_eq!(results[2].document_name, "c.pdf");
        assert!(!results[0].is_error());
        assert!(results[1].is_error());
        assert!(results[1].records.is_empty());
        assert!(!results[2].is_error());
        assert_eq!(results[2].records.len(), 1);
    }

    #[tokio::test]
    async fn report_numbers_unique_across_documents() {
        let backend = ScriptedBackend::new(vec![
            r#"[{"propertyCity": "الرياض"}, {"propertyCity": "الدمام"}]"#,
            r#"[{"propertyCity": "جدة"}, {"propertyCity": "أبها"}]"#,
        ]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());
        let docs = vec![pdf("a.pdf"), pdf("b.pdf")];

        let results = runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        let mut numbers: Vec<String> = results
            .iter()
            .flat_map(|r| r.records.iter())
            .map(|rec| rec.report_number().unwrap().to_string())
            .collect();
        assert_eq!(numbers.len(), 4);
        assert!(numbers[0].ends_with("-1-1"));
        assert!(numbers[1].ends_with("-1-2"));
        assert!(numbers[2].ends_with("-2-1"));
        assert!(numbers[3].ends_with("-2-2"));
        // Unique even where local record indices collide across documents.
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 4);
    }

    #[tokio::test]
    async fn pacing_elapses_before_every_call_including_first() {
        let backend = ScriptedBackend::new(vec!["[]", "[]", "[]"]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());
        let docs = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];

        runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        let intervals = pacer.intervals.lock().unwrap();
        assert_eq!(intervals.len(), 3);
        assert!(intervals.iter().all(|d| *d == Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn pacing_elapses_even_after_a_failure() {
        let backend = ScriptedBackend::new(vec!["FAIL", "[]"]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());
        let docs = vec![pdf("a.pdf"), pdf("b.pdf")];

        runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        assert_eq!(pacer.intervals.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let backend = ScriptedBackend::new(vec![]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());

        let err = runner
            .run_batch(&[], &audit::schema(), "instructions")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::EmptyBatch));
    }

    #[tokio::test]
    async fn empty_extraction_is_a_valid_success() {
        // "Not a recognizable valuation report" — empty array, no error.
        let backend = ScriptedBackend::new(vec!["[]"]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());

        let results = runner
            .run_batch(&[pdf("brochure.pdf")], &audit::schema(), "instructions")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_error());
        assert!(results[0].records.is_empty());
    }

    #[tokio::test]
    async fn unsupported_document_fails_alone_mid_batch() {
        // The usual flow filters non-PDF files before the batch, but a
        // preparator rejection inside the run is isolated the same way.
        let backend = ScriptedBackend::new(vec![r#"[{"propertyCity": "الرياض"}]"#]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());
        let docs = vec![
            Document::new("notes.txt", "text/plain", b"hello".to_vec()),
            pdf("report.pdf"),
        ];

        let results = runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_error());
        assert!(results[0].error.as_ref().unwrap().contains("notes.txt"));
        assert!(!results[1].is_error());
    }

    #[tokio::test]
    async fn progress_announced_before_each_extraction() {
        let backend = ScriptedBackend::new(vec!["[]", "[]"]);
        let pacer = RecordingPacer::default();
        let progress = RecordingProgress::default();
        let runner = BatchRunner::new(&backend, &pacer, &progress, BatchConfig::default());
        let docs = vec![pdf("a.pdf"), pdf("b.pdf")];

        runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        let events = progress.events.lock().unwrap();
        assert_eq!(*events, vec![
            (1, 2, "a.pdf".to_string()),
            (2, 2, "b.pdf".to_string()),
        ]);
    }

    #[tokio::test]
    async fn cancellation_checked_between_documents() {
        let backend = ScriptedBackend::new(vec!["[]", "[]", "[]"]);
        let pacer = RecordingPacer::default();
        let flag = CancelFlag::new();
        let progress = CancelAt {
            index: 2,
            flag: flag.clone(),
        };
        let config = BatchConfig {
            cancel: flag,
            ..BatchConfig::default()
        };
        let runner = BatchRunner::new(&backend, &pacer, &progress, config);
        let docs = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];

        let results = runner
            .run_batch(&docs, &audit::schema(), "instructions")
            .await
            .unwrap();

        // Document 2 was announced, its extraction ran, then the flag
        // stopped document 3 at the Pending transition.
        assert_eq!(results.len(), 2);
        assert!(!results[1].is_error());
    }

    #[tokio::test]
    async fn concrete_two_document_scenario() {
        // Document 2 is rejected before the batch starts, so the batch
        // holds a single document.
        let candidates = vec![
            pdf("valuation.pdf"),
            Document::new("scan.jpg", "image/jpeg", vec![0xFF, 0xD8]),
        ];
        let (accepted, rejected) = crate::document::filter_supported(candidates);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);

        let backend = ScriptedBackend::new(vec![
            r#"[{"propertyType": "سكني", "marketValue": 500000}]"#,
        ]);
        let pacer = RecordingPacer::default();
        let runner = BatchRunner::new(&backend, &pacer, &NullProgress, BatchConfig::default());

        let results = runner
            .run_batch(&accepted, &audit::schema(), "instructions")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].records.len(), 1);
        let record = &results[0].records[0];
        assert!(record.report_number().unwrap().ends_with("-1-1"));
        assert_eq!(record.display("propertyType"), "سكني");
        assert_eq!(record.display("marketValue"), "500000");
        assert_eq!(record.display("region"), ABSENT);
    }
}
