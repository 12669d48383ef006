//! Remote sheet push: a fire-and-forget POST of the header mapping and
//! the record list to an Apps-Script-style endpoint.
//!
//! The endpoint is an opaque transport. It returns nothing the caller
//! can trust, so "no transport-level exception" is the only success
//! signal; a delivered request is not proof the server persisted the
//! rows.

use async_trait::async_trait;
use serde_json::json;

use super::workbook::REQUIREMENTS_HEADER;
use super::ExportError;
use crate::pipeline::types::Record;
use crate::schema::Schema;

/// Outcome of a sync attempt. `Submitted` means the request left
/// without a transport error, nothing stronger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Submitted,
    /// No endpoint configured; the sync degrades to a no-op with a
    /// user-facing notice.
    NotConfigured { notice: String },
}

/// Transport seam for the remote push, mockable in tests.
#[async_trait]
pub trait SheetTransport: Send + Sync {
    async fn post(&self, endpoint: &str, body: &serde_json::Value) -> Result<(), ExportError>;
}

pub struct HttpSheetTransport {
    client: reqwest::Client,
}

impl HttpSheetTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSheetTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetTransport for HttpSheetTransport {
    async fn post(&self, endpoint: &str, body: &serde_json::Value) -> Result<(), ExportError> {
        // The response status is not inspected: Apps-Script endpoints
        // answer opaquely, so only a failure to send counts as failure.
        self.client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| ExportError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Push the record set to the configured endpoint. A missing endpoint
/// is not an error. Records should be enriched first so the stamped
/// completeness ratio travels with them.
pub async fn sync_to_sheet(
    transport: &dyn SheetTransport,
    endpoint: Option<&str>,
    records: &[Record],
    schema: &Schema,
) -> Result<SyncOutcome, ExportError> {
    let Some(endpoint) = endpoint else {
        tracing::info!("Sheet endpoint not configured, skipping sync");
        return Ok(SyncOutcome::NotConfigured {
            notice: "لم يتم إعداد رابط جدول البيانات، تم تخطي المزامنة.".to_string(),
        });
    };
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    // The receiver writes columns strictly from headersMap keys, so the
    // appended requirements column must be declared here too.
    let mut headers_map: serde_json::Map<String, serde_json::Value> = schema
        .headers_map()
        .into_iter()
        .map(|(key, label)| (key.to_string(), json!(label)))
        .collect();
    headers_map.insert("requirementsMet".to_string(), json!(REQUIREMENTS_HEADER));
    let body = json!({
        "headersMap": headers_map,
        "reports": records,
    });

    transport.post(endpoint, &body).await?;
    tracing::info!(count = records.len(), "Records submitted to remote sheet");
    Ok(SyncOutcome::Submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::audit;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl SheetTransport for RecordingTransport {
        async fn post(&self, endpoint: &str, body: &serde_json::Value) -> Result<(), ExportError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), body.clone()));
            Ok(())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl SheetTransport for FailingTransport {
        async fn post(&self, _: &str, _: &serde_json::Value) -> Result<(), ExportError> {
            Err(ExportError::Transport("connection refused".to_string()))
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![Record::from_value(json!({"propertyCity": "الرياض"})).unwrap()]
    }

    #[tokio::test]
    async fn missing_endpoint_degrades_to_notice() {
        let transport = RecordingTransport::default();
        let outcome = sync_to_sheet(&transport, None, &sample_records(), &audit::schema())
            .await
            .unwrap();
        assert!(matches!(outcome, SyncOutcome::NotConfigured { .. }));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn body_carries_headers_map_and_reports() {
        let transport = RecordingTransport::default();
        let schema = audit::schema();
        let outcome = sync_to_sheet(
            &transport,
            Some("https://script.example/exec"),
            &sample_records(),
            &schema,
        )
        .await
        .unwrap();
        assert_eq!(outcome, SyncOutcome::Submitted);

        let calls = transport.calls.lock().unwrap();
        let (endpoint, body) = &calls[0];
        assert_eq!(endpoint, "https://script.example/exec");
        assert_eq!(
            body["headersMap"]["propertyCity"],
            json!("مدينة العقار")
        );
        assert_eq!(body["reports"].as_array().unwrap().len(), 1);
        assert_eq!(body["reports"][0]["propertyCity"], json!("الرياض"));
    }

    #[tokio::test]
    async fn headers_map_declares_the_requirements_column() {
        // The receiver only writes columns named in headersMap, so the
        // ratio would vanish from the remote sheet without this entry.
        let transport = RecordingTransport::default();
        let schema = audit::schema();
        let records = crate::pipeline::aggregate::enrich(
            vec![crate::pipeline::types::BatchResult::success(
                "a.pdf",
                sample_records(),
            )],
            &schema,
        );

        sync_to_sheet(
            &transport,
            Some("https://script.example/exec"),
            &records,
            &schema,
        )
        .await
        .unwrap();

        let calls = transport.calls.lock().unwrap();
        let body = &calls[0].1;
        assert_eq!(
            body["headersMap"]["requirementsMet"],
            json!("إتمام المتطلبات")
        );
        assert_eq!(
            body["reports"][0]["requirementsMet"],
            json!(format!("1/{}", schema.required_count()))
        );
    }

    #[tokio::test]
    async fn transport_failure_surfaces() {
        let err = sync_to_sheet(
            &FailingTransport,
            Some("https://script.example/exec"),
            &sample_records(),
            &audit::schema(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ExportError::Transport(_)));
    }
}
