//! Post-batch aggregation: flatten per-document results into one record
//! list and derive the presentation values (completeness ratio,
//! verification checklist, record summaries).

use super::types::{BatchResult, Record};
use crate::schema::{FieldGroup, Schema, ABSENT, PRESENT};

/// Flatten successful results into a single ordered record list and
/// stamp each record's completeness ratio. Failed documents contribute
/// nothing here; their errors stay on the `BatchResult`.
pub fn enrich(results: Vec<BatchResult>, schema: &Schema) -> Vec<Record> {
    let mut records: Vec<Record> = results
        .into_iter()
        .flat_map(|r| r.records.into_iter())
        .collect();
    for record in &mut records {
        completeness(record, schema);
    }
    records
}

/// Met/total counts over the schema's required fields.
pub fn requirements_counts(record: &Record, schema: &Schema) -> (usize, usize) {
    let total = schema.required_count();
    let met = schema
        .required_keys()
        .filter(|key| record.get(key).is_some_and(Record::field_met))
        .count();
    (met, total)
}

/// Completeness ratio as "met/total" over the schema's required fields.
/// Computed at most once per record; later calls return the cached
/// value, so the ratio never shifts after export or sync.
pub fn completeness(record: &mut Record, schema: &Schema) -> String {
    if let Some(cached) = &record.requirements_met {
        return cached.clone();
    }
    let (met, total) = requirements_counts(record, schema);
    let ratio = format!("{met}/{total}");
    record.requirements_met = Some(ratio.clone());
    ratio
}

/// One requirement row in the verification checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub key: &'static str,
    pub label: &'static str,
    pub present: bool,
}

/// A titled group of checklist rows, in schema order.
#[derive(Debug, Clone)]
pub struct ChecklistSection {
    pub title: &'static str,
    pub items: Vec<ChecklistItem>,
}

/// Split a verification record into its two requirement sections.
/// A requirement counts as present only when its value is exactly the
/// presence marker; absence, omission, or anything unexpected all read
/// as not present.
pub fn checklist_view(record: &Record, schema: &Schema) -> Vec<ChecklistSection> {
    let section = |group: FieldGroup, title: &'static str| ChecklistSection {
        title,
        items: schema
            .fields()
            .iter()
            .filter(|f| f.group == group)
            .map(|f| ChecklistItem {
                key: f.key,
                label: f.label,
                present: record
                    .get(f.key)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .is_some_and(|s| s == PRESENT),
            })
            .collect(),
    };
    vec![
        section(FieldGroup::Professional, "المتطلبات المهنية"),
        section(FieldGroup::Regulatory, "المتطلبات النظامية"),
    ]
}

/// Short human label for a record in lists: property type and city,
/// with generic fallbacks when either was not extracted.
pub fn record_summary(record: &Record, ordinal: usize) -> String {
    let kind = match record.display("propertyType") {
        s if s == ABSENT => "عقار".to_string(),
        s => s,
    };
    let city = match record.display("propertyCity") {
        s if s == ABSENT => "مدينة غير محددة".to_string(),
        s => s,
    };
    format!("تقرير {ordinal}: {kind} في {city}")
}
