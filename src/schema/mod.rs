//! Typed schema descriptors for the two extraction views.
//!
//! A [`Schema`] is an ordered list of field descriptors — key, Arabic label,
//! wire kind, constraint text, requiredness — built once at startup and
//! shared read-only by every pipeline invocation. The descriptors are the
//! single source for three derived artifacts: the upstream response
//! contract, the export header row, and the completeness denominator.

use serde::{Deserialize, Serialize};
use serde_json::json;

pub mod audit;
pub mod verification;

/// Literal value the model returns for a field it could not find.
pub const ABSENT: &str = "غير موجود";
/// Literal value a checklist field carries when the requirement is present.
pub const PRESENT: &str = "موجود";

// ═══════════════════════════════════════════
// Field descriptors
// ═══════════════════════════════════════════

/// Wire-level kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Numeric value, western digits, no units or currency.
    Number,
    /// Closed set of acceptable values, communicated to the model as a
    /// natural-language constraint. Not re-validated locally.
    Enumerated(&'static [&'static str]),
}

impl FieldKind {
    /// Type name used in the structured-output contract.
    pub fn contract_type(&self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::Text | Self::Enumerated(_) => "STRING",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number)
    }
}

/// Which display section a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    /// Report facts (audit view).
    Fact,
    /// Image-presence descriptions (audit view).
    Image,
    /// Professional checklist requirements (verification view).
    Professional,
    /// Regulatory checklist requirements (verification view).
    Regulatory,
}

/// One field of a schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// JSON key, also the column key for exports.
    pub key: &'static str,
    /// Arabic human label (header row, display).
    pub label: &'static str,
    pub kind: FieldKind,
    /// Constraint text handed to the upstream contract as the field
    /// description. Empty for generated fields.
    pub constraint: &'static str,
    /// Counts toward the completeness denominator.
    pub required: bool,
    /// Produced by the pipeline (report identifier), never requested
    /// from the model.
    pub generated: bool,
    pub group: FieldGroup,
}

// ═══════════════════════════════════════════
// Schema
// ═══════════════════════════════════════════

/// Which of the two schema instances is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Property/report facts + image-presence descriptions.
    Audit,
    /// Professional and regulatory checklist presence flags.
    Verification,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Verification => "verification",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable, ordered field schema.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema, asserting field-key uniqueness.
    ///
    /// Panics on duplicate keys: a mis-edited field table is a programmer
    /// error caught at startup, not a runtime condition.
    pub(crate) fn new(kind: SchemaKind, fields: Vec<FieldDescriptor>) -> Self {
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            assert!(
                seen.insert(field.key),
                "duplicate schema field key: {}",
                field.key
            );
        }
        Self { kind, fields }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// All fields in declared order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Fields requested from the model (everything not generated).
    pub fn extracted_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.generated)
    }

    /// Number of fields counting toward completeness.
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }

    /// Keys counting toward completeness, in declared order.
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.key)
    }

    /// Structured-output contract the upstream model must honor: a JSON
    /// array of objects whose shape is fixed by this schema.
    pub fn response_contract(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for field in self.extracted_fields() {
            properties.insert(
                field.key.to_string(),
                json!({
                    "type": field.kind.contract_type(),
                    "description": field.constraint,
                }),
            );
            if field.required {
                required.push(field.key);
            }
        }
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": properties,
                "required": required,
            },
        })
    }

    /// Ordered key → Arabic label mapping for exports and the remote
    /// sheet payload.
    pub fn headers_map(&self) -> Vec<(&'static str, &'static str)> {
        self.fields.iter().map(|f| (f.key, f.label)).collect()
    }
}

// ═══════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════

/// Holds the two schema instances, built once at process start.
#[derive(Debug, Clone)]
pub struct Registry {
    audit: Schema,
    verification: Schema,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            audit: audit::schema(),
            verification: verification::schema(),
        }
    }

    /// No side effects; cannot fail — `SchemaKind` is a closed enum.
    pub fn get(&self, kind: SchemaKind) -> &Schema {
        match kind {
            SchemaKind::Audit => &self.audit,
            SchemaKind::Verification => &self.verification,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_serves_both_kinds() {
        let registry = Registry::new();
        assert_eq!(registry.get(SchemaKind::Audit).kind(), SchemaKind::Audit);
        assert_eq!(
            registry.get(SchemaKind::Verification).kind(),
            SchemaKind::Verification
        );
    }

    #[test]
    fn audit_schema_shape() {
        let schema = audit::schema();
        // 26 fact fields + deed date + 7 image fields.
        assert_eq!(schema.fields().len(), 34);
        // Report number is generated, deed date is optional.
        assert_eq!(schema.required_count(), 32);
        let report_number = schema.field("reportNumber").unwrap();
        assert!(report_number.generated);
        assert!(!report_number.required);
    }

    #[test]
    fn verification_schema_shape() {
        let schema = verification::schema();
        assert_eq!(schema.fields().len(), 16);
        assert_eq!(schema.required_count(), 16);
        let professional = schema
            .fields()
            .iter()
            .filter(|f| f.group == FieldGroup::Professional)
            .count();
        let regulatory = schema
            .fields()
            .iter()
            .filter(|f| f.group == FieldGroup::Regulatory)
            .count();
        assert_eq!(professional, 8);
        assert_eq!(regulatory, 8);
    }

    #[test]
    #[should_panic(expected = "duplicate schema field key")]
    fn duplicate_keys_rejected_at_startup() {
        let field = FieldDescriptor {
            key: "twice",
            label: "مكرر",
            kind: FieldKind::Text,
            constraint: "",
            required: true,
            generated: false,
            group: FieldGroup::Fact,
        };
        Schema::new(SchemaKind::Audit, vec![field.clone(), field]);
    }

    #[test]
    fn contract_excludes_generated_fields() {
        let schema = audit::schema();
        let contract = schema.response_contract();
        assert_eq!(contract["type"], "ARRAY");
        let items = &contract["items"];
        assert_eq!(items["type"], "OBJECT");
        assert!(items["properties"].get("reportNumber").is_none());
        assert!(items["properties"].get("evaluatorName").is_some());
        let required = items["required"].as_array().unwrap();
        assert_eq!(required.len(), 32);
        assert!(!required.iter().any(|k| k.as_str() == Some("deedDate")));
    }

    #[test]
    fn contract_types_follow_field_kinds() {
        let schema = audit::schema();
        let items = &schema.response_contract()["items"]["properties"];
        assert_eq!(items["marketValue"]["type"], "NUMBER");
        assert_eq!(items["propertyArea"]["type"], "NUMBER");
        assert_eq!(items["evaluatorName"]["type"], "STRING");
        // Enumerated fields ride as constrained strings.
        assert_eq!(items["propertyType"]["type"], "STRING");
    }

    #[test]
    fn headers_map_preserves_declared_order() {
        let schema = audit::schema();
        let headers = schema.headers_map();
        assert_eq!(headers[0], ("reportNumber", "رقم تقرير"));
        assert_eq!(headers[1].0, "evaluatorName");
        assert_eq!(headers.last().unwrap().0, "assignmentLetterImage");
    }

    #[test]
    fn merged_header_keys_are_unique_across_schemas() {
        // The two schemas may legitimately share keys between themselves,
        // but within each merged header map every key is unique.
        let registry = Registry::new();
        for kind in [SchemaKind::Audit, SchemaKind::Verification] {
            let headers = registry.get(kind).headers_map();
            let mut keys: Vec<_> = headers.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), headers.len());
        }
    }
}
