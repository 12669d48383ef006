//! Caller identity for the analysis views. The pipeline itself is
//! identity-free; callers hold a `Session` and the view layer asks it
//! which analyses the holder may run.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Accredited valuer: full audit plus the verification checklist.
    Evaluator,
    /// Report recipient: verification checklist only.
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Evaluator => "evaluator",
            UserRole::Client => "client",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: UserRole,
}

impl Session {
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// May this session run the given analysis?
    pub fn can_run(&self, kind: SchemaKind) -> bool {
        match (self.role, kind) {
            (UserRole::Evaluator, _) => true,
            (UserRole::Client, SchemaKind::Verification) => true,
            (UserRole::Client, SchemaKind::Audit) => false,
        }
    }
}
