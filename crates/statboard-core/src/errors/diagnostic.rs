use serde::{Deserialize, Serialize};

pub mod codes {
    pub const E_CFG_PARSE: &str = "E_CFG_PARSE";
    pub const E_LOAD_FAILED: &str = "E_LOAD_FAILED";
    pub const W_COLUMN_MISSING: &str = "W_COLUMN_MISSING";
    pub const W_TABLE_EMPTY: &str = "W_TABLE_EMPTY";
    pub const W_UNKNOWN_DEVICE: &str = "W_UNKNOWN_DEVICE";
    pub const I_NO_SEPARATOR: &str = "I_NO_SEPARATOR";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    pub code: String,
    pub severity: String, // error|warn|info
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub context: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix_steps: Vec<String>,
}

impl Diagnostic {
    /// Severity is derived from the code prefix (`E_`, `W_`, `I_`).
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        let severity = match code.split('_').next() {
            Some("E") => "error",
            Some("W") => "warn",
            _ => "info",
        };
        Self {
            code: code.to_string(),
            severity: severity.to_string(),
            message: message.into(),
            source: None,
            context: serde_json::Value::Null,
            fix_steps: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    pub fn with_fix_step(mut self, step: impl Into<String>) -> Self {
        self.fix_steps.push(step.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
