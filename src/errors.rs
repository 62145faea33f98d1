use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Model provider errors ────────────────────────────────────────────────
    #[error("Model provider unreachable at {host}: {source}")]
    ProviderUnavailable {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Model provider returned HTTP {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("Malformed provider output: {message}")]
    MalformedOutput { message: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid value '{value}' for configuration key {key}")]
    InvalidConfig { key: String, value: String },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn empty_field(field_name: impl Into<String>) -> Self {
        AppError::EmptyField { field_name: field_name.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::FieldTooLong { .. })
    }
}
