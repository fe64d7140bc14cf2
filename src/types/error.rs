//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Collaborator failures carry a category so the server can log and report
//! them consistently.
//!
//! ## Error Categories
//!
//! - **RateLimit**: API quota or rate limiting
//! - **Auth**: Bad or missing API key
//! - **Network**: Connectivity issues and timeouts
//! - **BadRequest**: The collaborator rejected the payload
//! - **Unavailable**: Model not found or provider down
//! - **Transient**: 5xx responses

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Categories of collaborator failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues, including timeouts
    Network,
    /// Collaborator rejected the request
    BadRequest,
    /// Provider or model unavailable
    Unavailable,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Collaborator failure with category, context and the error payload
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
    /// HTTP status returned by the provider, if any
    pub status: Option<u16>,
    /// Error payload returned by the provider (JSON when parseable)
    pub detail: Option<Value>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
            status: None,
            detail: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            provider: Some(provider.into()),
            ..Self::new(category, message)
        }
    }

    /// Attach the HTTP status
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the provider's error payload
    pub fn detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Payload suitable for surfacing to a caller: the provider's own error
    /// body when there is one, otherwise the message.
    pub fn diagnostic(&self) -> Value {
        self.detail
            .clone()
            .unwrap_or_else(|| Value::String(self.message.clone()))
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport failures and HTTP statuses onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code returned by the provider
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 422 => ErrorCategory::BadRequest,
            404 => ErrorCategory::Unavailable,
            500 | 502 | 503 | 504 => ErrorCategory::Transient,
            _ => ErrorCategory::Unknown,
        };
        LlmError::with_provider(category, message, provider).status(status)
    }

    /// Classify a transport-level failure (no response received)
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_builder() || err.is_request() {
            ErrorCategory::BadRequest
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, format!("request failed: {}", err), provider)
    }
}

// =============================================================================
// Extraction Error
// =============================================================================

/// Failure to recover a quiz set from collaborator text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("Collaborator returned empty output")]
    EmptyOutput,

    /// `raw` is the collaborator text exactly as received
    #[error("Collaborator returned invalid JSON")]
    NotJsonArray { raw: String },

    #[error("Question {index} is malformed: {reason}")]
    MalformedElement {
        index: usize,
        reason: String,
        raw: String,
    },
}

impl ExtractionError {
    /// The unparseable collaborator text, for diagnostics
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::EmptyOutput => None,
            Self::NotJsonArray { raw } | Self::MalformedElement { raw, .. } => Some(raw),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum QuizError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(LlmError),

    /// 2xx response without a usable text field
    #[error("No content returned from {provider}")]
    CollaboratorEmptyResponse { provider: String, raw: Value },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Session / Client Errors
    // -------------------------------------------------------------------------
    #[error("No valid quiz returned. Try another topic.")]
    EmptySubmission,

    #[error("A quiz is already in progress")]
    SessionBusy,

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },
}

impl From<LlmError> for QuizError {
    fn from(err: LlmError) -> Self {
        QuizError::CollaboratorUnavailable(err)
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

impl QuizError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
