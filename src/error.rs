//! Error types for AI generation operations.
//!
//! This module provides structured error handling for the provider
//! abstraction core, including categorization, severity levels, and retry
//! guidance.
//!
//! # Error Types
//!
//! The main error type is [`AiError`], which covers all failure modes:
//! - Unconfigured providers (missing credential or endpoint)
//! - Unknown provider names
//! - Backend request failures (network issues, non-2xx responses)
//! - Malformed model output (no parseable JSON object)
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use incident_ai::AiError;
//!
//! fn handle_error(err: AiError) {
//!     // Check if we should retry
//!     if err.is_retryable() {
//!         println!("Retryable error: {}", err);
//!         // Implement retry with backoff outside the core...
//!     }
//!
//!     // Get user-friendly message for the HTTP layer
//!     let user_msg = err.user_message();
//!     println!("Tell user: {}", user_msg);
//! }
//! ```
//!
//! # Result Type
//!
//! Use [`AiResult<T>`] as a convenient alias for `Result<T, AiError>`.

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`AiError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (model backends, network issues).
    ///
    /// The backend or network had an issue. May be transient or indicate
    /// a provider outage.
    External,

    /// Client errors (unknown provider name, missing credentials).
    ///
    /// The caller made a mistake they can fix (wrong provider name,
    /// unconfigured credentials, etc.).
    Client,

    /// Model-quality issues (output that violates the response contract).
    ///
    /// The backend responded, but the content could not be coerced into
    /// the expected structure. Retrying without changing the prompt or
    /// provider is unlikely to help.
    ModelOutput,
}

/// Severity level for logging and alerting decisions.
///
/// Use [`AiError::severity()`] to get the severity for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,
}

// ============================================================================
// AI error types
// ============================================================================

/// Convenient result type for AI generation operations.
///
/// Alias for `Result<T, AiError>`. Use this throughout the crate for
/// consistent error handling.
pub type AiResult<T> = std::result::Result<T, AiError>;

/// Errors that can occur during AI generation operations.
///
/// Each variant includes relevant context and can be:
/// - Categorized via [`category()`](Self::category)
/// - Assessed for severity via [`severity()`](Self::severity)
/// - Checked for retryability via [`is_retryable()`](Self::is_retryable)
/// - Converted to user-friendly messages via [`user_message()`](Self::user_message)
///
/// # Creating Errors
///
/// Use the constructor methods which automatically log the error:
///
/// ```rust
/// use incident_ai::AiError;
///
/// // These methods log automatically
/// let err = AiError::unconfigured_provider("openai");
/// let err = AiError::unknown_provider("not-a-provider");
/// ```
///
/// # Error Categories
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `UnconfiguredProvider` | Client | No |
/// | `UnknownProvider` | Client | No |
/// | `BackendRequest` | External | Yes |
/// | `MalformedOutput` | ModelOutput | No |
#[derive(Error, Debug)]
pub enum AiError {
    /// The provider's required credential or endpoint is missing.
    ///
    /// Callers should treat this as "service unavailable" rather than
    /// retrying; the provider needs to be reconfigured first.
    #[error("Provider not configured: {provider}")]
    UnconfiguredProvider {
        /// The provider that is missing its credential or endpoint.
        provider: String,
    },

    /// The specified provider name is not registered.
    ///
    /// Caller input error, 4xx-equivalent. Registered providers can be
    /// listed via the registry or service facade.
    #[error("Unknown AI provider: {provider}")]
    UnknownProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// The HTTP request to a model backend failed.
    ///
    /// Covers both transport failures and non-success HTTP statuses.
    /// May be transient; the core performs no automatic retry, callers
    /// may retry with backoff.
    #[error("Backend request failed: {message}")]
    BackendRequest {
        /// Description of the failure, including the backend body when
        /// one was received.
        message: String,
        /// HTTP status code when the backend responded at all.
        status: Option<u16>,
        /// The underlying transport error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend returned text with no parseable JSON object.
    ///
    /// Surfaced distinctly from [`AiError::BackendRequest`] so callers can
    /// log model-quality issues separately from infrastructure issues.
    /// Not retryable without changing the prompt or provider.
    #[error("Malformed model output: {message}")]
    MalformedOutput {
        /// Details about the parsing failure, with a content preview.
        message: String,
    },
}

impl AiError {
    /// Get the error category for routing and handling decisions.
    ///
    /// - `Client`: fix the request (bad provider name, missing credentials)
    /// - `External`: backend issue, may need ops attention
    /// - `ModelOutput`: model-quality issue, change prompt or provider
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnconfiguredProvider { .. } => ErrorCategory::Client,
            Self::UnknownProvider { .. } => ErrorCategory::Client,
            Self::BackendRequest { .. } => ErrorCategory::External,
            Self::MalformedOutput { .. } => ErrorCategory::ModelOutput,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnconfiguredProvider { .. } => ErrorSeverity::Error,
            Self::UnknownProvider { .. } => ErrorSeverity::Error,
            Self::BackendRequest { .. } => ErrorSeverity::Error,
            Self::MalformedOutput { .. } => ErrorSeverity::Warning,
        }
    }

    /// Whether this error is transient and may succeed on retry.
    ///
    /// Returns `true` only for backend request failures, which may be
    /// network blips or provider outages. The core never retries itself;
    /// implement exponential backoff at the call site if desired.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendRequest { .. })
    }

    /// Convert to a user-friendly message suitable for display.
    ///
    /// Returns a message that's safe to show to end users - technical
    /// details and internal information are stripped or generalized.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnconfiguredProvider { .. } => {
                "AI service is not configured. Please contact your administrator".to_string()
            }
            Self::UnknownProvider { .. } => {
                "The requested AI provider is not supported".to_string()
            }
            Self::BackendRequest { .. } => {
                "Unable to communicate with AI service. Please try again".to_string()
            }
            Self::MalformedOutput { .. } => {
                "Received an invalid response from AI service".to_string()
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods automatically log the error at the appropriate level.
    // Use them instead of constructing variants directly.

    /// Create an unconfigured provider error (logs at ERROR level).
    pub fn unconfigured_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unconfigured_provider",
            "AI provider credential or endpoint missing"
        );
        Self::UnconfiguredProvider { provider }
    }

    /// Create an unknown provider error (logs at ERROR level).
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unknown_provider",
            "Unknown AI provider requested"
        );
        Self::UnknownProvider { provider }
    }

    /// Create a backend request error (logs at ERROR level).
    pub fn backend_request(
        message: impl Into<String>,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "backend_request",
            message = %message,
            status = status,
            has_source = source.is_some(),
            "Model backend request failed"
        );
        Self::BackendRequest {
            message,
            status,
            source,
        }
    }

    /// Create a malformed output error (logs at WARN level).
    pub fn malformed_output(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "malformed_output",
            message = %message,
            "Model output violates the resolution response contract"
        );
        Self::MalformedOutput { message }
    }
}
