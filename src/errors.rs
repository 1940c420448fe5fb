/*!
 * Error types for pollingo.
 *
 * Errors fall into three families:
 * - configuration errors, surfaced immediately and never retried
 * - transport errors from a provider, retried by the completion client
 * - contract violations, raised when a backend reply does not honor the
 *   prompt contract; never retried
 */

use thiserror::Error;

/// Errors that can occur when talking to a completion backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The attempt did not finish within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Which side of a language pair a code was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    Source,
    Target,
}

impl std::fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors in caller-supplied configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A language code was rejected when assigned to a language pair
    #[error("Invalid {role} language code: {code}. Available languages: {}", .available.join(", "))]
    InvalidLanguageCode {
        role: LanguageRole,
        code: String,
        available: Vec<String>,
    },

    /// A code was looked up that the catalog does not contain
    #[error("Invalid language code: {0}")]
    UnknownLanguageCode(String),

    /// The language catalog could not be built
    #[error("Language catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A numeric or textual setting is out of range
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Translation was requested before a target language was set
    #[error("Target language must be set before translating")]
    MissingTargetLanguage,

    /// No API key was supplied for a backend that needs one
    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

/// Broad classification of a translation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    ContractViolation,
}

/// Errors that can occur while translating
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error in the configuration of the request
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Every attempt against the backend failed at the transport level
    #[error("Completion failed after {attempts} attempt(s): {source}")]
    CompletionFailed {
        attempts: u32,
        #[source]
        source: ProviderError,
    },

    /// The backend answered without any content
    #[error("Empty response from completion backend (model {model})")]
    EmptyResponse { model: String },

    /// The reply contained no `[KEY:...]...[/KEY]` tag at all
    #[error("Invalid response format. Expected [KEY:key_name]translation[/KEY] format.")]
    MalformedResponse { raw_response: String },

    /// A requested key has no tag in the reply
    #[error("Missing translation for key: {key}. Available translations: {}", .returned.join(", "))]
    MissingTranslation {
        key: String,
        returned: Vec<String>,
        raw_response: String,
    },

    /// The reply contains a tag for a key that was never requested
    #[error("Unexpected translation key: {key}. Available keys: {}", .expected.join(", "))]
    UnexpectedTranslation {
        key: String,
        expected: Vec<String>,
        raw_response: String,
    },
}

impl TranslationError {
    /// Classify the error into configuration, transport or contract failures
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::CompletionFailed { .. } => ErrorCategory::Transport,
            Self::EmptyResponse { .. }
            | Self::MalformedResponse { .. }
            | Self::MissingTranslation { .. }
            | Self::UnexpectedTranslation { .. } => ErrorCategory::ContractViolation,
        }
    }

    /// The raw backend reply, for errors raised while parsing it
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw_response }
            | Self::MissingTranslation { raw_response, .. }
            | Self::UnexpectedTranslation { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}
