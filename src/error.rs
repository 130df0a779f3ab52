//! Error types for cfpb-complaints.
//!
//! Each layer has its own error enum; [`Error`] unifies them for callers
//! that cross layers (the search service, the CLI). Zero search results is
//! never represented here: it is a successful outcome carrying guidance.

use thiserror::Error;

/// Result alias using the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied query parameters were rejected before any request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The CFPB API (or a delegate endpoint) failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The natural-language agent failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// An A2A task could not be served or sent.
    #[error(transparent)]
    A2a(#[from] A2aError),

    /// A CLI command failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Parameter validation failures raised by the query mapper.
///
/// Always recoverable by the caller correcting its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `size` was outside `1..=100`.
    #[error("size out of range: {size} (expected 1-100)")]
    SizeOutOfRange {
        /// The rejected size.
        size: u32,
    },

    /// Both `since` and `days` were supplied.
    #[error("mutually exclusive date filters: provide either `since` or `days`, not both")]
    MutuallyExclusiveDates,

    /// Response format other than `json` or `csv`.
    #[error("unsupported format: {value} (expected json or csv)")]
    UnsupportedFormat {
        /// The rejected format string.
        value: String,
    },

    /// Unknown sort order.
    #[error(
        "unsupported sort: {value} (expected relevance, created_date_desc, created_date_asc or total_amount_desc)"
    )]
    UnsupportedSort {
        /// The rejected sort string.
        value: String,
    },

    /// Unknown search field restriction.
    #[error("unsupported field: {value} (expected all, keyword or complaint_what_happened)")]
    UnsupportedField {
        /// The rejected field string.
        value: String,
    },

    /// A request parameter could not be read at all (e.g. a non-numeric
    /// `size` in a query string).
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// Decoder message.
        message: String,
    },

    /// `since` could not be read as a calendar date.
    #[error("invalid date: {value}")]
    InvalidDate {
        /// The rejected date string.
        value: String,
    },
}

/// Failures talking to the CFPB API or a delegate endpoint.
///
/// Never retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Non-2xx response. `detail` is the body's `message` field when the
    /// body is JSON, otherwise `"<code> <reason>"`.
    #[error("{detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Extracted error detail.
        detail: String,
    },

    /// Timeout, DNS, connection refused, or other transport failure.
    #[error("request failed: {message}")]
    Transport {
        /// Transport error message.
        message: String,
    },

    /// A successful response whose body could not be decoded.
    #[error("invalid response body: {message}")]
    InvalidBody {
        /// Decode error message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Builder error message.
        message: String,
    },
}

impl UpstreamError {
    /// Returns the human-readable detail surfaced to callers.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidBody {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// A2A facade and client errors.
#[derive(Debug, Error)]
pub enum A2aError {
    /// The task named a skill this agent does not offer.
    #[error("unknown skill: {name}")]
    UnknownSkill {
        /// Requested skill name.
        name: String,
    },

    /// Task input was not a JSON object.
    #[error("invalid task input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// The delegate endpoint or remote agent failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The remote agent reported the task as failed.
    #[error("A2A task failed: {message}")]
    TaskFailed {
        /// Error reported by the remote agent.
        message: String,
    },

    /// The remote agent completed the task without a JSON artifact.
    #[error("A2A task returned no artifacts")]
    NoArtifacts,
}

/// Natural-language agent errors.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was configured.
    #[error("API key missing: set GROQ_API_KEY or provide a key file")]
    ApiKeyMissing,

    /// The LLM API call failed.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Error message.
        message: String,
        /// HTTP status, when known.
        status: Option<u16>,
    },

    /// The LLM completion could not be parsed into query parameters.
    #[error("failed to parse response: {message}")]
    ResponseParse {
        /// Parse error message.
        message: String,
        /// The raw completion text.
        content: String,
    },

    /// The LLM returned no text.
    #[error("LLM did not return any text")]
    EmptyResponse,

    /// Provider name not recognised.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// Provider name.
        name: String,
    },

    /// The complaint-search skill failed.
    #[error("skill invocation failed: {message}")]
    Skill {
        /// Failure detail.
        message: String,
    },

    /// Agent configuration could not be read.
    #[error("configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

/// CLI command errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Command execution failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// Output formatting failed.
    #[error("output error: {0}")]
    OutputFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::SizeOutOfRange { size: 0 };
        assert!(err.to_string().starts_with("size out of range"));

        let err = ValidationError::MutuallyExclusiveDates;
        assert!(err.to_string().starts_with("mutually exclusive date filters"));

        let err = ValidationError::UnsupportedFormat {
            value: "xml".to_string(),
        };
        assert!(err.to_string().starts_with("unsupported format"));
    }

    #[test]
    fn test_upstream_status_detail() {
        let err = UpstreamError::Status {
            status: 503,
            detail: "service unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "service unavailable");
        assert_eq!(err.detail(), "service unavailable");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ValidationError::MutuallyExclusiveDates.into();
        assert!(matches!(err, Error::Validation(_)));

        let err: Error = UpstreamError::Transport {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
