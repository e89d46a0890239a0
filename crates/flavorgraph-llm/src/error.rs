//! Provider error types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Longest body excerpt kept in an API error
const MAX_BODY_SNIPPET: usize = 512;

/// Provider error types
///
/// No-match is not an error: the resolver reports it as a prompt result.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Raised before any network call so the caller can ask for the key
    #[error("Missing {what} for {provider}")]
    MissingCredentials {
        provider: &'static str,
        what: &'static str,
    },

    #[error("Rate limited by {provider}; wait and try again")]
    RateLimited {
        provider: &'static str,
        retry_after: Option<Duration>,
    },

    #[error("{provider} rejected the credentials")]
    Unauthorized { provider: &'static str },

    #[error("{provider} API error (status {status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Agent did not finish within {}s", .waited.as_secs())]
    Timeout { waited: Duration },

    #[error("Agent {agent_id} ended with status {status}")]
    AgentFailed { agent_id: String, status: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(
        provider: &'static str,
        status: u16,
        retry_after: Option<Duration>,
        body: &str,
    ) -> Self {
        match status {
            429 => Self::RateLimited {
                provider,
                retry_after,
            },
            401 | 403 => Self::Unauthorized { provider },
            _ => Self::Api {
                provider,
                status,
                body: body.chars().take(MAX_BODY_SNIPPET).collect(),
            },
        }
    }

    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Parse a `Retry-After` header given in seconds
pub(crate) fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
