use thiserror::Error;

/// A candidate whose levels cannot be evaluated. Raised before any
/// risk/reward ratio is computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CandidateError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("confidence {0} outside 0-100")]
    ConfidenceOutOfRange(i64),

    #[error("{direction} levels out of order: expected {expected}")]
    Ordering {
        direction: &'static str,
        expected: &'static str,
    },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("unrecognised direction: {0}")]
    UnknownDirection(String),
}

/// Failures of the market-data or LLM collaborators.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Why a candidate source could not produce a candidate.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("malformed candidate: {0}")]
    Malformed(#[from] CandidateError),
}
