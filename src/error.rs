// Error types for talking to the research backend.
//
// The API layer returns a typed `ApiError` so the submission flow can tell
// a rejected request (non-success status, body shown verbatim) apart from a
// broken response shape or a network failure. The binary and UI code keep
// using `anyhow` on top of this.

use thiserror::Error;

/// Failures that can happen during one backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, reset, ...).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status. `body` is the raw
    /// response text.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// Success status, but the body does not have the expected shape.
    #[error("malformed response from {endpoint}: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The endpoint path the failing call was made against.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Malformed { endpoint, .. } => endpoint,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_endpoint_and_body() {
        let err = ApiError::Status {
            endpoint: "/research",
            status: 503,
            body: "backend overloaded".into(),
        };
        assert_eq!(err.endpoint(), "/research");
        assert_eq!(err.to_string(), "/research returned 503: backend overloaded");
    }

    #[test]
    fn malformed_error_carries_serde_detail() {
        let source = serde_json::from_str::<Vec<String>>("{}").unwrap_err();
        let err = ApiError::Malformed { endpoint: "/deep_research", source };
        let msg = err.to_string();
        assert!(msg.starts_with("malformed response from /deep_research:"), "{msg}");
    }
}
