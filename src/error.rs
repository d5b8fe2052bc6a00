//! Error types for decoding Fleet Data API payloads and running requests.
//!
//! Unknown rank codes and absent timestamps are not errors: they decode to
//! `None`. Only structural problems are raised, and they are raised at the
//! point of detection without returning a partially decoded value.

use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while turning a response body into model types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A positional array or metadata object does not fit its schema.
    #[error("malformed {entity}: {reason}")]
    MalformedEntity {
        entity: &'static str,
        reason: String,
    },

    /// The top-level envelope is missing an expected key or is not valid JSON.
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },
}

impl DecodeError {
    pub(crate) fn entity(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            entity,
            reason: reason.into(),
        }
    }

    pub(crate) fn envelope(reason: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::envelope(format!("invalid JSON: {e}"))
    }
}

/// Errors returned by [`FleetDataClient`](crate::client::FleetDataClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not complete the request.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_entity() {
        let err = DecodeError::entity("Fleet", "expected at least 8 elements, got 3");
        assert_eq!(
            err.to_string(),
            "malformed Fleet: expected at least 8 elements, got 3"
        );
    }

    #[test]
    fn test_json_error_is_envelope_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DecodeError::from(parse);
        assert!(matches!(err, DecodeError::MalformedEnvelope { .. }));
    }
}
