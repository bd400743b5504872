use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures deliberately carry no reason: expired, forged,
/// malformed, and wrong-kind tokens are indistinguishable to callers.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    Invalid,
}
