use auth::AuthenticationError;
use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Top-level error for authentication flows.
///
/// `InvalidCredentials` and `InvalidToken` are deliberately reason-free:
/// callers cannot tell an unknown identifier from a wrong password, or an
/// expired token from a forged one.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => {
                AuthError::UsernameAlreadyExists(username)
            }
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            UserError::NotFound(id) => AuthError::NotFound(id),
            UserError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            e => AuthError::Unknown(e.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::EncodingFailed(msg) => AuthError::Unknown(msg),
        }
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => AuthError::Unknown(e.to_string()),
            AuthenticationError::TokenError(e) => AuthError::from(e),
        }
    }
}
