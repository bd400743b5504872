use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenKind;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and signed-token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    fallback_hash: String,
}

/// Access/refresh token pair issued on successful authentication.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `access_ttl` - Lifetime of issued access tokens
    /// * `refresh_ttl` - Lifetime of issued refresh tokens
    ///
    /// # Errors
    /// * `PasswordError` - hashing the fallback digest failed; fatal at
    ///   startup, never per-request
    pub fn new(
        jwt_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        // Verified against whenever the identifier lookup misses, so the
        // unknown-identifier path pays the same hashing cost as the
        // wrong-password path.
        let fallback_hash = password_hasher.hash("fallback-credential")?;

        Ok(Self {
            password_hasher,
            token_codec: TokenCodec::new(jwt_secret, access_ttl, refresh_ttl),
            fallback_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a presented password against an optionally-found stored hash.
    ///
    /// `None` means the identifier lookup missed; the fallback digest is
    /// still verified and the outcome forced to a mismatch. Unknown
    /// identifier and wrong password are indistinguishable in both the
    /// returned error and the work performed.
    ///
    /// # Errors
    /// * `InvalidCredentials` - password mismatch or unknown identifier
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let matched = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                self.password_hasher.verify(password, &self.fallback_hash);
                false
            }
        };

        if matched {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a fresh access/refresh token pair for `subject`.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_pair(&self, subject: impl ToString) -> Result<TokenPair, TokenError> {
        let subject = subject.to_string();

        let access_token = self.token_codec.issue(&subject, TokenKind::Access)?;
        let refresh_token = self.token_codec.issue(&subject, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_codec.access_ttl().num_seconds(),
        })
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `TokenError::Invalid` - token failed any validation check
    pub fn validate_access(&self, token: &str) -> Result<String, TokenError> {
        self.token_codec.validate(token, TokenKind::Access)
    }

    /// Validate a refresh token and return its subject.
    ///
    /// # Errors
    /// * `TokenError::Invalid` - token failed any validation check
    pub fn validate_refresh(&self, token: &str) -> Result<String, TokenError> {
        self.token_codec.validate(token, TokenKind::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::minutes(15),
            Duration::days(7),
        )
        .expect("Failed to build authenticator")
    }

    #[test]
    fn test_verify_credentials_success() {
        let auth = authenticator();
        let hash = auth.hash_password("my_password").unwrap();

        assert!(auth
            .verify_credentials("my_password", Some(hash.as_str()))
            .is_ok());
    }

    #[test]
    fn test_wrong_password_and_missing_hash_fail_identically() {
        let auth = authenticator();
        let hash = auth.hash_password("my_password").unwrap();

        let wrong = auth.verify_credentials("other_password", Some(hash.as_str()));
        let missing = auth.verify_credentials("other_password", None);

        assert!(matches!(
            wrong,
            Err(AuthenticationError::InvalidCredentials)
        ));
        assert!(matches!(
            missing,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_pair_validates_by_kind() {
        let auth = authenticator();

        let pair = auth.issue_pair("user123").expect("Failed to issue pair");

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 15 * 60);
        assert_eq!(auth.validate_access(&pair.access_token).unwrap(), "user123");
        assert_eq!(
            auth.validate_refresh(&pair.refresh_token).unwrap(),
            "user123"
        );

        // Each token only passes as its own kind.
        assert!(auth.validate_refresh(&pair.access_token).is_err());
        assert!(auth.validate_access(&pair.refresh_token).is_err());
    }
}
