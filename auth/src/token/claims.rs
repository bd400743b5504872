use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token variant carried inside the signed payload.
///
/// Access tokens authenticate ordinary requests; refresh tokens are only
/// accepted by the refresh flow. Neither is accepted in the other's place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed token payload.
///
/// The subject is an opaque stable identifier; the full principal is
/// resolved from storage where needed, never carried in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token variant
    pub kind: TokenKind,
}

impl Claims {
    /// Create claims expiring `ttl` from now.
    pub fn new(subject: impl ToString, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind,
        }
    }

    /// Check whether the claims are expired at `now`.
    ///
    /// The boundary is exclusive: claims are live strictly before `exp`
    /// and expired at `exp` itself.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user123", TokenKind::Access, Duration::minutes(15));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_is_expired_boundary() {
        let claims = Claims {
            sub: "user123".to_string(),
            iat: 900,
            exp: 1000,
            kind: TokenKind::Access,
        };

        assert!(!claims.is_expired(999)); // Strictly before expiry
        assert!(claims.is_expired(1000)); // Exactly at expiry
        assert!(claims.is_expired(1001)); // Past expiry
    }
}
