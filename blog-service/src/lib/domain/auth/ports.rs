use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the authentication flows: register, login, refresh, and
/// current-principal lookup.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - identifier taken,
    ///   whether caught by the pre-check or by the store's constraint
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand)
        -> Result<(User, TokenPair), AuthError>;

    /// Authenticate credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown username or wrong password,
    ///   indistinguishably
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<(User, TokenPair), AuthError>;

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// The presented token must be of the refresh kind; the old pair is
    /// not revoked and remains live until it expires.
    ///
    /// # Errors
    /// * `InvalidToken` - bad, expired, wrong-kind token, or a subject
    ///   that no longer resolves to a user
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Resolve the authenticated principal to its user record.
    ///
    /// # Errors
    /// * `NotFound` - the principal no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, id: &UserId) -> Result<User, AuthError>;
}
