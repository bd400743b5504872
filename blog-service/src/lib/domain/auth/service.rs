use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service implementation for the authentication flows.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<(User, TokenPair), AuthError> {
        // Fast-path rejection; the store's unique constraints remain the
        // authoritative guard against a concurrent registration winning
        // the same identifier between this check and the insert.
        if self.repository.exists_by_username(&command.username).await? {
            return Err(AuthError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.repository.create(user).await?;
        let pair = self.authenticator.issue_pair(user.id)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok((user, pair))
    }

    async fn login(&self, command: LoginCommand) -> Result<(User, TokenPair), AuthError> {
        // An identifier that does not even parse as a username takes the
        // same path as an unknown one.
        let found = match Username::new(command.username) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        self.authenticator.verify_credentials(
            &command.password,
            found.as_ref().map(|user| user.password_hash.as_str()),
        )?;

        let user = found.ok_or(AuthError::InvalidCredentials)?;
        let pair = self.authenticator.issue_pair(user.id)?;

        Ok((user, pair))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let subject = self.authenticator.validate_refresh(refresh_token)?;
        let id = UserId::from_string(&subject).map_err(|_| AuthError::InvalidToken)?;

        // A token whose subject no longer resolves is just an invalid
        // token to the caller.
        let user = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(self.authenticator.issue_pair(user.id)?)
    }

    async fn current_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::RegisterUserCommand;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::user::errors::UserError;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;
            async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(
                b"test-secret-key-for-jwt-signing-32b!",
                Duration::minutes(15),
                Duration::days(7),
            )
            .expect("Failed to build authenticator"),
        )
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            Password::new("secret123".to_string()).unwrap(),
        )
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_tokens_for_new_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice" && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let authenticator = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let (user, pair) = service.register(register_command()).await.unwrap();

        // The issued access token resolves back to the new principal.
        let subject = authenticator.validate_access(&pair.access_token).unwrap();
        assert_eq!(subject, user.id.to_string());
        assert_eq!(pair.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_register_username_taken_fast_path() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_conflict_from_store_constraint() {
        let mut repository = MockTestUserRepository::new();

        // Pre-checks pass; a concurrent registration wins the insert race
        // and the store's constraint reports the conflict instead.
        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let user = stored_user(&authenticator, "secret123");
        let user_id = user.id;
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let (logged_in, pair) = service
            .login(LoginCommand {
                username: "alice".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.id, user_id);
        let subject = authenticator.validate_access(&pair.access_token).unwrap();
        assert_eq!(subject, user_id.to_string());
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let authenticator = authenticator();

        // Unknown username.
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));
        let unknown = service
            .login(LoginCommand {
                username: "nobody".to_string(),
                password: "secret123".to_string(),
            })
            .await;

        // Known username, wrong password.
        let mut repository = MockTestUserRepository::new();
        let user = stored_user(&authenticator, "secret123");
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));
        let wrong = service
            .login(LoginCommand {
                username: "alice".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        // Identifier that is not even a valid username.
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));
        let malformed = service
            .login(LoginCommand {
                username: "!!".to_string(),
                password: "secret123".to_string(),
            })
            .await;

        assert!(matches!(unknown.unwrap_err(), AuthError::InvalidCredentials));
        assert!(matches!(wrong.unwrap_err(), AuthError::InvalidCredentials));
        assert!(matches!(
            malformed.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestUserRepository::new();
        let authenticator = authenticator();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let pair = authenticator.issue_pair(UserId::new()).unwrap();

        let result = service.refresh(&pair.access_token).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair_for_same_subject() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let user = stored_user(&authenticator, "secret123");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let original = authenticator.issue_pair(user_id).unwrap();
        let refreshed = service.refresh(&original.refresh_token).await.unwrap();

        let subject = authenticator
            .validate_access(&refreshed.access_token)
            .unwrap();
        assert_eq!(subject, user_id.to_string());
    }

    #[tokio::test]
    async fn test_refresh_rejects_deleted_subject() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let pair = authenticator.issue_pair(UserId::new()).unwrap();
        let result = service.refresh(&pair.refresh_token).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }
}
