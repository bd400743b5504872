use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ownership::require_owner;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user profile operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new user service with injected dependencies.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<R> UserServicePort for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        principal: &UserId,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        require_owner(principal, &user.id)?;

        // Uniqueness re-checks skip unchanged values so a no-op update
        // does not conflict with the record itself.
        if let Some(new_username) = command.username {
            if new_username != user.username
                && self.repository.exists_by_username(&new_username).await?
            {
                return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
            }
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            if new_email != user.email && self.repository.exists_by_email(&new_email).await? {
                return Err(UserError::EmailAlreadyExists(
                    new_email.as_str().to_string(),
                ));
            }
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(new_password.as_str())
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, principal: &UserId, id: &UserId) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        require_owner(principal, &user.id)?;

        self.repository.delete(id).await
    }
}
