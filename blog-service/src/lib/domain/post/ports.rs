use async_trait::async_trait;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new post owned by the authenticated principal.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Principal no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        principal: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// Retrieve post by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// Retrieve an author's posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, author: &UserId) -> Result<Vec<Post>, PostError>;

    /// Update a post on behalf of an authenticated principal.
    ///
    /// The post is fetched before authorization so a missing post is
    /// reported as `NotFound` rather than `Forbidden`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist (or disappeared mid-update)
    /// * `Forbidden` - Principal is not the post's author
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        principal: &UserId,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post on behalf of an authenticated principal.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - Principal is not the post's author
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, principal: &UserId, id: &PostId) -> Result<(), PostError>;
}

/// Persistence operations for the post aggregate.
///
/// Mutations are owner-scoped: `update` and `delete` must only touch a
/// row whose author matches, and report an untouched row as `NotFound`.
/// This closes the window between the service's ownership check and the
/// write when a concurrent delete removes the post.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist new post to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve an author's posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError>;

    /// Update existing post in storage, scoped to its author.
    ///
    /// # Errors
    /// * `NotFound` - No post with this id and author
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// Remove a post from storage, scoped to its author.
    ///
    /// # Errors
    /// * `NotFound` - No post with this id and author
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PostId, author: &UserId) -> Result<(), PostError>;
}
