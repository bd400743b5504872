use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ownership::require_owner;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for post operations.
///
/// Holds the user repository alongside the post repository so creation
/// can confirm the author still exists.
pub struct PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    /// Create a new post service with injected dependencies.
    pub fn new(posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self { posts, users }
    }
}

#[async_trait]
impl<PR, UR> PostServicePort for PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    async fn create_post(
        &self,
        principal: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let author = self
            .users
            .find_by_id(principal)
            .await
            .map_err(|e| match e {
                UserError::DatabaseError(msg) => PostError::DatabaseError(msg),
                e => PostError::Unknown(e.to_string()),
            })?
            .ok_or(PostError::AuthorNotFound(principal.to_string()))?;

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            author_id: author.id,
            title: command.title,
            content: command.content,
            created_at: now,
            updated_at: now,
        };

        self.posts.create(post).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn list_posts(&self, author: &UserId) -> Result<Vec<Post>, PostError> {
        self.posts.find_by_author(author).await
    }

    async fn update_post(
        &self,
        principal: &UserId,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        require_owner(principal, &post.author_id)?;

        if let Some(new_title) = command.title {
            post.title = new_title;
        }

        if let Some(new_content) = command.content {
            post.content = new_content;
        }

        post.updated_at = Utc::now();

        // The repository scopes the write to (id, author); a post deleted
        // between the fetch and here comes back as NotFound.
        self.posts.update(post).await
    }

    async fn delete_post(&self, principal: &UserId, id: &PostId) -> Result<(), PostError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        require_owner(principal, &post.author_id)?;

        self.posts.delete(id, &post.author_id).await
    }
}
