use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Title;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

/// HTTP request body for updating a post (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, PostError> {
        let title = self.title.map(Title::new).transpose()?;

        Ok(UpdatePostCommand {
            title,
            content: self.content,
        })
    }
}

/// Response body for post operations
#[derive(Debug, Serialize, PartialEq)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            title: post.title.as_str().to_string(),
            content: post.content,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<ApiSuccess<PostResponse>, ApiError> {
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;
    let command = req.try_into_command()?;

    state
        .post_service
        .update_post(&principal, &post_id, command)
        .await
        .map_err(ApiError::from)
        .map(|post| ApiSuccess::new(StatusCode::OK, post.into()))
}
