use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;

    state
        .post_service
        .delete_post(&principal, &post_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
