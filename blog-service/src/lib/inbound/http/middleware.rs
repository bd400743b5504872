use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated principal for one request.
///
/// Inserted by the `authenticate` middleware at most once per request and
/// dropped with the request; it is never shared across requests.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that resolves a bearer token into a request principal.
///
/// A missing, malformed, invalid, or expired token does not abort the
/// request; it simply leaves no principal attached, and handlers that
/// need one reject through [`CurrentUser`]. Applied as a single global
/// layer so it runs exactly once per inbound request.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(user) = resolve_principal(&state, &req) {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn resolve_principal(state: &AppState, req: &Request) -> Option<AuthenticatedUser> {
    let token = bearer_token(req)?;

    let subject = state
        .authenticator
        .validate_access(token)
        .map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
        })
        .ok()?;

    let user_id = UserId::from_string(&subject)
        .map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a user id");
        })
        .ok()?;

    Some(AuthenticatedUser { user_id })
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor for handlers that require an authenticated principal.
///
/// Rejects with 401 when the middleware attached no principal.
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|user| CurrentUser(user.user_id))
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
