use crate::errors::ApiError;
use crate::http::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Bearer-token check applied to every student route. The token set comes
/// from server configuration; an empty set means nobody gets in.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    match token {
        Some(token) if state.api_tokens.iter().any(|known| known == token) => {
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::Unauthorized("missing or invalid bearer token".into())),
    }
}
