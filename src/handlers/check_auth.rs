use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::MessageResponse;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Session check handler
///
/// GET /checkauth
///
/// Verifies the bearer token and echoes the username it was issued for.
pub async fn check_auth_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let token = crate::utils::auth::bearer_token(&headers).ok_or_else(|| {
        warn!("Missing bearer token");
        AuthError::Unauthorized
    })?;

    let username = state.tokens.verify(token).map_err(|e| {
        warn!(error = %e, "Token verification failed");
        AuthError::Unauthorized
    })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse { message: username }),
    )
        .into_response())
}
