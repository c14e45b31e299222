use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{AuthResponse, SigninRequest};
use crate::utils::password;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Signin handler
///
/// POST /signin
///
/// The submitted identifier is matched against username, steamid and email.
/// Unknown identifier and wrong password produce the same error so callers
/// cannot probe which accounts exist.
#[instrument(skip(state, body))]
pub async fn signin_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SigninRequest>,
) -> Result<Response, AuthError> {
    state.metrics.increment_requests();

    let user = state
        .user_store
        .find_by_identifier(&body.username)
        .ok_or_else(|| {
            warn!("Unknown sign-in identifier");
            state.metrics.increment_failed();
            AuthError::InvalidCredentials
        })?;

    if !password::verify_password(&body.password, &user.password_hash) {
        warn!(username = %user.username, "Password mismatch");
        state.metrics.increment_failed();
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.username).map_err(|e| {
        warn!(error = %e, "Token issuance failed");
        state.metrics.increment_failed();
        AuthError::Persistence(e.into())
    })?;

    info!(username = %user.username, "User authenticated");
    state.metrics.increment_successful();

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            username: user.username.clone(),
            access_token: token,
        }),
    )
        .into_response())
}
