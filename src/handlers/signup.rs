use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{AuthResponse, SignupRequest};
use crate::models::user::User;
use crate::utils::password;
use crate::wal::wal::WalOperation;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Signup handler
///
/// POST /signup
///
/// # Flow
/// 1. Reject if username, email or steamid is already registered
/// 2. Hash the password with bcrypt
/// 3. Insert the user; the store's own uniqueness check is authoritative
///    for races past step 1
/// 4. Append the registration to the WAL
/// 5. Mint a session token for the new username
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<Response, AuthError> {
    state.metrics.increment_requests();

    // Fast-path duplicate rejection; check-then-insert is not atomic, the
    // insert below is the authoritative check
    if state
        .user_store
        .find_any(&body.username, &body.email, &body.steamid)
        .is_some()
    {
        warn!("Identity already registered");
        state.metrics.increment_failed();
        return Err(AuthError::DuplicateIdentity);
    }

    let password_hash =
        password::hash_password(&body.password, state.config.auth.bcrypt_cost).map_err(|e| {
            warn!(error = %e, "Password hashing failed");
            state.metrics.increment_failed();
            AuthError::Persistence(e.into())
        })?;

    let user = User::new(
        body.username.clone(),
        body.email.clone(),
        body.steamid.clone(),
        password_hash.clone(),
    );

    if let Err(conflict) = state.user_store.insert(user) {
        warn!(conflict = ?conflict, "Insert lost a registration race");
        state.metrics.increment_failed();
        return Err(AuthError::DuplicateIdentity);
    }

    if let Err(e) = state.wal.log_operation(WalOperation::AddUser {
        username: body.username.clone(),
        email: body.email.clone(),
        steamid: body.steamid.clone(),
        password_hash,
    }) {
        warn!(error = %e, "Failed to log registration to WAL");
        // Continue anyway - store is updated
    }

    let token = state.tokens.issue(&body.username).map_err(|e| {
        warn!(error = %e, "Token issuance failed");
        state.metrics.increment_failed();
        AuthError::Persistence(e.into())
    })?;

    info!("User registered");
    state.metrics.increment_successful();

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            username: body.username,
            access_token: token,
        }),
    )
        .into_response())
}
