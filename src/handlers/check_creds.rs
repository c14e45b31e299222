use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{CredsCheckQuery, MessageResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Credential availability handler
///
/// GET /checkcreds?username=<name>&email=<addr>
///
/// Username is checked first and short-circuits; then email. Advisory only:
/// nothing is reserved, signup re-checks under its own uniqueness guarantee.
#[instrument(skip(state, params))]
pub async fn check_creds_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CredsCheckQuery>,
) -> Result<Response, AuthError> {
    state.metrics.increment_requests();

    if let Some(username) = params.username.as_deref() {
        if state.user_store.find_by_username(username).is_some() {
            warn!(username = %username, "Username is taken");
            return Err(AuthError::UsernameTaken);
        }
    }

    if let Some(email) = params.email.as_deref() {
        if state.user_store.find_by_email(email).is_some() {
            warn!("E-mail is already registered");
            return Err(AuthError::EmailTaken);
        }
    }

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Credential Check Success!".to_string(),
        }),
    )
        .into_response())
}
