// Centralized error handling for the gateway

use crate::models::api::MessageResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Errors surfaced by the credential endpoints.
///
/// Display strings double as the user-facing response bodies, so they must
/// stay categorical: no field names on duplicates, no distinction between
/// unknown identifier and wrong password, no internal detail on 500s.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Enter a valid SteamID")]
    InvalidSteamId,

    #[error("The Username/E-mail/SteamID has already been registered!")]
    DuplicateIdentity,

    #[error("Please check your credentials!")]
    InvalidCredentials,

    #[error("This SteamID Does Not Exist!")]
    SteamIdNotFound,

    #[error("This Username is already taken!")]
    UsernameTaken,

    #[error("This E-mail is already registered!")]
    EmailTaken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Something went wrong, Try again!")]
    Persistence(#[source] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidSteamId
            | AuthError::DuplicateIdentity
            | AuthError::InvalidCredentials
            | AuthError::SteamIdNotFound
            | AuthError::UsernameTaken
            | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(MessageResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MonitoringError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (status, message).into_response()
    }
}
