use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub steamid: String,
    pub password: String,
}

/// Sign-in body. `username` doubles as a generic identifier: it is matched
/// against the username, steamid and email fields of the directory.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub username: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SteamCheckQuery {
    #[serde(default)]
    pub steamid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredsCheckQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub api_key: String,
}
