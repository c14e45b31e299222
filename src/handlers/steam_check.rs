use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{MessageResponse, SteamCheckQuery};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Steam ID validation handler
///
/// GET /checksteamauth?steamid=<id>
///
/// Asks the Steam Web API whether the ID resolves to an account. Transport
/// and parse failures are logged and reported as not-found: a transient
/// Steam outage is indistinguishable from an invalid ID at this surface.
/// This check reserves nothing; a later signup can still race.
#[instrument(skip(state, params))]
pub async fn steam_check_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SteamCheckQuery>,
) -> Result<Response, AuthError> {
    state.metrics.increment_requests();

    let steamid = match params.steamid.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => {
            warn!("Missing or empty steamid parameter");
            return Err(AuthError::InvalidSteamId);
        }
    };

    state.metrics.increment_steam_lookups();

    let exists = match state.steam.player_exists(steamid).await {
        Ok(exists) => exists,
        Err(e) => {
            // Fail closed: lookup failures degrade to not-found
            warn!(steamid = %steamid, error = %e, "Steam lookup failed");
            false
        }
    };

    if !exists {
        info!(steamid = %steamid, "SteamID not found");
        return Err(AuthError::SteamIdNotFound);
    }

    info!(steamid = %steamid, "SteamID confirmed");

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "SteamID is Valid".to_string(),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::SteamClient;
    use crate::core::config::Config;
    use crate::wal::wal::Wal;
    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    fn create_test_state_with_endpoint(endpoint: &str) -> Arc<AppState> {
        let temp_dir = TempDir::new().unwrap();
        let wal = Wal::new(temp_dir.path().join("test.wal")).unwrap();

        let config: Config = toml::from_str(&format!(
            r#"
                [server]
                port = 8080
                api_key = "operator-key"

                [auth]
                jwt_secret = "a-secret-long-enough-for-tests"
                bcrypt_cost = 4

                [steam]
                api_key = "steam-key"
                endpoint = "{}"
                timeout_secs = 1

                [logging]
            "#,
            endpoint
        ))
        .unwrap();

        let steam = SteamClient::new(
            config.steam.endpoint.clone(),
            config.steam.api_key.clone(),
            Duration::from_secs(config.steam.timeout_secs),
        )
        .unwrap();

        Arc::new(AppState::new(config, wal, steam))
    }

    async fn spawn_steam_stub(players: serde_json::Value) -> String {
        let app = Router::new().route(
            "/",
            get(move || {
                let players = players.clone();
                async move { Json(serde_json::json!({"response": {"players": players}})) }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_missing_steamid_is_invalid_input() {
        let state = create_test_state_with_endpoint("http://127.0.0.1:9/");

        for query in [
            SteamCheckQuery { steamid: None },
            SteamCheckQuery {
                steamid: Some(String::new()),
            },
        ] {
            let result = steam_check_handler(State(Arc::clone(&state)), Query(query)).await;
            assert!(matches!(result, Err(AuthError::InvalidSteamId)));
        }
    }

    #[tokio::test]
    async fn test_existing_steamid_is_confirmed() {
        let endpoint =
            spawn_steam_stub(serde_json::json!([{"steamid": "76561198000000001"}])).await;
        let state = create_test_state_with_endpoint(&endpoint);

        let response = steam_check_handler(
            State(state),
            Query(SteamCheckQuery {
                steamid: Some("76561198000000001".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let message: MessageResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(message.message, "SteamID is Valid");
    }

    #[tokio::test]
    async fn test_unknown_steamid_is_not_found() {
        let endpoint = spawn_steam_stub(serde_json::json!([])).await;
        let state = create_test_state_with_endpoint(&endpoint);

        let result = steam_check_handler(
            State(state),
            Query(SteamCheckQuery {
                steamid: Some("76561198000000001".to_string()),
            }),
        )
        .await;

        assert!(matches!(result, Err(AuthError::SteamIdNotFound)));
    }

    #[tokio::test]
    async fn test_transport_failure_reads_as_not_found() {
        // Nothing listens on this endpoint; the lookup errors out
        let state = create_test_state_with_endpoint("http://127.0.0.1:9/");

        let result = steam_check_handler(
            State(state),
            Query(SteamCheckQuery {
                steamid: Some("76561198000000001".to_string()),
            }),
        )
        .await;

        // Fail-closed: same outcome as a genuinely unknown ID
        assert!(matches!(result, Err(AuthError::SteamIdNotFound)));
    }
}
