use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Client for the Steam Web API (GetPlayerSummaries)
pub struct SteamClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Response envelope: `{ "response": { "players": [...] } }`
///
/// Both levels default to empty so a missing `players` array reads as an
/// empty result set rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub response: PlayerList,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerList {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    #[serde(default)]
    pub personaname: String,
}

impl SteamClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Ask Steam whether the given ID resolves to an existing account.
    ///
    /// An empty player list means the account does not exist. Transport and
    /// parse failures are returned to the caller, which decides how to
    /// degrade them.
    pub async fn player_exists(&self, steamid: &str) -> Result<bool> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("steamids", steamid)])
            .send()
            .await
            .context("Failed to send request to Steam API")?;

        if !response.status().is_success() {
            bail!("Steam API returned error status: {}", response.status());
        }

        let data = response
            .json::<PlayerSummaries>()
            .await
            .context("Failed to parse JSON response from Steam API")?;

        Ok(!data.response.players.is_empty())
    }
}
