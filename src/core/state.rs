// Application state (AppState)

use crate::api::client::SteamClient;
use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::stores::user_store::UserStore;
use crate::utils::token::TokenIssuer;
use crate::wal::wal::Wal;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// User directory, the sole owner of user records
    pub user_store: Arc<UserStore>,

    /// Outbound Steam Web API client
    pub steam: Arc<SteamClient>,

    /// Session token mint and verifier
    pub tokens: Arc<TokenIssuer>,

    /// Metrics collector for tracking statistics
    pub metrics: Arc<Metrics>,

    /// Write-Ahead Log for persistence
    pub wal: Arc<Wal>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, wal: Wal, steam: SteamClient) -> Self {
        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);

        Self {
            user_store: Arc::new(UserStore::new()),
            steam: Arc::new(steam),
            tokens: Arc::new(tokens),
            metrics: Arc::new(Metrics::new()),
            wal: Arc::new(wal),
            config: Arc::new(config),
        }
    }
}
