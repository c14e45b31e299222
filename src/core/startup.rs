use anyhow::Result;
use tracing::warn;

use crate::core::state::AppState;
use crate::models::user::User;
use crate::wal::wal::WalOperation;

// this runs at boot time
pub fn apply_wal_operations(state: &AppState, operations: &[WalOperation]) -> Result<()> {
    for op in operations {
        match op {
            WalOperation::AddUser {
                username,
                email,
                steamid,
                password_hash,
            } => {
                let user = User::new(
                    username.clone(),
                    email.clone(),
                    steamid.clone(),
                    password_hash.clone(),
                );

                if let Err(conflict) = state.user_store.insert(user) {
                    // A duplicate line can appear after a crash between the
                    // store insert and a later snapshot; keep the first record.
                    warn!(
                        username = %username,
                        conflict = ?conflict,
                        "Skipping duplicate WAL user entry"
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::SteamClient;
    use crate::core::config::Config;
    use crate::wal::wal::Wal;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_state() -> AppState {
        let temp_dir = TempDir::new().unwrap();
        let wal = Wal::new(temp_dir.path().join("test.wal")).unwrap();

        let config: Config = toml::from_str(
            r#"
                [server]
                port = 8080
                api_key = "operator-key"

                [auth]
                jwt_secret = "a-secret-long-enough-for-tests"
                bcrypt_cost = 4

                [steam]
                api_key = "steam-key"
                endpoint = "http://127.0.0.1:9/"

                [logging]
            "#,
        )
        .unwrap();

        let steam = SteamClient::new(
            config.steam.endpoint.clone(),
            config.steam.api_key.clone(),
            Duration::from_secs(config.steam.timeout_secs),
        )
        .unwrap();

        AppState::new(config, wal, steam)
    }

    fn add_user_op(username: &str, email: &str, steamid: &str) -> WalOperation {
        WalOperation::AddUser {
            username: username.to_string(),
            email: email.to_string(),
            steamid: steamid.to_string(),
            password_hash: "$2b$10$hash".to_string(),
        }
    }

    #[test]
    fn test_apply_wal_operations_populates_store() {
        let state = create_test_state();

        let operations = vec![
            add_user_op("alice", "alice@example.com", "1"),
            add_user_op("bob", "bob@example.com", "2"),
        ];

        apply_wal_operations(&state, &operations).unwrap();

        assert_eq!(state.user_store.len(), 2);
        let alice = state.user_store.find_by_username("alice").unwrap();
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.password_hash, "$2b$10$hash");
    }

    #[test]
    fn test_apply_wal_operations_skips_duplicates() {
        let state = create_test_state();

        let operations = vec![
            add_user_op("alice", "alice@example.com", "1"),
            add_user_op("alice", "other@example.com", "2"),
        ];

        apply_wal_operations(&state, &operations).unwrap();

        assert_eq!(state.user_store.len(), 1);
        let alice = state.user_store.find_by_username("alice").unwrap();
        assert_eq!(alice.email, "alice@example.com");
    }
}
