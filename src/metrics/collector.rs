use crate::stores::user_store::UserStore;
use crate::utils::time::current_timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub total_requests: AtomicU64,
    pub successful_auths: AtomicU64,
    pub failed_auths: AtomicU64,
    pub steam_lookups: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_auths: u64,
    pub failed_auths: u64,
    pub auth_success_rate: f64,
    pub steam_lookups: u64,
    pub registered_users: usize,
    pub uptime_seconds: i64,
    pub requests_per_second: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful_auths: AtomicU64::new(0),
            failed_auths: AtomicU64::new(0),
            steam_lookups: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    pub fn increment_requests(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_successful(&self) {
        self.successful_auths.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed_auths.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_steam_lookups(&self) {
        self.steam_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Collects counters and derives auth_success_rate, uptime_seconds and
    /// requests_per_second.
    pub fn get_snapshot(&self, user_store: &UserStore) -> MetricsSnapshot {
        let current_time = current_timestamp();

        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let successful_auths = self.successful_auths.load(Ordering::Relaxed);
        let failed_auths = self.failed_auths.load(Ordering::Relaxed);
        let steam_lookups = self.steam_lookups.load(Ordering::Relaxed);

        let attempted = successful_auths + failed_auths;
        let auth_success_rate = if attempted > 0 {
            (successful_auths as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        let uptime_seconds = current_time - self.start_time;

        let requests_per_second = if uptime_seconds > 0 {
            total_requests as f64 / uptime_seconds as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests,
            successful_auths,
            failed_auths,
            auth_success_rate,
            steam_lookups,
            registered_users: user_store.len(),
            uptime_seconds,
            requests_per_second,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;

    #[test]
    fn test_new_metrics() {
        let metrics = Metrics::new();

        assert_eq!(metrics.total_requests.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.successful_auths.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.failed_auths.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.steam_lookups.load(Ordering::Relaxed), 0);
        assert!(metrics.start_time > 0);
    }

    #[test]
    fn test_increments() {
        let metrics = Metrics::new();

        metrics.increment_requests();
        metrics.increment_requests();
        metrics.increment_successful();
        metrics.increment_failed();
        metrics.increment_steam_lookups();

        assert_eq!(metrics.total_requests.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.successful_auths.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.failed_auths.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.steam_lookups.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_get_snapshot_empty() {
        let metrics = Metrics::new();
        let store = UserStore::new();

        let snapshot = metrics.get_snapshot(&store);

        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.auth_success_rate, 0.0);
        assert_eq!(snapshot.registered_users, 0);
        assert!(snapshot.uptime_seconds >= 0);
        assert_eq!(snapshot.requests_per_second, 0.0);
    }

    #[test]
    fn test_snapshot_counts_registered_users() {
        let metrics = Metrics::new();
        let store = UserStore::new();

        store
            .insert(User::new(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "76561198000000001".to_string(),
                "$2b$10$hash".to_string(),
            ))
            .unwrap();

        let snapshot = metrics.get_snapshot(&store);
        assert_eq!(snapshot.registered_users, 1);
    }

    #[test]
    fn test_auth_success_rate_calculation() {
        let metrics = Metrics::new();
        let store = UserStore::new();

        // 8 successful out of 10 attempted = 80%
        for _ in 0..8 {
            metrics.increment_successful();
        }
        for _ in 0..2 {
            metrics.increment_failed();
        }

        let snapshot = metrics.get_snapshot(&store);
        assert_eq!(snapshot.auth_success_rate, 80.0);
    }
}
