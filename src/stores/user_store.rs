use crate::models::user::User;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

/// Field that collided during an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertConflict {
    Username,
    Email,
    SteamId,
}

/// In-memory user directory.
///
/// Users are keyed by username; two secondary indexes map email and steamid
/// back to the owning username. Inserts are serialized through `write_lock`
/// so the three uniqueness checks and the index updates are atomic with
/// respect to other writers. Reads go straight to the maps.
pub struct UserStore {
    users: DashMap<String, Arc<User>>,
    email_index: DashMap<String, String>,
    steamid_index: DashMap<String, String>,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            steamid_index: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            users: DashMap::with_capacity(capacity),
            email_index: DashMap::with_capacity(capacity),
            steamid_index: DashMap::with_capacity(capacity),
            write_lock: Mutex::new(()),
        }
    }

    /// Insert a new user, enforcing uniqueness of username, email and steamid.
    ///
    /// This is the authoritative duplicate check; handler-level lookups before
    /// calling this are only a fast path and may race.
    pub fn insert(&self, user: User) -> Result<(), InsertConflict> {
        let _guard = self.write_lock.lock().unwrap();

        if self.users.contains_key(&user.username) {
            return Err(InsertConflict::Username);
        }
        if self.email_index.contains_key(&user.email) {
            return Err(InsertConflict::Email);
        }
        if self.steamid_index.contains_key(&user.steamid) {
            return Err(InsertConflict::SteamId);
        }

        self.email_index
            .insert(user.email.clone(), user.username.clone());
        self.steamid_index
            .insert(user.steamid.clone(), user.username.clone());
        self.users
            .insert(user.username.clone(), Arc::new(user));

        Ok(())
    }

    pub fn find_by_username(&self, username: &str) -> Option<Arc<User>> {
        self.users.get(username).map(|entry| Arc::clone(entry.value()))
    }

    pub fn find_by_email(&self, email: &str) -> Option<Arc<User>> {
        self.email_index
            .get(email)
            .and_then(|entry| self.find_by_username(entry.value()))
    }

    pub fn find_by_steamid(&self, steamid: &str) -> Option<Arc<User>> {
        self.steamid_index
            .get(steamid)
            .and_then(|entry| self.find_by_username(entry.value()))
    }

    /// Look up a user by a sign-in identifier, matched against username,
    /// steamid and email in that order. The three namespaces are not disjoint
    /// by construction, so an identifier can in principle hit a different
    /// field of a different record.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<Arc<User>> {
        self.find_by_username(identifier)
            .or_else(|| self.find_by_steamid(identifier))
            .or_else(|| self.find_by_email(identifier))
    }

    /// True match on any of the three unique fields.
    pub fn find_any(&self, username: &str, email: &str, steamid: &str) -> Option<Arc<User>> {
        self.find_by_username(username)
            .or_else(|| self.find_by_email(email))
            .or_else(|| self.find_by_steamid(steamid))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap();
        self.users.clear();
        self.email_index.clear();
        self.steamid_index.clear();
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str, steamid: &str) -> User {
        User::new(
            username.to_string(),
            email.to_string(),
            steamid.to_string(),
            "$2b$10$fakefakefakefakefakefake".to_string(),
        )
    }

    #[test]
    fn test_insert_and_find() {
        let store = UserStore::new();
        store.insert(user("alice", "alice@example.com", "76561198000000001")).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_username("alice").is_some());
        assert!(store.find_by_email("alice@example.com").is_some());
        assert!(store.find_by_steamid("76561198000000001").is_some());
        assert!(store.find_by_username("bob").is_none());
    }

    #[test]
    fn test_insert_duplicate_username() {
        let store = UserStore::new();
        store.insert(user("alice", "a@example.com", "1")).unwrap();

        let result = store.insert(user("alice", "b@example.com", "2"));
        assert_eq!(result, Err(InsertConflict::Username));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_email() {
        let store = UserStore::new();
        store.insert(user("alice", "shared@example.com", "1")).unwrap();

        let result = store.insert(user("bob", "shared@example.com", "2"));
        assert_eq!(result, Err(InsertConflict::Email));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_steamid() {
        let store = UserStore::new();
        store.insert(user("alice", "a@example.com", "76561198000000001")).unwrap();

        let result = store.insert(user("bob", "b@example.com", "76561198000000001"));
        assert_eq!(result, Err(InsertConflict::SteamId));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_insert_leaves_no_partial_indexes() {
        let store = UserStore::new();
        store.insert(user("alice", "a@example.com", "1")).unwrap();
        store.insert(user("alice", "b@example.com", "2")).unwrap_err();

        // The rejected user's email and steamid must not be reserved
        assert!(store.find_by_email("b@example.com").is_none());
        assert!(store.find_by_steamid("2").is_none());
    }

    #[test]
    fn test_find_by_identifier_matches_all_three_fields() {
        let store = UserStore::new();
        store.insert(user("alice", "alice@example.com", "76561198000000001")).unwrap();

        for id in ["alice", "alice@example.com", "76561198000000001"] {
            let found = store.find_by_identifier(id).expect("identifier should match");
            assert_eq!(found.username, "alice");
        }
        assert!(store.find_by_identifier("unknown").is_none());
    }

    #[test]
    fn test_find_any() {
        let store = UserStore::new();
        store.insert(user("alice", "alice@example.com", "1")).unwrap();

        assert!(store.find_any("alice", "x@example.com", "9").is_some());
        assert!(store.find_any("bob", "alice@example.com", "9").is_some());
        assert!(store.find_any("bob", "x@example.com", "1").is_some());
        assert!(store.find_any("bob", "x@example.com", "9").is_none());
    }

    #[test]
    fn test_lookups_are_exact_match() {
        let store = UserStore::new();
        store.insert(user("Alice", "Alice@Example.com", "1")).unwrap();

        assert!(store.find_by_username("alice").is_none());
        assert!(store.find_by_email("alice@example.com").is_none());
    }

    #[test]
    fn test_clear() {
        let store = UserStore::new();
        store.insert(user("alice", "a@example.com", "1")).unwrap();
        store.clear();

        assert!(store.is_empty());
        assert!(store.find_by_email("a@example.com").is_none());
        // Cleared identities can be registered again
        store.insert(user("alice", "a@example.com", "1")).unwrap();
    }

    #[test]
    fn test_concurrent_inserts_admit_exactly_one() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(UserStore::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                // All threads fight over the same steamid
                store.insert(user(
                    &format!("user{}", i),
                    &format!("user{}@example.com", i),
                    "76561198000000001",
                ))
            }));
        }

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
