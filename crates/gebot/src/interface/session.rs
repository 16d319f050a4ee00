//! Linked player profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedProfile {
    pub user_id: String,
    pub player_name: String,
    pub linked_at: DateTime<Utc>,
}

/// Chat user id to in-game name mapping.
///
/// Cloning shares the underlying map. Contents live for the process
/// lifetime only. A lock poisoned by a panicking holder is recovered: each
/// write is a single insert, so the map is never left half-updated.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Arc<RwLock<HashMap<String, LinkedProfile>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, LinkedProfile>> {
        self.profiles.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Profile store lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, LinkedProfile>> {
        self.profiles.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Profile store lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Link `user_id` to `player_name`, replacing any earlier link.
    /// Returns the previously linked name.
    pub fn link(&self, user_id: &str, player_name: &str) -> Option<String> {
        let profile = LinkedProfile {
            user_id: user_id.to_string(),
            player_name: player_name.trim().to_string(),
            linked_at: Utc::now(),
        };

        let previous = self
            .write()
            .insert(user_id.to_string(), profile)
            .map(|p| p.player_name);

        tracing::info!(user = user_id, player = player_name, "Linked profile");
        previous
    }

    /// Linked player name for `user_id`
    pub fn resolve(&self, user_id: &str) -> Option<String> {
        self.profile(user_id).map(|p| p.player_name)
    }

    pub fn profile(&self, user_id: &str) -> Option<LinkedProfile> {
        self.read().get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_and_resolve() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.resolve("u1"), None);

        assert_eq!(store.link("u1", "Zezima"), None);
        assert_eq!(store.resolve("u1").as_deref(), Some("Zezima"));
        assert_eq!(store.resolve("u2"), None);
    }

    #[test]
    fn test_relink_overwrites() {
        let store = ProfileStore::new();
        store.link("u1", "Zezima");
        let previous = store.link("u1", "Other");

        assert_eq!(previous.as_deref(), Some("Zezima"));
        assert_eq!(store.resolve("u1").as_deref(), Some("Other"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProfileStore::new();
        let handle = store.clone();
        handle.link("u1", "Zezima");

        let profile = store.profile("u1").unwrap();
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.player_name, "Zezima");
    }

    #[tokio::test]
    async fn test_concurrent_links() {
        let store = ProfileStore::new();
        let tasks = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.link(&format!("u{i}"), &format!("player{i}"));
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.len(), 16);
        assert_eq!(store.resolve("u7").as_deref(), Some("player7"));
    }

    #[test]
    fn test_poisoned_lock_is_recovered_for_reads_and_writes() {
        let store = ProfileStore::new();
        store.link("u1", "Zezima");

        let holder = store.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = holder.profiles.write().unwrap();
            panic!("holder panicked while linking");
        })
        .join();
        assert!(outcome.is_err());
        assert!(store.profiles.is_poisoned());

        assert_eq!(store.resolve("u1").as_deref(), Some("Zezima"));
        assert_eq!(store.link("u1", "Other").as_deref(), Some("Zezima"));
        assert_eq!(store.resolve("u1").as_deref(), Some("Other"));
        assert_eq!(store.len(), 1);
    }
}
