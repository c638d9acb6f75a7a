#[macro_use]
extern crate log;

use std::collections::HashSet;

use dashmap::DashMap;

/// Process-local registry of users with a live realtime connection.
///
/// Entries map a user to the connection handle events should be pushed
/// through. The registry is rebuilt empty on every process start; it is
/// routing state, never a durable source of truth. At most one entry exists
/// per user: a second connection from the same user overwrites the handle
/// (last-connected-wins, no multi-device fan-out).
pub struct PresenceRegistry<H: Clone> {
    entries: DashMap<i64, H>,
}

impl<H: Clone> Default for PresenceRegistry<H> {
    fn default() -> Self {
        PresenceRegistry {
            entries: DashMap::new(),
        }
    }
}

impl<H: Clone> PresenceRegistry<H> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Mark a user as online, unconditionally overwriting any prior handle
    pub fn set_online(&self, user_id: i64, handle: H) {
        info!("Creating presence entry for user {user_id}.");
        self.entries.insert(user_id, handle);
    }

    /// Mark a user as offline, returns whether an entry was removed
    pub fn set_offline(&self, user_id: i64) -> bool {
        let removed = self.entries.remove(&user_id).is_some();
        if removed {
            info!("User {user_id} just went offline.");
        }

        removed
    }

    /// Mark a user as offline only if their current handle satisfies the
    /// given predicate, returns whether an entry was removed.
    ///
    /// Used by the gateway disconnect path: an overwritten connection must
    /// not purge the entry of the connection that replaced it.
    pub fn set_offline_if<F>(&self, user_id: i64, predicate: F) -> bool
    where
        F: FnOnce(&H) -> bool,
    {
        let removed = self
            .entries
            .remove_if(&user_id, |_, handle| predicate(handle))
            .is_some();

        if removed {
            info!("User {user_id} just went offline.");
        }

        removed
    }

    /// Look up the connection handle for a user
    pub fn lookup(&self, user_id: i64) -> Option<H> {
        self.entries.get(&user_id).map(|entry| entry.clone())
    }

    /// Check whether a given user is online
    pub fn is_online(&self, user_id: i64) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Filter a set of users down to the online ones
    pub fn filter_online(&self, user_ids: &[i64]) -> HashSet<i64> {
        user_ids
            .iter()
            .copied()
            .filter(|id| self.is_online(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_online_then_lookup() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        assert_eq!(registry.lookup(1), Some("conn-a"));
        assert!(registry.is_online(1));
        assert!(!registry.is_online(2));
    }

    #[test]
    fn set_offline_removes_entry() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        assert!(registry.set_offline(1));
        assert_eq!(registry.lookup(1), None);
    }

    #[test]
    fn set_offline_is_idempotent() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        assert!(registry.set_offline(1));
        assert!(!registry.set_offline(1));
        assert_eq!(registry.lookup(1), None);
    }

    #[test]
    fn second_connection_overwrites_handle() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        registry.set_online(1, "conn-b");
        assert_eq!(registry.lookup(1), Some("conn-b"));
    }

    #[test]
    fn stale_disconnect_keeps_newer_connection_online() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        registry.set_online(1, "conn-b");

        // The overwritten connection tears down late.
        assert!(!registry.set_offline_if(1, |handle| *handle == "conn-a"));
        assert_eq!(registry.lookup(1), Some("conn-b"));

        assert!(registry.set_offline_if(1, |handle| *handle == "conn-b"));
        assert_eq!(registry.lookup(1), None);
    }

    #[test]
    fn filter_online_returns_online_subset() {
        let registry: PresenceRegistry<&str> = PresenceRegistry::new();
        registry.set_online(1, "conn-a");
        registry.set_online(3, "conn-b");

        let online = registry.filter_online(&[1, 2, 3, 4]);
        assert!(online.contains(&1));
        assert!(online.contains(&3));
        assert_eq!(online.len(), 2);
    }
}
