// src/storage/memory.rs
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use crate::models::server::ServerRecord;
use crate::config::Config;
use crate::storage::{ServerStore, StoreError};

#[derive(Debug, Clone)]
struct StoredServer {
    record: ServerRecord,
    last_updated: u64,
}

pub struct ServerStorage {
    servers: DashMap<String, StoredServer>,
    // Slots claimed by inserted addresses, released when an entry is swept.
    occupied: AtomicUsize,
    max_servers: usize,
    server_timeout_secs: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl ServerStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            servers: DashMap::new(),
            occupied: AtomicUsize::new(0),
            max_servers: config.max_servers,
            server_timeout_secs: config.server_timeout_secs,
        }
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    fn is_fresh(&self, server: &StoredServer, now: u64) -> bool {
        now.saturating_sub(server.last_updated) < self.server_timeout_secs
    }

    fn retain_fresh(&self, now: u64) {
        self.servers.retain(|address, server| {
            let fresh = self.is_fresh(server, now);
            if !fresh {
                debug!("Dropping stale server {}", address);
                self.occupied.fetch_sub(1, Ordering::AcqRel);
            }
            fresh
        });
    }

    fn claim_slot(&self) -> Result<(), StoreError> {
        self.occupied
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_servers).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|_| StoreError::CapacityReached(self.max_servers))
    }
}

impl ServerStore for ServerStorage {
    fn get(&self, address: &str) -> Result<ServerRecord, StoreError> {
        let now = now_secs();
        self.servers
            .get(address)
            .filter(|r| self.is_fresh(r.value(), now))
            .map(|r| r.value().record.clone())
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    fn upsert(&self, record: ServerRecord) -> Result<(), StoreError> {
        let now = now_secs();

        // Expired entries give their slot back before a new address is refused.
        if self.occupied.load(Ordering::Acquire) >= self.max_servers
            && !self.servers.contains_key(&record.address)
        {
            self.retain_fresh(now);
        }

        let server = StoredServer {
            record,
            last_updated: now,
        };

        // Replacing an existing entry never counts against the limit.
        match self.servers.entry(server.record.address.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(server);
            }
            Entry::Vacant(entry) => {
                self.claim_slot()?;
                entry.insert(server);
            }
        }
        Ok(())
    }

    fn cleanup_stale_servers(&self) {
        self.retain_fresh(now_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(address: &str, hostname: &str) -> ServerRecord {
        ServerRecord {
            address: address.to_string(),
            hostname: hostname.to_string(),
            player_count: 0,
            max_players: 50,
            game_mode: "dm".to_string(),
            language: String::new(),
            password_protected: false,
            rules: HashMap::new(),
            player_list: Vec::new(),
        }
    }

    fn storage(max_servers: usize, server_timeout_secs: u64) -> ServerStorage {
        ServerStorage::new(&Config {
            max_servers,
            server_timeout_secs,
            ..Config::default()
        })
    }

    #[test]
    fn get_unknown_address_is_not_found() {
        let storage = storage(10, 300);
        assert_eq!(
            storage.get("play.example.com:7777"),
            Err(StoreError::NotFound("play.example.com:7777".to_string()))
        );
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let storage = storage(10, 300);
        storage.upsert(record("play.example.com:7777", "first")).unwrap();
        storage.upsert(record("play.example.com:7777", "second")).unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("play.example.com:7777").unwrap().hostname, "second");
    }

    #[test]
    fn capacity_applies_to_new_addresses_only() {
        let storage = storage(1, 300);
        storage.upsert(record("a.example.com:7777", "a")).unwrap();

        assert_eq!(
            storage.upsert(record("b.example.com:7777", "b")),
            Err(StoreError::CapacityReached(1))
        );
        assert!(storage.upsert(record("a.example.com:7777", "a again")).is_ok());
    }

    #[test]
    fn stale_servers_are_swept() {
        let storage = storage(10, 30);
        storage.upsert(record("old.example.com:7777", "old")).unwrap();
        storage.upsert(record("new.example.com:7777", "new")).unwrap();

        if let Some(mut entry) = storage.servers.get_mut("old.example.com:7777") {
            entry.last_updated = entry.last_updated.saturating_sub(60);
        }
        storage.cleanup_stale_servers();

        assert!(storage.get("old.example.com:7777").is_err());
        assert!(storage.get("new.example.com:7777").is_ok());
    }

    #[test]
    fn expired_entry_is_not_found_before_sweep() {
        let storage = storage(10, 30);
        storage.upsert(record("play.example.com:7777", "old")).unwrap();

        if let Some(mut entry) = storage.servers.get_mut("play.example.com:7777") {
            entry.last_updated = entry.last_updated.saturating_sub(60);
        }

        assert_eq!(
            storage.get("play.example.com:7777"),
            Err(StoreError::NotFound("play.example.com:7777".to_string()))
        );
    }

    #[test]
    fn expired_entries_release_capacity() {
        let storage = storage(1, 30);
        storage.upsert(record("a.example.com:7777", "a")).unwrap();

        if let Some(mut entry) = storage.servers.get_mut("a.example.com:7777") {
            entry.last_updated = entry.last_updated.saturating_sub(3600);
        }

        assert!(storage.upsert(record("b.example.com:7777", "b")).is_ok());
        assert_eq!(storage.len(), 1);
        assert!(storage.get("a.example.com:7777").is_err());
        assert_eq!(
            storage.upsert(record("c.example.com:7777", "c")),
            Err(StoreError::CapacityReached(1))
        );
    }

    #[test]
    fn concurrent_new_addresses_respect_capacity() {
        let storage = std::sync::Arc::new(storage(8, 300));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    storage.upsert(record(&format!("s{}.example.com:7777", i), "s")).is_ok()
                })
            })
            .collect();
        let stored = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|stored| *stored)
            .count();

        assert_eq!(stored, 8);
        assert_eq!(storage.len(), 8);
    }

    #[test]
    fn zero_timeout_expires_everything() {
        let storage = storage(10, 0);
        storage.upsert(record("play.example.com:7777", "gone")).unwrap();
        storage.cleanup_stale_servers();
        assert!(storage.is_empty());
    }
}
