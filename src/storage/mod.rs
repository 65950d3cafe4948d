pub mod memory;

use thiserror::Error;

use crate::models::server::ServerRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("server '{0}' not found")]
    NotFound(String),

    #[error("maximum number of servers ({0}) reached")]
    CapacityReached(usize),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence for server records, keyed by address.
pub trait ServerStore: Send + Sync {
    /// Expired entries are reported as `NotFound` even before they are swept.
    fn get(&self, address: &str) -> Result<ServerRecord, StoreError>;

    /// Creates the record or replaces the one stored under the same address.
    fn upsert(&self, record: ServerRecord) -> Result<(), StoreError>;

    /// Drops entries that have not been refreshed recently. Stores without
    /// expiry leave this as a no-op.
    fn cleanup_stale_servers(&self) {}
}
