//! Size-limited key/value persistence for aggregated watch statistics.
//!
//! The engine never touches storage. Callers hand a finished
//! [`StatsBundle`](watchstats_core::StatsBundle) to [`save_bundle`] with any
//! [`KeyValueStore`]; a bundle that does not fit surfaces as
//! [`StoreError::CapacityExceeded`].

pub mod bundle;
pub mod error;
pub mod file;
pub mod memory;
mod quota;

pub use bundle::{clear_bundle, load_bundle, save_bundle, BUNDLE_KEYS};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Default quota: 5 MiB, the usual browser session-storage allowance.
pub const DEFAULT_CAPACITY_BYTES: u64 = 5 * 1024 * 1024;

/// String key/value storage with a byte quota.
///
/// A failed `put` leaves the previous value for that key in place.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] when the entry does not fit,
    /// or another [`StoreError`] when the backend fails.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
