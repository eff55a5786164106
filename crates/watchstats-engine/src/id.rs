//! Identifier generation for records that arrive without a `titleUrl`.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Supplies fallback ids. Uniqueness only has to hold within one run.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random `video-<uuid>` ids; the default outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        format!("video-{}", Uuid::new_v4().simple())
    }
}

/// Deterministic `video-1`, `video-2`, ... ids.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("video-{n}")
    }
}
