//! Id provider implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use lingogh_core::id::IdProvider;
use uuid::Uuid;

/// Random UUID v4 tokens, the production provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic ids (`id-1`, `id-2`, ...) for deterministic tests.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("id-{n}")
    }
}
