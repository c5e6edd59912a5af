//! Key-value store trait.
//!
//! Reimplements the browser-local persistence the daily plan depends on as
//! an injected abstraction, so the lookup/persist contract is testable
//! without any particular backend.

use async_trait::async_trait;

use crate::error::Result;

/// A string-keyed, string-valued durable store.
///
/// The daily plan manager is the only writer; keys embed the language and
/// calendar day, so distinct plans can never collide on one key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Looks a key up.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: key present
    /// - `Ok(None)`: key absent
    /// - `Err(_)`: the store itself failed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, overwriting any previous one under the same key.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
