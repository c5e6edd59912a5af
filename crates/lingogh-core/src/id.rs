//! Id generation trait.

/// Produces unique tokens for transcript messages and plan tasks.
///
/// Injected rather than ambient so ids are deterministic under test.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}
