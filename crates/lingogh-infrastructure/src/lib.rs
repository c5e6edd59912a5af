//! Storage, secrets, ids, clock, and configuration backends for Lingogh.

pub mod clock;
pub mod config;
pub mod id_provider;
pub mod json_store;
pub mod paths;
pub mod secret_service;

pub use clock::{FixedClock, SystemClock};
pub use config::AppConfig;
pub use id_provider::{SequentialIdProvider, UuidIdProvider};
pub use json_store::{InMemoryStore, JsonFileStore};
pub use paths::LingoghPaths;
pub use secret_service::EnvSecretService;
