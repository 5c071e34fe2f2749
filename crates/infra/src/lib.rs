//! Infrastructure layer: local persistence and configuration.

pub mod config;
pub mod kv;

pub use config::{ConfigError, LogFormat, PeriodPolicy, PortalConfig};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
