//! Persisted user preferences.

mod storage;

pub use storage::SettingsStorage;
