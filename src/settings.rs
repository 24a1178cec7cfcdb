//! Sensitivity settings: the user-facing config and the store that owns it.

pub mod config;
pub mod store;

pub use config::{DerivedMultipliers, SensitivityConfig};
pub use store::{SettingsSnapshot, SettingsStore};
