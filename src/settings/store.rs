//! Settings store with copy-on-write snapshots.
//!
//! Every accepted [`SensitivityConfig`] produces a fresh immutable
//! [`SettingsSnapshot`] carrying the config, its derived multipliers, and a
//! version number. Publishing swaps a single `Arc` through [`ArcSwap`]; readers
//! load that `Arc` without taking a lock and can never observe a config paired
//! with another config's multipliers.

use crate::error::Result;
use crate::settings::config::{DerivedMultipliers, SensitivityConfig};
use arc_swap::ArcSwap;
use log::{debug, warn};
use std::sync::Arc;

/// Immutable pairing of a config with the multipliers derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot {
    pub config: SensitivityConfig,
    pub multipliers: DerivedMultipliers,
    /// Incremented by one for each accepted update; the initial snapshot is 0
    pub version: u64,
}

impl SettingsSnapshot {
    fn build(config: SensitivityConfig, version: u64) -> Self {
        Self {
            config,
            multipliers: config.derive_multipliers(),
            version,
        }
    }
}

/// Sole owner of the current sensitivity configuration.
///
/// Shared as `Arc<SettingsStore>`: the settings UI writes through
/// [`set_config`](Self::set_config) while the input thread reads through
/// [`multipliers`](Self::multipliers). Reads never wait on a writer.
#[derive(Debug)]
pub struct SettingsStore {
    current: ArcSwap<SettingsSnapshot>,
}

impl SettingsStore {
    /// Create a store seeded with an initial config.
    pub fn new(initial: SensitivityConfig) -> Result<Self> {
        initial.validate()?;
        Ok(Self {
            current: ArcSwap::from_pointee(SettingsSnapshot::build(initial, 0)),
        })
    }

    /// Validate and publish a new config, returning the version it was published as.
    ///
    /// Multipliers are recomputed before this returns. On `InvalidConfig` the
    /// previous snapshot stays in place untouched.
    pub fn set_config(&self, config: SensitivityConfig) -> Result<u64> {
        if let Err(err) = config.validate() {
            warn!("Rejected sensitivity update: {}", err);
            return Err(err);
        }

        let multipliers = config.derive_multipliers();
        // Retried if another writer swaps first, so versions never repeat.
        let previous = self.current.rcu(|current| {
            Arc::new(SettingsSnapshot {
                config,
                multipliers,
                version: current.version + 1,
            })
        });
        let version = previous.version + 1;

        debug!(
            "Settings v{} published: hip=({:.4}, {:.4}) ads=({:.4}, {:.4})",
            version, multipliers.hip_x, multipliers.hip_y, multipliers.ads_x, multipliers.ads_y
        );
        Ok(version)
    }

    /// Latest derived multipliers.
    pub fn multipliers(&self) -> DerivedMultipliers {
        self.current.load().multipliers
    }

    /// Latest accepted config.
    pub fn config(&self) -> SensitivityConfig {
        self.current.load().config
    }

    /// The whole current snapshot; stays valid after later updates.
    pub fn snapshot(&self) -> Arc<SettingsSnapshot> {
        self.current.load_full()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(SettingsSnapshot::build(
                SensitivityConfig::default(),
                0,
            )),
        }
    }
}
