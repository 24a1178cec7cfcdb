//! Sensitivity transform: raw pointer deltas to virtual-stick deltas.
//!
//! The mapping is a per-axis linear scale selected by aim state. It holds no
//! state of its own beyond a read-only handle on the settings store, so equal
//! inputs under an unchanged config always give equal outputs.

use crate::settings::{DerivedMultipliers, SettingsStore};
use std::sync::Arc;

/// Whether the player is aiming down sights. Supplied by the host per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimState {
    #[default]
    HipFire,
    Scoped,
}

/// Apply `multipliers` to a raw delta for the given aim state.
///
/// A zero delta always maps to exactly `(0.0, 0.0)`.
pub fn scale_delta(
    multipliers: &DerivedMultipliers,
    raw_dx: f64,
    raw_dy: f64,
    aim: AimState,
) -> (f64, f64) {
    if raw_dx == 0.0 && raw_dy == 0.0 {
        return (0.0, 0.0);
    }

    let (mx, my) = match aim {
        AimState::HipFire => (multipliers.hip_x, multipliers.hip_y),
        AimState::Scoped => (multipliers.ads_x, multipliers.ads_y),
    };
    (raw_dx * mx, raw_dy * my)
}

/// Transform bound to a shared settings store.
#[derive(Debug, Clone)]
pub struct SensitivityTransform {
    settings: Arc<SettingsStore>,
}

impl SensitivityTransform {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self { settings }
    }

    /// Scale a raw delta using the latest published multipliers.
    pub fn transform(&self, raw_dx: f64, raw_dy: f64, aim: AimState) -> (f64, f64) {
        scale_delta(&self.settings.multipliers(), raw_dx, raw_dy, aim)
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }
}
