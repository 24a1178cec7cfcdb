//! Sensitivity configuration and its derived per-axis multipliers.
//!
//! Values are fractions and multipliers, not angles. The reference tuning mirrors
//! a PC setup of 6.4% axis sensitivity with 45% look/scope sensitivity, which
//! together with the 34.72 platform scale lands on an effective multiplier of ~1.0.

use crate::error::{AimlinkError, Result};

/// Reference X/Y axis sensitivity (6.4%).
pub const DEFAULT_BASE_AXIS_SENSITIVITY: f32 = 0.064;
/// Reference hip-fire and scope sensitivity (45%).
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.45;
/// Reference platform conversion scale.
pub const DEFAULT_PLATFORM_SCALE: f32 = 34.72;

/// User-facing sensitivity settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SensitivityConfig {
    /// X/Y axis sensitivity, in (0, 1]
    #[cfg_attr(feature = "config", serde(rename = "baseXYSensitivity"))]
    pub base_axis_sensitivity: f32,
    /// Hip-fire look sensitivity, X axis
    #[cfg_attr(feature = "config", serde(rename = "lookSensitivityX"))]
    pub look_sensitivity_x: f32,
    /// Hip-fire look sensitivity, Y axis
    #[cfg_attr(feature = "config", serde(rename = "lookSensitivityY"))]
    pub look_sensitivity_y: f32,
    /// ADS sensitivity, X axis
    #[cfg_attr(feature = "config", serde(rename = "scopeSensitivityX"))]
    pub scope_sensitivity_x: f32,
    /// ADS sensitivity, Y axis
    #[cfg_attr(feature = "config", serde(rename = "scopeSensitivityY"))]
    pub scope_sensitivity_y: f32,
    /// Conversion from host pointer units to the game's stick units
    #[cfg_attr(feature = "config", serde(rename = "macOSToPCScale"))]
    pub platform_scale: f32,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            base_axis_sensitivity: DEFAULT_BASE_AXIS_SENSITIVITY,
            look_sensitivity_x: DEFAULT_LOOK_SENSITIVITY,
            look_sensitivity_y: DEFAULT_LOOK_SENSITIVITY,
            scope_sensitivity_x: DEFAULT_LOOK_SENSITIVITY,
            scope_sensitivity_y: DEFAULT_LOOK_SENSITIVITY,
            platform_scale: DEFAULT_PLATFORM_SCALE,
        }
    }
}

impl SensitivityConfig {
    /// Check every field is finite and strictly positive, and that the base
    /// axis sensitivity does not exceed 1.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(AimlinkError::invalid_config(field, value, "must be finite"));
            }
            if value <= 0.0 {
                return Err(AimlinkError::invalid_config(field, value, "must be > 0"));
            }
        }

        if self.base_axis_sensitivity > 1.0 {
            return Err(AimlinkError::invalid_config(
                "baseXYSensitivity",
                self.base_axis_sensitivity,
                "must be <= 1",
            ));
        }

        Ok(())
    }

    /// Compute the per-axis multipliers for both aim states.
    ///
    /// Products are taken in `f64` so the same config always yields bit-identical
    /// multipliers.
    pub fn derive_multipliers(&self) -> DerivedMultipliers {
        let base = f64::from(self.base_axis_sensitivity);
        let scale = f64::from(self.platform_scale);
        let axis = |sensitivity: f32| base * f64::from(sensitivity) * scale;
        DerivedMultipliers {
            hip_x: axis(self.look_sensitivity_x),
            hip_y: axis(self.look_sensitivity_y),
            ads_x: axis(self.scope_sensitivity_x),
            ads_y: axis(self.scope_sensitivity_y),
        }
    }

    fn fields(&self) -> [(&'static str, f32); 6] {
        [
            ("baseXYSensitivity", self.base_axis_sensitivity),
            ("lookSensitivityX", self.look_sensitivity_x),
            ("lookSensitivityY", self.look_sensitivity_y),
            ("scopeSensitivityX", self.scope_sensitivity_x),
            ("scopeSensitivityY", self.scope_sensitivity_y),
            ("macOSToPCScale", self.platform_scale),
        ]
    }
}

/// Precomputed multipliers applied by the sensitivity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMultipliers {
    pub hip_x: f64,
    pub hip_y: f64,
    pub ads_x: f64,
    pub ads_y: f64,
}

impl DerivedMultipliers {
    /// Raw bit patterns, for exact comparisons across snapshots.
    pub fn to_bits(&self) -> [u64; 4] {
        [
            self.hip_x.to_bits(),
            self.hip_y.to_bits(),
            self.ads_x.to_bits(),
            self.ads_y.to_bits(),
        ]
    }
}
