//! Platform-level input primitives: key codes, key edges, bindings, and the
//! events the host input layer delivers to the core.

use crate::error::{AimlinkError, Result};
use crate::settings::SensitivityConfig;
use crate::transform::AimState;
use std::fmt;

/// Platform key code (HID keyboard usage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(transparent))]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const P: KeyCode = KeyCode(0x13);
    pub const ESCAPE: KeyCode = KeyCode(0x29);
    pub const TAB: KeyCode = KeyCode(0x2B);
    pub const LEFT_CONTROL: KeyCode = KeyCode(0xE0);
    pub const LEFT_ALT: KeyCode = KeyCode(0xE2);
    pub const RIGHT_ALT: KeyCode = KeyCode(0xE6);
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Which edge of a key transition was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// A single key-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub edge: KeyEdge,
}

impl KeyEvent {
    pub fn new(code: KeyCode, edge: KeyEdge) -> Self {
        Self { code, edge }
    }

    pub fn down(code: KeyCode) -> Self {
        Self::new(code, KeyEdge::Down)
    }

    pub fn up(code: KeyCode) -> Self {
        Self::new(code, KeyEdge::Up)
    }
}

/// Role a bound key plays in the pointer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKey {
    Trigger,
    PopupToggle,
}

/// Keys bound for a session. Fixed once the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct KeyBinding {
    #[cfg_attr(feature = "config", serde(rename = "trigger"))]
    trigger_key: KeyCode,
    #[cfg_attr(feature = "config", serde(rename = "popup"))]
    popup_toggle_key: KeyCode,
}

impl KeyBinding {
    /// Bind the two keys. The same key cannot serve both roles.
    pub fn new(trigger_key: KeyCode, popup_toggle_key: KeyCode) -> Result<Self> {
        let binding = Self {
            trigger_key,
            popup_toggle_key,
        };
        binding.validate()?;
        Ok(binding)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trigger_key == self.popup_toggle_key {
            return Err(AimlinkError::invalid_config(
                "popup",
                self.popup_toggle_key,
                "popup key must differ from trigger key",
            ));
        }
        Ok(())
    }

    pub fn trigger_key(&self) -> KeyCode {
        self.trigger_key
    }

    pub fn popup_toggle_key(&self) -> KeyCode {
        self.popup_toggle_key
    }

    /// Resolve a key code to its bound role, if any.
    pub fn lookup(&self, code: KeyCode) -> Option<BoundKey> {
        if code == self.trigger_key {
            Some(BoundKey::Trigger)
        } else if code == self.popup_toggle_key {
            Some(BoundKey::PopupToggle)
        } else {
            None
        }
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        Self {
            trigger_key: KeyCode::LEFT_ALT,
            popup_toggle_key: KeyCode::P,
        }
    }
}

/// Everything the platform layer can hand to a session, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    Motion { dx: f64, dy: f64, aim: AimState },
    Key(KeyEvent),
    /// Key changes the platform reported together in one callback
    KeyBatch(Vec<KeyEvent>),
    Focus(bool),
    /// A settings update pushed by the persistence/settings layer
    Config(SensitivityConfig),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_bound_keys_only() {
        let binding = KeyBinding::default();
        assert_eq!(binding.lookup(KeyCode::LEFT_ALT), Some(BoundKey::Trigger));
        assert_eq!(binding.lookup(KeyCode::P), Some(BoundKey::PopupToggle));
        assert_eq!(binding.lookup(KeyCode::TAB), None);
    }

    #[test]
    fn binding_rejects_shared_key() {
        let err = KeyBinding::new(KeyCode::TAB, KeyCode::TAB).unwrap_err();
        assert!(err.is_invalid_config());
        assert!(KeyBinding::new(KeyCode::RIGHT_ALT, KeyCode::ESCAPE).is_ok());
    }

    #[test]
    fn key_code_display_is_hex() {
        assert_eq!(KeyCode::LEFT_ALT.to_string(), "0xE2");
        assert_eq!(KeyCode::P.to_string(), "0x13");
    }
}
