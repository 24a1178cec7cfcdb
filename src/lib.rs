//! # aimlink - Pointer-to-Virtual-Stick Remapping Core
//!
//! Converts raw pointer (trackpad/mouse) motion into the virtual joystick deltas a
//! game expects, with separate hip-fire and aim-down-sights sensitivity, and a
//! two-key toggle for locking the pointer and showing a settings popup.
//!
//! ## Features
//!
//! - **Snapshot Settings**: Sensitivity updates publish an immutable snapshot, so
//!   the input thread never reads a half-applied config
//! - **Linear Transform**: Deterministic per-axis scaling selected by aim state
//! - **Pointer State Machine**: Edge-triggered lock and popup toggles with a fixed
//!   ordering for keys reported together
//! - **Pluggable Host**: Pointer capture and stick injection sit behind traits
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`settings`] - Sensitivity config and the store that owns it
//! - [`transform`] - Raw delta to stick delta scaling
//! - [`pointer`] - Pointer lock / popup state machine and host seam
//! - [`input`] - Platform event model and dispatch
//! - [`sink`] - Virtual-stick output seam
//! - [`app`] - Session wiring and the threaded runtime

// Core modules
pub mod error;
pub mod settings;
pub mod transform;

// Event path
pub mod input;
pub mod pointer;
pub mod sink;

// Session wiring
pub mod app;
pub mod app_config;

// Re-export commonly used types for convenience
pub use error::{AimlinkError, Result};

// Public API surface for external usage
pub use app::{EventOutcome, Session};
pub use app_config::AppConfig;
pub use input::{InputDispatch, KeyBinding, KeyCode, KeyEdge, KeyEvent, PlatformEvent};
pub use pointer::{PointerHost, PointerMode, PointerState, PopupVisibility};
pub use settings::{DerivedMultipliers, SensitivityConfig, SettingsStore};
pub use sink::VirtualStickSink;
pub use transform::{AimState, SensitivityTransform};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
