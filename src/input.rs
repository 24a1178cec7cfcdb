//! Input subsystem: platform event primitives and the dispatch that routes them.

pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use raw::{BoundKey, KeyBinding, KeyCode, KeyEdge, KeyEvent, PlatformEvent};
pub use service::InputDispatch;
