//! Pointer lock and popup visibility.

pub mod host;
pub mod state;

pub use host::{apply_action, HostCall, NullPointerHost, PointerHost, RecordingPointerHost};
pub use state::{
    PointerAction, PointerMode, PointerState, PointerStateMachine, PopupVisibility,
    INITIAL_POINTER_STATE,
};
