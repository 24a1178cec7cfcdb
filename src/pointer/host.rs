//! Platform pointer-visibility API seam.
//!
//! The core decides *when* the pointer is captured or the popup shown;
//! a [`PointerHost`] decides *how*.

use crate::error::Result;
use crate::pointer::state::PointerAction;
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;

/// Host-side pointer capture and popup presentation.
pub trait PointerHost: Send {
    /// Capture and hide (`true`) or release and show (`false`) the system pointer
    fn set_pointer_captured(&mut self, captured: bool) -> Result<()>;

    /// Present or dismiss the settings popup
    fn set_popup_visible(&mut self, visible: bool) -> Result<()>;
}

/// Forward a state-machine action to the host.
///
/// Host failures are logged and absorbed: the core keeps the state it decided
/// on and carries on with the next event.
pub fn apply_action(host: &mut dyn PointerHost, action: PointerAction) {
    match action {
        PointerAction::Locked => report(action, host.set_pointer_captured(true)),
        PointerAction::Released => report(action, host.set_pointer_captured(false)),
        PointerAction::PopupShown { released } => {
            // Each call stands alone: a failed release must not keep the popup hidden.
            if released {
                report(action, host.set_pointer_captured(false));
            }
            report(action, host.set_popup_visible(true));
        }
        PointerAction::PopupHidden => report(action, host.set_popup_visible(false)),
        PointerAction::NoAction => {}
    }
}

fn report(action: PointerAction, result: Result<()>) {
    if let Err(err) = result {
        warn!("Pointer host failed to apply {:?}: {}", action, err);
    }
}

/// Host that does nothing; for headless replay.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPointerHost;

impl PointerHost for NullPointerHost {
    fn set_pointer_captured(&mut self, _captured: bool) -> Result<()> {
        Ok(())
    }

    fn set_popup_visible(&mut self, _visible: bool) -> Result<()> {
        Ok(())
    }
}

/// Calls observed by a [`RecordingPointerHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Captured(bool),
    PopupVisible(bool),
}

/// Host that records every call into a shared log. Handy for tests and tracing.
#[derive(Debug, Default, Clone)]
pub struct RecordingPointerHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingPointerHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the calls seen so far, shared across clones.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }
}

impl PointerHost for RecordingPointerHost {
    fn set_pointer_captured(&mut self, captured: bool) -> Result<()> {
        self.calls.lock().push(HostCall::Captured(captured));
        Ok(())
    }

    fn set_popup_visible(&mut self, visible: bool) -> Result<()> {
        self.calls.lock().push(HostCall::PopupVisible(visible));
        Ok(())
    }
}
