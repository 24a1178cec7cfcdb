//! Input dispatch.
//!
//! Single entry point for platform events. Key edges for bound keys go to the
//! pointer state machine and the resulting actions to the pointer host; motion
//! is scaled and forwarded to the virtual-stick sink only while locked.

use crate::input::raw::{KeyBinding, KeyCode, KeyEdge, KeyEvent};
use crate::pointer::{apply_action, PointerAction, PointerHost, PointerState, PointerStateMachine};
use crate::sink::VirtualStickSink;
use crate::transform::{AimState, SensitivityTransform};
use log::{debug, trace, warn};

/// Routes platform events through the pointer state machine and the transform.
pub struct InputDispatch {
    bindings: KeyBinding,
    pointer: PointerStateMachine,
    transform: SensitivityTransform,
    sink: Box<dyn VirtualStickSink>,
    host: Box<dyn PointerHost>,
}

impl InputDispatch {
    pub fn new(
        bindings: KeyBinding,
        transform: SensitivityTransform,
        sink: Box<dyn VirtualStickSink>,
        host: Box<dyn PointerHost>,
    ) -> Self {
        Self {
            bindings,
            pointer: PointerStateMachine::new(),
            transform,
            sink,
            host,
        }
    }

    /// Handle raw pointer motion.
    ///
    /// Returns `None` and leaves the sink untouched while the pointer is free.
    /// While locked, returns the scaled delta after forwarding it to the sink.
    pub fn on_pointer_motion(
        &mut self,
        raw_dx: f64,
        raw_dy: f64,
        aim: AimState,
    ) -> Option<(f64, f64)> {
        if !self.pointer.is_locked() {
            return None;
        }

        let (dx, dy) = self.transform.transform(raw_dx, raw_dy, aim);
        trace!(
            "motion ({}, {}) {:?} -> ({:.4}, {:.4})",
            raw_dx,
            raw_dy,
            aim,
            dx,
            dy
        );
        if let Err(err) = self.sink.push_delta(dx, dy) {
            warn!("Virtual stick sink rejected delta: {}", err);
        }
        Some((dx, dy))
    }

    /// Handle one key edge. Unbound keys pass through untouched.
    pub fn on_key_event(&mut self, code: KeyCode, edge: KeyEdge) -> PointerAction {
        let Some(key) = self.bindings.lookup(code) else {
            return PointerAction::NoAction;
        };

        let action = self.pointer.handle_key(key, edge);
        apply_action(self.host.as_mut(), action);
        action
    }

    /// Handle key edges reported in a single platform callback.
    ///
    /// Trigger-key edges take effect before popup-key edges.
    pub fn on_key_batch(&mut self, events: &[KeyEvent]) -> Vec<PointerAction> {
        let bindings = self.bindings;
        let edges = events
            .iter()
            .filter_map(|event| bindings.lookup(event.code).map(|key| (key, event.edge)));

        let actions = self.pointer.handle_batch(edges);
        for action in &actions {
            apply_action(self.host.as_mut(), *action);
        }
        actions
    }

    /// Handle the host window gaining or losing focus.
    ///
    /// Losing focus releases a lock and forgets held keys; regaining focus
    /// never re-locks on its own.
    pub fn on_focus_changed(&mut self, focused: bool) -> PointerAction {
        if focused {
            return PointerAction::NoAction;
        }

        self.pointer.clear_held_keys();
        let action = self.pointer.release();
        if action != PointerAction::NoAction {
            debug!("Focus lost, pointer lock dropped");
        }
        apply_action(self.host.as_mut(), action);
        action
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer.snapshot()
    }

    pub fn bindings(&self) -> &KeyBinding {
        &self.bindings
    }

    pub fn transform(&self) -> &SensitivityTransform {
        &self.transform
    }
}
