//! Pointer lock / popup state machine.
//!
//! Two independent axes, [`PointerMode`] and [`PopupVisibility`], driven by two
//! bound keys. Both keys toggle rather than set, and only a clean press counts:
//! a `Down` toggles when the key was not already held, `Up` re-arms it.
//! Showing the popup forces the pointer free; hiding it leaves the mode alone.

use crate::input::raw::{BoundKey, KeyEdge};
use log::debug;

/// Whether pointer motion is captured and fed into the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    /// Pointer visible, motion goes to the OS / popup
    Free,
    /// Pointer captured and hidden, motion drives the virtual stick
    Locked,
}

/// Whether the settings overlay is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupVisibility {
    Hidden,
    Shown,
}

/// Combined state of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub mode: PointerMode,
    pub popup: PopupVisibility,
}

impl PointerState {
    pub fn is_locked(&self) -> bool {
        self.mode == PointerMode::Locked
    }
}

/// Sessions start with the pointer free and the popup hidden.
pub const INITIAL_POINTER_STATE: PointerState = PointerState {
    mode: PointerMode::Free,
    popup: PopupVisibility::Hidden,
};

/// Externally visible effect of a state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Free -> Locked: hide and capture the pointer
    Locked,
    /// Locked -> Free: show and release the pointer
    Released,
    /// Popup became visible; `released` is set when this also ended a lock
    PopupShown { released: bool },
    PopupHidden,
    NoAction,
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    trigger: bool,
    popup: bool,
}

impl HeldKeys {
    fn slot(&mut self, key: BoundKey) -> &mut bool {
        match key {
            BoundKey::Trigger => &mut self.trigger,
            BoundKey::PopupToggle => &mut self.popup,
        }
    }
}

/// Owner of [`PointerMode`] and [`PopupVisibility`].
#[derive(Debug, Clone)]
pub struct PointerStateMachine {
    state: PointerState,
    held: HeldKeys,
}

impl PointerStateMachine {
    pub fn new() -> Self {
        Self {
            state: INITIAL_POINTER_STATE,
            held: HeldKeys::default(),
        }
    }

    /// Feed one bound-key edge.
    pub fn handle_key(&mut self, key: BoundKey, edge: KeyEdge) -> PointerAction {
        let held = self.held.slot(key);
        match edge {
            KeyEdge::Up => {
                *held = false;
                PointerAction::NoAction
            }
            // auto-repeat or a lost Up; absorbed
            KeyEdge::Down if *held => PointerAction::NoAction,
            KeyEdge::Down => {
                *held = true;
                match key {
                    BoundKey::Trigger => self.toggle_lock(),
                    BoundKey::PopupToggle => self.toggle_popup(),
                }
            }
        }
    }

    /// Feed edges reported together. Trigger-key edges are applied first, then
    /// popup-key edges, each group in arrival order.
    pub fn handle_batch<I>(&mut self, edges: I) -> Vec<PointerAction>
    where
        I: IntoIterator<Item = (BoundKey, KeyEdge)>,
    {
        let mut edges: Vec<(BoundKey, KeyEdge)> = edges.into_iter().collect();
        // stable: preserves arrival order within each key
        edges.sort_by_key(|(key, _)| match key {
            BoundKey::Trigger => 0,
            BoundKey::PopupToggle => 1,
        });

        edges
            .into_iter()
            .map(|(key, edge)| self.handle_key(key, edge))
            .filter(|action| *action != PointerAction::NoAction)
            .collect()
    }

    /// Force the pointer free without touching the popup.
    pub fn release(&mut self) -> PointerAction {
        match self.state.mode {
            PointerMode::Locked => {
                self.state.mode = PointerMode::Free;
                debug!("Pointer released");
                PointerAction::Released
            }
            PointerMode::Free => PointerAction::NoAction,
        }
    }

    /// Forget held keys, e.g. when the host window loses focus and the matching
    /// `Up` events will never arrive.
    pub fn clear_held_keys(&mut self) {
        self.held = HeldKeys::default();
    }

    pub fn snapshot(&self) -> PointerState {
        self.state
    }

    pub fn mode(&self) -> PointerMode {
        self.state.mode
    }

    pub fn popup(&self) -> PopupVisibility {
        self.state.popup
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    fn toggle_lock(&mut self) -> PointerAction {
        match self.state.mode {
            PointerMode::Free => {
                self.state.mode = PointerMode::Locked;
                debug!("Pointer locked");
                PointerAction::Locked
            }
            PointerMode::Locked => self.release(),
        }
    }

    fn toggle_popup(&mut self) -> PointerAction {
        match self.state.popup {
            PopupVisibility::Hidden => {
                let released = self.release() == PointerAction::Released;
                self.state.popup = PopupVisibility::Shown;
                debug!("Popup shown (released lock: {})", released);
                PointerAction::PopupShown { released }
            }
            PopupVisibility::Shown => {
                self.state.popup = PopupVisibility::Hidden;
                debug!("Popup hidden");
                PointerAction::PopupHidden
            }
        }
    }
}

impl Default for PointerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
