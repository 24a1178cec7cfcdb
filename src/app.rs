//! Session orchestration layer
//!
//! A [`Session`] wires one settings store, one dispatch, a sink, and a pointer
//! host together, and processes [`PlatformEvent`]s strictly in arrival order.
//! Any number of sessions can coexist; nothing here is process-global.

pub mod runtime;
pub mod script;

use crate::app_config::AppConfig;
use crate::error::{AimlinkError, Result};
use crate::input::{InputDispatch, KeyBinding, PlatformEvent};
use crate::pointer::{PointerAction, PointerHost, PointerState};
use crate::settings::SettingsStore;
use crate::sink::VirtualStickSink;
use crate::transform::SensitivityTransform;
use log::info;
use std::sync::Arc;

/// What processing one event did.
#[derive(Debug)]
pub enum EventOutcome {
    /// Motion scaled and sent to the sink
    Forwarded { dx: f64, dy: f64 },
    /// Motion dropped because the pointer is free
    Discarded,
    /// Pointer/popup transitions caused by keys or focus (possibly none)
    Pointer(Vec<PointerAction>),
    /// Settings update accepted; carries the new version
    ConfigApplied(u64),
    /// Settings update rejected; previous settings still active
    ConfigRejected(AimlinkError),
}

/// One remapping session.
pub struct Session {
    settings: Arc<SettingsStore>,
    dispatch: InputDispatch,
}

impl Session {
    /// Build a session from a validated config.
    pub fn new(
        config: AppConfig,
        sink: Box<dyn VirtualStickSink>,
        host: Box<dyn PointerHost>,
    ) -> Result<Self> {
        config.validate()?;
        let settings = Arc::new(SettingsStore::new(config.sensitivity)?);
        info!(
            "Session started: trigger={} popup={}",
            config.keys.trigger_key(),
            config.keys.popup_toggle_key()
        );
        Ok(Self::with_store(settings, config.keys, sink, host))
    }

    /// Build a session around an existing store, e.g. one shared with a settings UI.
    ///
    /// Sensitivity comes from the store; `keys` must already be validated.
    pub fn with_store(
        settings: Arc<SettingsStore>,
        keys: KeyBinding,
        sink: Box<dyn VirtualStickSink>,
        host: Box<dyn PointerHost>,
    ) -> Self {
        let transform = SensitivityTransform::new(Arc::clone(&settings));
        let dispatch = InputDispatch::new(keys, transform, sink, host);
        Self { settings, dispatch }
    }

    /// Process one event.
    pub fn handle(&mut self, event: PlatformEvent) -> EventOutcome {
        match event {
            PlatformEvent::Motion { dx, dy, aim } => {
                match self.dispatch.on_pointer_motion(dx, dy, aim) {
                    Some((dx, dy)) => EventOutcome::Forwarded { dx, dy },
                    None => EventOutcome::Discarded,
                }
            }
            PlatformEvent::Key(key) => {
                let action = self.dispatch.on_key_event(key.code, key.edge);
                EventOutcome::Pointer(Self::effective(vec![action]))
            }
            PlatformEvent::KeyBatch(keys) => {
                EventOutcome::Pointer(self.dispatch.on_key_batch(&keys))
            }
            PlatformEvent::Focus(focused) => {
                let action = self.dispatch.on_focus_changed(focused);
                EventOutcome::Pointer(Self::effective(vec![action]))
            }
            PlatformEvent::Config(config) => match self.settings.set_config(config) {
                Ok(version) => EventOutcome::ConfigApplied(version),
                Err(err) => EventOutcome::ConfigRejected(err),
            },
        }
    }

    /// Shared handle for out-of-band settings updates.
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn pointer_state(&self) -> PointerState {
        self.dispatch.pointer_state()
    }

    pub fn dispatch(&self) -> &InputDispatch {
        &self.dispatch
    }

    fn effective(actions: Vec<PointerAction>) -> Vec<PointerAction> {
        actions
            .into_iter()
            .filter(|action| *action != PointerAction::NoAction)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyEvent};
    use crate::pointer::{NullPointerHost, PointerMode, PopupVisibility};
    use crate::settings::SensitivityConfig;
    use crate::sink::RecordingSink;
    use crate::transform::AimState;
    use std::collections::HashSet;
    use std::thread;

    fn session() -> (Session, RecordingSink) {
        let sink = RecordingSink::new();
        let session = Session::new(
            AppConfig::default(),
            Box::new(sink.clone()),
            Box::new(NullPointerHost),
        )
        .unwrap();
        (session, sink)
    }

    #[test]
    fn rejects_invalid_initial_config() {
        let config = AppConfig {
            sensitivity: SensitivityConfig {
                look_sensitivity_y: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = Session::new(
            config,
            Box::new(RecordingSink::new()),
            Box::new(NullPointerHost),
        );
        assert!(result.is_err());
    }

    #[test]
    fn events_are_processed_in_order() {
        let (mut session, sink) = session();

        let outcomes: Vec<EventOutcome> = [
            PlatformEvent::Motion {
                dx: 1.0,
                dy: 1.0,
                aim: AimState::HipFire,
            },
            PlatformEvent::Key(KeyEvent::down(KeyCode::LEFT_ALT)),
            PlatformEvent::Key(KeyEvent::up(KeyCode::LEFT_ALT)),
            PlatformEvent::Motion {
                dx: 0.0,
                dy: 0.0,
                aim: AimState::Scoped,
            },
        ]
        .into_iter()
        .map(|event| session.handle(event))
        .collect();

        assert!(matches!(outcomes[0], EventOutcome::Discarded));
        assert!(matches!(&outcomes[1], EventOutcome::Pointer(a) if a == &[PointerAction::Locked]));
        assert!(matches!(&outcomes[2], EventOutcome::Pointer(a) if a.is_empty()));
        assert!(matches!(
            outcomes[3],
            EventOutcome::Forwarded { dx, dy } if dx == 0.0 && dy == 0.0
        ));
        assert_eq!(sink.deltas(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn config_events_update_shared_store() {
        let (mut session, _sink) = session();
        let next = SensitivityConfig {
            platform_scale: 10.0,
            ..Default::default()
        };

        assert!(matches!(
            session.handle(PlatformEvent::Config(next)),
            EventOutcome::ConfigApplied(1)
        ));

        let bad = SensitivityConfig {
            base_axis_sensitivity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            session.handle(PlatformEvent::Config(bad)),
            EventOutcome::ConfigRejected(_)
        ));
        assert_eq!(session.settings().config(), next);
    }

    #[test]
    fn popup_key_from_initial_state_keeps_pointer_free() {
        let (mut session, _sink) = session();
        session.handle(PlatformEvent::Key(KeyEvent::down(KeyCode::P)));

        let state = session.pointer_state();
        assert_eq!(state.mode, PointerMode::Free);
        assert_eq!(state.popup, PopupVisibility::Shown);
    }

    #[test]
    fn with_store_takes_sensitivity_from_the_store() {
        let tuned = SensitivityConfig {
            base_axis_sensitivity: 0.5,
            look_sensitivity_x: 1.0,
            look_sensitivity_y: 1.0,
            platform_scale: 2.0,
            ..Default::default()
        };
        let store = Arc::new(SettingsStore::new(tuned).unwrap());
        let keys = KeyBinding::new(KeyCode::TAB, KeyCode::ESCAPE).unwrap();
        let sink = RecordingSink::new();
        let mut session = Session::with_store(
            Arc::clone(&store),
            keys,
            Box::new(sink.clone()),
            Box::new(NullPointerHost),
        );

        session.handle(PlatformEvent::Key(KeyEvent::down(KeyCode::TAB)));
        session.handle(PlatformEvent::Motion {
            dx: 3.0,
            dy: -2.0,
            aim: AimState::HipFire,
        });

        assert_eq!(session.settings().config(), tuned);
        assert_eq!(sink.deltas(), vec![(3.0, -2.0)]);
    }

    #[test]
    fn applied_version_is_the_one_this_event_published() {
        let (mut session, _sink) = session();
        let store = Arc::clone(session.settings());
        let side = SensitivityConfig {
            platform_scale: 5.0,
            ..Default::default()
        };
        let own = SensitivityConfig {
            platform_scale: 7.0,
            ..Default::default()
        };

        let writer = thread::spawn(move || {
            (0..500)
                .map(|_| store.set_config(side).unwrap())
                .collect::<Vec<u64>>()
        });
        let reported: Vec<u64> = (0..500)
            .map(|_| match session.handle(PlatformEvent::Config(own)) {
                EventOutcome::ConfigApplied(version) => version,
                other => panic!("expected ConfigApplied, got {other:?}"),
            })
            .collect();
        let written = writer.join().unwrap();

        let all: HashSet<u64> = reported.iter().chain(&written).copied().collect();
        assert_eq!(all.len(), 1_000, "a version was reported twice");
        assert_eq!(all, (1..=1_000).collect::<HashSet<u64>>());
    }
}
