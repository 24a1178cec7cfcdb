//! Threaded runtime glue.
//!
//! The platform side runs on its own thread and pushes events into an
//! unbounded channel; the session drains that channel on one task, so events
//! are handled strictly FIFO no matter how fast they arrive.

use crate::app::{EventOutcome, Session};
use crate::input::PlatformEvent;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Counters accumulated while draining a session's event channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub events: u64,
    pub forwarded: u64,
    pub discarded: u64,
    pub transitions: u64,
    pub configs_applied: u64,
    pub configs_rejected: u64,
}

impl SessionStats {
    fn record(&mut self, outcome: &EventOutcome) {
        self.events += 1;
        match outcome {
            EventOutcome::Forwarded { .. } => self.forwarded += 1,
            EventOutcome::Discarded => self.discarded += 1,
            EventOutcome::Pointer(actions) => self.transitions += actions.len() as u64,
            EventOutcome::ConfigApplied(_) => self.configs_applied += 1,
            EventOutcome::ConfigRejected(_) => self.configs_rejected += 1,
        }
    }
}

/// Spawn a thread that forwards `events` onto `tx` until the source runs dry,
/// the receiver goes away, or `shutdown` is raised.
pub fn spawn_event_thread<I>(
    events: I,
    tx: UnboundedSender<PlatformEvent>,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()>
where
    I: IntoIterator<Item = PlatformEvent> + Send + 'static,
{
    thread::spawn(move || {
        for event in events {
            if shutdown.load(Ordering::SeqCst) {
                debug!("Event thread stopping on shutdown");
                break;
            }
            if tx.send(event).is_err() {
                warn!("Session receiver dropped, event thread exiting");
                break;
            }
        }
    })
}

/// Drain `rx` into `session` until every sender is gone.
///
/// `observe` sees each outcome right after it is produced.
pub async fn run_session<F>(
    session: &mut Session,
    mut rx: UnboundedReceiver<PlatformEvent>,
    mut observe: F,
) -> SessionStats
where
    F: FnMut(&EventOutcome),
{
    let mut stats = SessionStats::default();
    while let Some(event) = rx.recv().await {
        let outcome = session.handle(event);
        stats.record(&outcome);
        observe(&outcome);
    }
    debug!("Session channel closed after {} events", stats.events);
    stats
}
