//! Session driver (event loop)
//!
//! Engine events and deferred session work are both dispatched here, one
//! message per loop turn, so handlers never run inside the call stack of
//! the operation that caused them.

use std::sync::Weak;

use log::trace;
use tokio::sync::mpsc;

use super::SessionInternal;
use crate::engine::EngineEventReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DriverMessage {
    /// Gathering was already complete and the engine connected when the
    /// latch for `round` was armed.
    GatheringAlreadyComplete { round: u64 },
    Shutdown,
}

pub(crate) type DriverSender = mpsc::UnboundedSender<DriverMessage>;
pub(crate) type DriverReceiver = mpsc::UnboundedReceiver<DriverMessage>;

pub(crate) struct SessionDriver {
    internal: Weak<SessionInternal>,
    events_rx: EngineEventReceiver,
    driver_rx: DriverReceiver,
}

impl SessionDriver {
    pub(crate) fn new(
        internal: Weak<SessionInternal>,
        events_rx: EngineEventReceiver,
        driver_rx: DriverReceiver,
    ) -> Self {
        SessionDriver {
            internal,
            events_rx,
            driver_rx,
        }
    }

    /// event_loop runs until the session shuts down or is dropped.
    pub(crate) async fn event_loop(mut self) {
        let mut engine_open = true;

        loop {
            tokio::select! {
                event = self.events_rx.recv(), if engine_open => {
                    let Some(event) = event else {
                        trace!("engine event stream ended");
                        engine_open = false;
                        continue;
                    };
                    let Some(internal) = self.internal.upgrade() else {
                        break;
                    };
                    internal.handle_engine_event(event);
                }

                msg = self.driver_rx.recv() => {
                    let Some(internal) = self.internal.upgrade() else {
                        break;
                    };
                    match msg {
                        Some(DriverMessage::GatheringAlreadyComplete { round }) => {
                            internal.handle_gathering_already_complete(round);
                        }
                        Some(DriverMessage::Shutdown) | None => break,
                    }
                }
            }
        }

        trace!("session driver stopped");
    }
}
