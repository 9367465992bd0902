//=========================================================================
// Event Collector
//=========================================================================
//
// Session-side end of the platform channel: the Input Source.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame(clock) → Vec<TimedEvent>
//
// Polling is bounded so a flooded channel cannot starve the tic loop.
// Every event is stamped with the session clock as it is drained.
// The collector never sleeps; pacing belongs to the loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::TimedEvent;
use crate::core::timing::TicClock;

//=== Constants ===========================================================

/// Channel messages drained per loop iteration at most.
pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events and stamps them on arrival.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<TimedEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Returns `Exit` when the window closed or the platform went away.
    pub(crate) fn collect_frame(&mut self, clock: &dyn TicClock) -> TickControl {
        self.events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event, clock) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "session::loop", "Event queue backlog: drained {} messages this frame", drained);
        }

        TickControl::Continue
    }

    /// Events collected by the last `collect_frame`.
    pub(crate) fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Takes the collected events, leaving an empty buffer.
    pub(crate) fn take_events(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    fn handle_event(&mut self, event: PlatformEvent, clock: &dyn TicClock) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                let time_ms = clock.now_ms();
                self.events.extend(
                    discrete
                        .into_iter()
                        .chain(continuous)
                        .map(|event| TimedEvent { time_ms, event }),
                );
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
