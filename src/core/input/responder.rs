//=========================================================================
// Responder Chain
//=========================================================================
//
// Each event is offered to the menu first and reaches gameplay only if
// the menu declines it. The first responder to accept ends the chain.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{InputEvent, TimedEvent};
use crate::core::collaborators::{MenuLayer, Simulation};
use crate::core::session::SessionContext;

//=== Routed ==============================================================

/// Which responder, if any, took an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Menu,
    Game,
    Dropped,
}

//=== Routing =============================================================

/// Offers one event to the chain.
pub fn route(
    event: &InputEvent,
    ctx: &mut SessionContext,
    menu: &mut dyn MenuLayer,
    simulation: &mut dyn Simulation,
) -> Routed {
    if matches!(event, InputEvent::Unidentified) {
        return Routed::Dropped;
    }
    if menu.responder(event, ctx) {
        return Routed::Menu;
    }
    if simulation.responder(event, ctx) {
        return Routed::Game;
    }
    Routed::Dropped
}

/// Routes a batch in arrival order.
///
/// Stops early once a responder has asked to quit; the remaining events
/// are discarded. Returns the number of events offered.
pub fn dispatch_all<I>(
    events: I,
    ctx: &mut SessionContext,
    menu: &mut dyn MenuLayer,
    simulation: &mut dyn Simulation,
) -> usize
where
    I: IntoIterator<Item = TimedEvent>,
{
    let mut offered = 0;
    for timed in events {
        if ctx.quit_requested {
            break;
        }
        let routed = route(&timed.event, ctx, menu, simulation);
        trace!(target: "session::loop", "{:?} @{}ms -> {:?}", timed.event, timed.time_ms, routed);
        offered += 1;
    }
    offered
}

//=========================================================================
// Unit Tests
//=========================================================================
