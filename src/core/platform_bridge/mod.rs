//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the session thread.
//
// Components:
// - `interface`: event types, the platform handle and errors (the contract)
// - `event_collector`: session-side draining and time stamping
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent, PlatformHandle, SessionEvent};
