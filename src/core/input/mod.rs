//=========================================================================
// Input
//=========================================================================
//
// Input event types and the responder chain they are routed through.
//
// ```text
//   TimedEvent ──> MenuLayer::responder ──declined──> Simulation::responder
//                        │ accepted                        │ declined
//                        ▼                                 ▼
//                      stop                              dropped
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod responder;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton, TimedEvent};
pub use responder::{dispatch_all, route, Routed};
