//=========================================================================
// Core
//=========================================================================
//
// Everything that runs on the session thread.
//
// Architecture:
// ```text
//   Platform thread                 Session thread
//   ───────────────                 ──────────────
//   winit ─► PlatformEvent ──────►  EventCollector ─► SessionLoop
//                                                       │
//                         ┌──────────────┬──────────────┼──────────────┐
//                         ▼              ▼              ▼              ▼
//                   DemoSequencer  PresentationMachine  Display ─► Wipe
//                                        ▲
//                      GameVariant ──────┘  (resolved once, read-only)
// ```
//
// Leaf modules (`catalog`, `variant`, `wipe`, `timing`) know nothing of
// the loop. The loop talks to the outside world only through the traits
// in `collaborators`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod catalog;
pub mod collaborators;
pub mod demo;
pub mod input;
pub mod presentation;
pub mod session;
pub mod session_loop;
pub mod timing;
pub mod variant;
pub mod wipe;

pub(crate) mod platform_bridge;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use catalog::{AssetCatalog, LumpId, NameCatalog};
pub use collaborators::{
    AudioSystem, Collaborators, FrameSurface, ListenerState, LocalNet, MenuLayer, ModeDrawers,
    NetSync, Simulation,
};
pub use session_loop::SessionLoop;
