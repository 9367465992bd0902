//=========================================================================
// Session
//=========================================================================
//
// Startup parameters, the flags and launch plan derived from them, and
// the context value the loop threads through every collaborator.
//
// ```text
//   argv ──> StartupParams ──┬─> SessionFlags ─┐
//                            └─> LaunchPlan    ├─> SessionContext
//               GameVariant ───────────────────┘
// ```
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod flags;
mod launch;
mod params;

//=== Public API ==========================================================

pub use context::{GameAction, PlayerState, SessionContext};
pub use flags::{clamp_turbo, Deathmatch, MoveSpeeds, SessionFlags, TURBO_MAX, TURBO_MIN};
pub use launch::{LaunchPlan, Skill, StartPath};
pub use params::{StartupParams, DEFAULT_TURBO};
