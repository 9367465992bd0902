//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use session_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::EngineError;

// Collaborators
pub use crate::core::catalog::{AssetCatalog, LumpId, NameCatalog};
pub use crate::core::collaborators::{
    AudioSystem, Collaborators, FrameSurface, ListenerState, LocalNet, MenuLayer, ModeDrawers,
    NetSync, Simulation,
};
pub use crate::core::timing::{SystemTicClock, TicClock};

// Session state
pub use crate::core::presentation::{PresentationMode, PresentationState, ViewLayout};
pub use crate::core::session::{GameAction, PlayerState, SessionContext, Skill, StartupParams};
pub use crate::core::variant::{GameMission, GameMode, GameVariant, GameVersion};

// Input and wipes
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use crate::core::wipe::{FrameSnapshot, WipeKind};
