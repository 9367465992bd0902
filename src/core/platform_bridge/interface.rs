//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Interface types between the platform and session threads.
//
//   platform ──PlatformEvent──> session   (bounded channel)
//   session  ──SessionEvent───> platform  (PlatformHandle)
//
// Nothing else crosses that boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the session thread.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered during one platform frame.
    ///
    /// `discrete` keeps arrival order; `continuous` holds coalesced
    /// pointer motion.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== SessionEvent ========================================================

/// Events sent from the session thread back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    /// Pointer capture policy changed.
    MouseGrab(bool),

    /// The session loop ended; the platform should close.
    Shutdown,
}

//=== PlatformHandle ======================================================

/// Session-side handle for waking the platform.
pub(crate) trait PlatformHandle: Send {
    /// Delivers `event`. Returns `false` once the platform is gone.
    fn notify(&self, event: SessionEvent) -> bool;
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(String),
}
