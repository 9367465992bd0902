//=========================================================================
// Presentation
//=========================================================================
//
// Presentation State Machine: which screen is up, and the per-frame
// draw pass that renders it and wipes between screens.
//
//=========================================================================

//=== Module Declarations =================================================

mod display;
mod state;

//=== Public API ==========================================================

pub use display::{Display, DisplayOutcome, DisplayTargets, BORDER_REDRAW_FRAMES, PAUSE_PATCH};
pub use state::{
    PresentationMachine, PresentationMode, PresentationState, ViewLayout, SCREEN_HEIGHT,
    SCREEN_WIDTH, TITLE_PAGE,
};
