//=========================================================================
// Presentation State
//=========================================================================
//
// The coarse screen mode and the machine that owns it.
//
// Transition detection compares *modes*, not payloads: moving between
// demo pages or from one level to the next does not wipe by itself.
// `force_wipe` covers the cases where it should.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Constants ===========================================================

/// Page shown before the attract loop has picked one.
pub const TITLE_PAGE: &str = "TITLEPIC";

/// Native screen width; views narrower than this have a border.
pub const SCREEN_WIDTH: i32 = 320;

/// Native screen height; a view this tall hides the status bar.
pub const SCREEN_HEIGHT: i32 = 200;

//=== PresentationMode ====================================================

/// Discriminant of [`PresentationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationMode {
    Level,
    Intermission,
    Finale,
    DemoScreen,
}

//=== PresentationState ===================================================

/// Which screen is active, with what that screen needs to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationState {
    Level { episode: u8, map: u8 },
    Intermission { episode: u8, last_map: u8, next_map: u8 },
    Finale { episode: u8 },
    DemoScreen { page: String },
}

impl PresentationState {
    pub fn mode(&self) -> PresentationMode {
        match self {
            Self::Level { .. } => PresentationMode::Level,
            Self::Intermission { .. } => PresentationMode::Intermission,
            Self::Finale { .. } => PresentationMode::Finale,
            Self::DemoScreen { .. } => PresentationMode::DemoScreen,
        }
    }

    pub fn is_level(&self) -> bool {
        matches!(self, Self::Level { .. })
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::DemoScreen { page: TITLE_PAGE.to_string() }
    }
}

//=== ViewLayout ==========================================================

/// Geometry of the 3D view window inside the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub view_height: i32,
    pub scaled_view_width: i32,
    pub view_window_x: i32,
    pub view_window_y: i32,
}

impl ViewLayout {
    /// View covers the whole screen; no status bar is shown.
    pub fn is_fullscreen(&self) -> bool {
        self.view_height == SCREEN_HEIGHT
    }

    /// View is narrower than the screen and framed by a border.
    pub fn has_border(&self) -> bool {
        self.scaled_view_width != SCREEN_WIDTH
    }
}

impl Default for ViewLayout {
    /// Full-width view above a 32-pixel status bar.
    fn default() -> Self {
        Self {
            view_height: 168,
            scaled_view_width: SCREEN_WIDTH,
            view_window_x: 0,
            view_window_y: 0,
        }
    }
}

//=== WipeMarker ==========================================================

/// Mode the last draw pass ran in, as seen by wipe detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WipeMarker {
    /// Nothing drawn yet; the first draw never wipes.
    Startup,
    Drawn(PresentationMode),
    /// Wipe on the next draw whatever the mode.
    Forced,
}

//=== PresentationMachine =================================================

/// Sole owner of the active [`PresentationState`].
#[derive(Debug, Clone)]
pub struct PresentationMachine {
    state: PresentationState,
    marker: WipeMarker,
}

impl PresentationMachine {
    pub fn new(initial: PresentationState) -> Self {
        Self {
            state: initial,
            marker: WipeMarker::Startup,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn mode(&self) -> PresentationMode {
        self.state.mode()
    }

    //--- Transitions ------------------------------------------------------

    /// Switches to `next`. The wipe, if any, happens on the next draw.
    pub fn enter(&mut self, next: PresentationState) {
        if next != self.state {
            debug!(target: "session::display", "Presentation {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    /// Requests a wipe on the next draw even if the mode is unchanged.
    pub fn force_wipe(&mut self) {
        debug!(target: "session::display", "Wipe forced");
        self.marker = WipeMarker::Forced;
    }

    //--- Draw bookkeeping -------------------------------------------------

    /// Whether the coming draw pass must wipe.
    pub fn wipe_pending(&self) -> bool {
        match self.marker {
            WipeMarker::Startup => false,
            WipeMarker::Drawn(mode) => mode != self.mode(),
            WipeMarker::Forced => true,
        }
    }

    /// Records that a draw pass ran in the current mode.
    pub(crate) fn mark_drawn(&mut self) {
        self.marker = WipeMarker::Drawn(self.mode());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
