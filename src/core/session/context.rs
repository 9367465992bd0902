//=========================================================================
// Session Context
//=========================================================================
//
// The single owner of session-wide mutable state.
//
// The loop owns one `SessionContext` and lends it to collaborators for
// the duration of a call. Only the session thread ever touches it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{MoveSpeeds, SessionFlags};
use crate::core::catalog::LumpId;
use crate::core::presentation::{PresentationMachine, PresentationState, ViewLayout};
use crate::core::variant::GameVariant;

//=== GameAction ==========================================================

/// Pending request for the simulation, serviced on its next tic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameAction {
    #[default]
    Nothing,
    NewGame,
    LoadGame,
    PlayDemo,
    Completed,
    WorldDone,
}

//=== PlayerState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Live,
    Dead,
    Reborn,
}

//=== SessionContext ======================================================

/// Session state shared by the loop and its collaborators.
#[derive(Debug, Clone)]
pub struct SessionContext {
    //--- Fixed at startup -------------------------------------------------
    /// Read through [`SessionContext::variant`]; never changes after startup.
    variant: GameVariant,
    pub flags: SessionFlags,
    pub move_speeds: MoveSpeeds,
    /// Palette applied when leaving the level view.
    pub palette: LumpId,

    //--- Presentation -----------------------------------------------------
    pub presentation: PresentationMachine,
    pub view: ViewLayout,
    pub set_size_needed: bool,
    pub view_active: bool,
    pub automap_active: bool,
    pub menu_active: bool,
    pub in_help_screens: bool,
    pub paused: bool,

    //--- Game -------------------------------------------------------------
    pub gametic: u64,
    pub game_action: GameAction,
    pub user_game: bool,
    pub player_state: PlayerState,
    pub demo_playback: bool,
    pub demo_recording: bool,
    pub advance_demo: bool,
    pub time_limit: Option<u32>,

    //--- Loop control -----------------------------------------------------
    pub quit_requested: bool,
}

impl SessionContext {
    pub fn new(variant: GameVariant, flags: SessionFlags, palette: LumpId) -> Self {
        Self {
            move_speeds: flags.move_speeds(),
            variant,
            flags,
            palette,
            presentation: PresentationMachine::new(PresentationState::default()),
            view: ViewLayout::default(),
            set_size_needed: true,
            view_active: true,
            automap_active: false,
            menu_active: false,
            in_help_screens: false,
            paused: false,
            gametic: 0,
            game_action: GameAction::Nothing,
            user_game: false,
            player_state: PlayerState::Live,
            demo_playback: false,
            demo_recording: false,
            advance_demo: false,
            time_limit: None,
            quit_requested: false,
        }
    }

    /// The identified content. Collaborators can read it but not replace it.
    pub fn variant(&self) -> &GameVariant {
        &self.variant
    }

    /// Asks the sequencer to move on at the start of the next tic.
    pub fn request_demo_advance(&mut self) {
        self.advance_demo = true;
    }

    /// Asks the loop to stop after the current iteration.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether the platform should capture the pointer right now.
    ///
    /// Released while a menu is up or the game is paused; captured only
    /// while a level is being played live.
    pub fn wants_mouse_grab(&self) -> bool {
        if self.menu_active || self.paused {
            return false;
        }
        self.presentation.state().is_level() && !self.demo_playback && !self.advance_demo
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
