//=========================================================================
// Collaborators
//=========================================================================
//
// Narrow interfaces the session consumes from the rest of the engine.
//
// Architecture:
// ```text
//   SessionLoop ──┬─> Simulation     advance_one_tick(), game start paths
//                 ├─> MenuLayer      first responder, overlay draw
//                 ├─> ModeDrawers    per-mode and per-layer draw calls
//                 ├─> FrameSurface   screen read/write, blit, present
//                 ├─> AudioSystem    positional update, music cues
//                 ├─> NetSync        once per iteration
//                 └─> TicClock       pacing
// ```
//
// All collaborators are `Send` so the whole bundle can move onto the
// session thread. None of them is shared: the session owns each one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::catalog::LumpId;
use crate::core::input::InputEvent;
use crate::core::presentation::ViewLayout;
use crate::core::session::{SessionContext, Skill};
use crate::core::timing::TicClock;
use crate::core::wipe::FrameSnapshot;

//=== FrameSurface ========================================================

/// Frame output surface.
pub trait FrameSurface: Send {
    /// Copies the current screen contents.
    fn read_screen(&self) -> FrameSnapshot;

    /// Overwrites the screen with `frame`.
    fn write_screen(&mut self, frame: &FrameSnapshot);

    /// Pushes buffered drawing to the screen without flipping.
    fn blit_without_present(&mut self);

    /// Flips the finished frame to the display.
    fn present_frame(&mut self);

    fn set_palette(&mut self, palette: LumpId);

    /// Whether the output is currently visible at all.
    fn is_visible(&self) -> bool {
        true
    }
}

//=== ModeDrawers =========================================================

/// Draw routines the display pass dispatches to.
pub trait ModeDrawers: Send {
    /// Applies a pending view-size change and reports the new layout.
    fn execute_set_view_size(&mut self) -> ViewLayout;

    fn erase_hud(&mut self);
    fn draw_automap(&mut self);
    fn draw_status_bar(&mut self, fullscreen: bool, refresh: bool);
    fn draw_player_view(&mut self);
    fn draw_hud(&mut self);
    fn draw_intermission(&mut self);
    fn draw_finale(&mut self);

    /// Draws a named full or partial screen graphic at `(x, y)`.
    fn draw_patch(&mut self, x: i32, y: i32, name: &str);

    /// Paints the border pattern into the back screen.
    fn fill_back_screen(&mut self);

    /// Copies the border from the back screen over the view frame.
    fn draw_view_border(&mut self);
}

//=== MenuLayer ===========================================================

/// Menu overlay: first input responder and topmost drawer.
pub trait MenuLayer: Send {
    /// Returns `true` if the menu consumed the event.
    fn responder(&mut self, event: &InputEvent, ctx: &mut SessionContext) -> bool;

    fn draw(&mut self, ctx: &SessionContext);
}

//=== Simulation ==========================================================

/// Gameplay simulation.
pub trait Simulation: Send {
    /// Returns `true` if gameplay consumed the event.
    fn responder(&mut self, event: &InputEvent, ctx: &mut SessionContext) -> bool;

    /// Runs exactly one simulated tic.
    fn advance_one_tick(&mut self, ctx: &mut SessionContext);

    fn init_new(&mut self, ctx: &mut SessionContext, skill: Skill, episode: u8, map: u8);

    /// Queues demo playback for the next tic.
    fn defer_play_demo(&mut self, ctx: &mut SessionContext, name: &str);

    fn time_demo(&mut self, ctx: &mut SessionContext, name: &str);

    fn load_game(&mut self, ctx: &mut SessionContext, slot: u8);

    fn begin_recording(&mut self, ctx: &mut SessionContext, name: &str);

    /// Where the console player is, for positional audio.
    fn listener(&self) -> ListenerState;
}

//=== AudioSystem =========================================================

/// Position and facing of the listening player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerState {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub angle: u32,
}

/// Fire-and-forget audio.
pub trait AudioSystem: Send {
    fn update_positional(&mut self, listener: &ListenerState);
    fn start_music(&mut self, cue: &str);
}

//=== NetSync =============================================================

/// Network state synchronization.
pub trait NetSync: Send {
    fn is_netgame(&self) -> bool;

    /// Sends and receives pending network state.
    fn update(&mut self, ctx: &SessionContext);
}

/// Single-player stand-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalNet;

impl NetSync for LocalNet {
    fn is_netgame(&self) -> bool {
        false
    }

    fn update(&mut self, _ctx: &SessionContext) {}
}

//=== Collaborators =======================================================

/// Everything the session loop drives.
pub struct Collaborators {
    pub surface: Box<dyn FrameSurface>,
    pub drawers: Box<dyn ModeDrawers>,
    pub menu: Box<dyn MenuLayer>,
    pub simulation: Box<dyn Simulation>,
    pub audio: Box<dyn AudioSystem>,
    pub net: Box<dyn NetSync>,
    pub clock: Box<dyn TicClock>,
}
