//=========================================================================
// Display Pass
//=========================================================================
//
// Draws one frame for the active presentation state and runs the wipe
// when the state changed since the last frame.
//
// Order of a pass:
//   1. apply a pending view-size change (forces background redraw)
//   2. detect a wipe; snapshot the old screen before anything draws
//   3. erase the HUD, then dispatch on the state:
//        Level         automap, status bar (redrawn when needed)
//        Intermission  intermission drawer
//        Finale        finale drawer
//        DemoScreen    the current page
//   4. level view and HUD on top
//   5. palette reset when leaving the level, back screen fill when
//      entering it, border refresh countdown
//   6. remember what this frame showed
//   7. pause graphic, menu, blit
//   8. present, or snapshot the new screen and run the wipe, drawing
//      the menu and presenting on every wipe tic
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{PresentationMode, PresentationState};
use crate::core::collaborators::{FrameSurface, MenuLayer, ModeDrawers};
use crate::core::session::SessionContext;
use crate::core::timing::{ms_to_tic, TicClock};
use crate::core::wipe::{FrameSnapshot, Wipe, WipeKind};

//=== Constants ===========================================================

/// Frames the view border keeps being redrawn after it was disturbed.
pub const BORDER_REDRAW_FRAMES: u32 = 3;

/// Pause graphic and its width.
pub const PAUSE_PATCH: &str = "M_PAUSE";
const PAUSE_PATCH_WIDTH: i32 = 68;

//=== DisplayTargets ======================================================

/// Collaborators a display pass draws through.
pub struct DisplayTargets<'a> {
    pub surface: &'a mut dyn FrameSurface,
    pub drawers: &'a mut dyn ModeDrawers,
    pub menu: &'a mut dyn MenuLayer,
    pub clock: &'a dyn TicClock,
}

//=== DisplayOutcome ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOutcome {
    /// A wipe ran during this pass.
    pub wiped: bool,
    /// Wipe steps presented, zero without a wipe.
    pub wipe_steps: u32,
}

//=== Trackers ============================================================

/// What the previous pass saw, for change detection.
#[derive(Debug, Clone, Copy, Default)]
struct Trackers {
    /// `None` forces a background redraw.
    old_mode: Option<PresentationMode>,
    view_active: bool,
    menu_active: bool,
    in_help_screens: bool,
    fullscreen: bool,
    border_draw_count: u32,
}

//=== Display =============================================================

/// Per-frame draw driver.
#[derive(Debug, Clone)]
pub struct Display {
    trackers: Trackers,
    wipe_kind: WipeKind,
    wipe_seed: u64,
    wipe_count: u64,
    tic_rate: u32,
}

impl Display {
    pub fn new(wipe_kind: WipeKind, wipe_seed: u64, tic_rate: u32) -> Self {
        Self {
            trackers: Trackers::default(),
            wipe_kind,
            wipe_seed,
            wipe_count: 0,
            tic_rate,
        }
    }

    /// Remaining frames of forced border redraw.
    pub fn border_draw_count(&self) -> u32 {
        self.trackers.border_draw_count
    }

    /// Number of wipes run so far.
    pub fn wipe_count(&self) -> u64 {
        self.wipe_count
    }

    //--- draw() -----------------------------------------------------------

    /// Draws one frame.
    pub fn draw(&mut self, ctx: &mut SessionContext, out: DisplayTargets<'_>) -> DisplayOutcome {
        let DisplayTargets { surface, drawers, menu, clock } = out;

        //--- 1. View size ---------------------------------------------------
        if ctx.set_size_needed {
            ctx.view = drawers.execute_set_view_size();
            ctx.set_size_needed = false;
            self.trackers.old_mode = None;
            self.trackers.border_draw_count = BORDER_REDRAW_FRAMES;
            debug!(target: "session::display", "View resized: {:?}", ctx.view);
        }

        //--- 2. Wipe detection ---------------------------------------------
        let wipe = ctx.presentation.wipe_pending();
        let start = wipe.then(|| surface.read_screen());

        let mode = ctx.presentation.mode();
        let level_live = mode == PresentationMode::Level && ctx.gametic > 0;

        //--- 3. Mode dispatch ----------------------------------------------
        if level_live {
            drawers.erase_hud();
        }

        match ctx.presentation.state() {
            PresentationState::Level { .. } => {
                if level_live {
                    self.draw_level_chrome(ctx, drawers, wipe);
                }
            }
            PresentationState::Intermission { .. } => drawers.draw_intermission(),
            PresentationState::Finale { .. } => drawers.draw_finale(),
            PresentationState::DemoScreen { page } => drawers.draw_patch(0, 0, page),
        }

        //--- 4. View and HUD -----------------------------------------------
        if level_live && !ctx.automap_active {
            drawers.draw_player_view();
        }
        if level_live {
            drawers.draw_hud();
        }

        //--- 5. Background upkeep ------------------------------------------
        if self.trackers.old_mode != Some(mode) && mode != PresentationMode::Level {
            surface.set_palette(ctx.palette);
        }

        if mode == PresentationMode::Level && self.trackers.old_mode != Some(PresentationMode::Level) {
            self.trackers.view_active = false;
            drawers.fill_back_screen();
        }

        if mode == PresentationMode::Level && !ctx.automap_active && ctx.view.has_border() {
            if ctx.menu_active || self.trackers.menu_active || !self.trackers.view_active {
                self.trackers.border_draw_count = BORDER_REDRAW_FRAMES;
            }
            if self.trackers.border_draw_count > 0 {
                drawers.draw_view_border();
                self.trackers.border_draw_count -= 1;
            }
        }

        //--- 6. Remember this frame ----------------------------------------
        self.trackers.menu_active = ctx.menu_active;
        self.trackers.view_active = ctx.view_active;
        self.trackers.in_help_screens = ctx.in_help_screens;
        self.trackers.old_mode = Some(mode);
        ctx.presentation.mark_drawn();

        //--- 7. Overlays ---------------------------------------------------
        if ctx.paused {
            let y = if ctx.automap_active { 4 } else { ctx.view.view_window_y + 4 };
            let x = ctx.view.view_window_x + (ctx.view.scaled_view_width - PAUSE_PATCH_WIDTH) / 2;
            drawers.draw_patch(x, y, PAUSE_PATCH);
        }

        menu.draw(ctx);
        surface.blit_without_present();

        //--- 8. Present or wipe --------------------------------------------
        match start {
            None => {
                surface.present_frame();
                DisplayOutcome::default()
            }
            Some(start) => {
                let end = surface.read_screen();
                let wipe_steps = self.run_wipe(start, end, ctx, surface, menu, clock);
                DisplayOutcome { wiped: true, wipe_steps }
            }
        }
    }

    //--- Level chrome -----------------------------------------------------

    fn draw_level_chrome(&mut self, ctx: &SessionContext, drawers: &mut dyn ModeDrawers, wipe: bool) {
        if ctx.automap_active {
            drawers.draw_automap();
        }

        let fullscreen = ctx.view.is_fullscreen();
        let mut redraw = wipe || (!fullscreen && self.trackers.fullscreen);
        if self.trackers.in_help_screens && !ctx.in_help_screens {
            // help screen was just put away
            redraw = true;
        }

        drawers.draw_status_bar(fullscreen, redraw);
        self.trackers.fullscreen = fullscreen;
    }

    //--- Wipe loop --------------------------------------------------------

    /// Runs the wipe to completion. Returns the number of steps shown.
    fn run_wipe(
        &mut self,
        start: FrameSnapshot,
        end: FrameSnapshot,
        ctx: &SessionContext,
        surface: &mut dyn FrameSurface,
        menu: &mut dyn MenuLayer,
        clock: &dyn TicClock,
    ) -> u32 {
        self.wipe_count += 1;
        let seed = self.wipe_seed ^ self.wipe_count.wrapping_mul(0x9E37_79B9_7F4A_7C15);

        let mut wipe = match Wipe::start(self.wipe_kind, start, end, seed) {
            Ok(wipe) => wipe,
            Err(e) => {
                warn!(target: "session::display", "Skipping wipe: {}", e);
                surface.present_frame();
                return 0;
            }
        };

        let rate = self.tic_rate;
        let tic = |clock: &dyn TicClock| ms_to_tic(clock.now_ms(), rate);
        let mut wipe_start = tic(clock).saturating_sub(1);
        let mut first = true;

        loop {
            let mut now = tic(clock);
            if !first {
                while now <= wipe_start {
                    clock.sleep_ms(1);
                    now = tic(clock);
                }
            }
            first = false;

            let tics = now.saturating_sub(wipe_start) as u32;
            wipe_start = now;

            let done = wipe.step(tics);
            surface.write_screen(wipe.frame());
            surface.blit_without_present();
            menu.draw(ctx);
            surface.present_frame();

            trace!(target: "session::display", "Wipe tic {} ({} elapsed)", now, tics);
            if done {
                break;
            }
        }

        wipe.progress().steps
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
