//=========================================================================
// Demo Sequencer
//=========================================================================
//
// Drives the attract loop: title pages, recorded demos and credits,
// cycled forever until a game starts.
//
// Lifecycle:
// ```text
//   start_title ──> advance_demo set
//        │
//        ▼
//   do_advance (start of next tic) ──> step = (step + 1) % len
//        │                                │
//        │ page: DemoScreen + timer       │ demo: PlayDemo command
//        ▼                                ▼
//   page_ticker counts down        simulation ends the demo and
//   and requests the next step     requests the next step
// ```
//
// The sequencer never waits on anything. It only reacts to
// `SessionContext::advance_demo` and the page timer.
//
//=========================================================================

//=== Module Declarations =================================================

mod steps;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::catalog::AssetCatalog;
use crate::core::presentation::PresentationState;
use crate::core::session::{GameAction, PlayerState, SessionContext};
use crate::core::variant::GameVariant;

//=== Public API ==========================================================

pub use steps::{
    build_steps, DemoActivity, COMMERCIAL_TITLE_TICS, CREDIT_PAGE, HELP_PAGE, PAGE_TICS,
    TITLE_FALLBACK, TITLE_TICS,
};

//=== DemoCommand =========================================================

/// Work a step hands back to the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoCommand {
    StartMusic(&'static str),
    PlayDemo(String),
}

//=== DemoSequencer =======================================================

#[derive(Debug, Clone)]
pub struct DemoSequencer {
    steps: Vec<DemoActivity>,
    /// `None` until the first advance after `start_title`.
    current: Option<usize>,
    page_tics: i32,
}

impl DemoSequencer {
    pub fn new(variant: &GameVariant, catalog: &dyn AssetCatalog) -> Self {
        Self::from_steps(build_steps(variant, catalog))
    }

    /// Wraps a prebuilt table. The title page always survives
    /// construction, so a table from `build_steps` is never empty.
    pub fn from_steps(steps: Vec<DemoActivity>) -> Self {
        Self {
            steps,
            current: None,
            page_tics: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[DemoActivity] {
        &self.steps
    }

    /// Index of the active step, `None` before the first advance.
    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&DemoActivity> {
        self.current.and_then(|i| self.steps.get(i))
    }

    /// Tics left on the current page.
    pub fn page_tics(&self) -> i32 {
        self.page_tics
    }

    //--- Transitions ------------------------------------------------------

    /// Enters attract mode. The first step starts on the next tic.
    pub fn start_title(&mut self, ctx: &mut SessionContext) {
        debug!(target: "session::demo", "Entering attract mode");
        ctx.game_action = GameAction::Nothing;
        self.current = None;
        ctx.request_demo_advance();
    }

    /// Runs the next step and clears what an ended demo or aborted game
    /// left behind.
    pub fn do_advance(&mut self, ctx: &mut SessionContext) -> Option<DemoCommand> {
        ctx.player_state = PlayerState::Live;
        ctx.advance_demo = false;
        ctx.user_game = false;
        ctx.paused = false;
        ctx.game_action = GameAction::Nothing;

        if self.steps.is_empty() {
            return None;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.steps.len());
        self.current = Some(next);

        match &self.steps[next] {
            DemoActivity::Page { name, tics, music } => {
                debug!(target: "session::demo", "Step {}: page {} for {} tics", next, name, tics);
                self.page_tics = *tics;
                ctx.presentation.enter(PresentationState::DemoScreen { page: name.clone() });
                music.map(DemoCommand::StartMusic)
            }
            DemoActivity::Demo { lump } => {
                debug!(target: "session::demo", "Step {}: demo {}", next, lump);
                Some(DemoCommand::PlayDemo(lump.clone()))
            }
        }
    }

    /// Counts the page down once per tic while a page is showing.
    pub fn page_ticker(&mut self, ctx: &mut SessionContext) {
        self.page_tics -= 1;
        if self.page_tics < 0 {
            trace!(target: "session::demo", "Page time up");
            ctx.request_demo_advance();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::NameCatalog;
    use crate::core::test_support::{context, variant};
    use crate::core::variant::{GameMission, GameMode, GameVersion};
    use proptest::prelude::*;

    fn full_catalog() -> NameCatalog {
        NameCatalog::from_names(["PLAYPAL", "TITLEPIC", "CREDIT", "HELP2", "DEMO1", "DEMO2", "DEMO3", "DEMO4"])
    }

    fn page_name(activity: &DemoActivity) -> &str {
        match activity {
            DemoActivity::Page { name, .. } => name,
            DemoActivity::Demo { lump } => lump,
        }
    }

    //=====================================================================
    // Table Construction
    //=====================================================================

    #[test]
    fn ultimate_cycles_seven_steps() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let seq = DemoSequencer::new(&v, &full_catalog());

        let names: Vec<&str> = seq.steps().iter().map(page_name).collect();
        assert_eq!(names, ["TITLEPIC", "demo1", "CREDIT", "demo2", "CREDIT", "demo3", "demo4"]);
    }

    #[test]
    fn registered_cycles_six_steps_with_help_page() {
        let v = variant(GameMission::Doom, GameMode::Registered, GameVersion::Doom19);
        let seq = DemoSequencer::new(&v, &full_catalog());

        assert_eq!(seq.len(), 6);
        assert_eq!(
            seq.steps()[0],
            DemoActivity::Page { name: "TITLEPIC".into(), tics: TITLE_TICS, music: Some("intro") }
        );
        assert_eq!(page_name(&seq.steps()[4]), HELP_PAGE);
    }

    #[test]
    fn commercial_title_runs_eleven_seconds() {
        let v = variant(GameMission::Doom2, GameMode::Commercial, GameVersion::Doom19);
        let seq = DemoSequencer::new(&v, &full_catalog());

        assert_eq!(seq.len(), 6);
        assert_eq!(
            seq.steps()[0],
            DemoActivity::Page { name: "TITLEPIC".into(), tics: 385, music: Some("dm2int") }
        );
        assert_eq!(
            seq.steps()[4],
            DemoActivity::Page { name: "TITLEPIC".into(), tics: 385, music: Some("dm2ttl") }
        );
    }

    #[test]
    fn final_class_on_commercial_gets_a_fourth_demo() {
        let v = variant(GameMission::Tnt, GameMode::Commercial, GameVersion::Final);
        assert_eq!(DemoSequencer::new(&v, &full_catalog()).len(), 7);
    }

    #[test]
    fn missing_title_falls_back_to_interpic() {
        let v = variant(GameMission::Doom2, GameMode::Commercial, GameVersion::Doom19);
        let catalog = NameCatalog::from_names(["INTERPIC", "DEMO1", "DEMO2", "DEMO3"]);
        let seq = DemoSequencer::new(&v, &catalog);

        assert_eq!(page_name(&seq.steps()[0]), TITLE_FALLBACK);
        assert_eq!(page_name(&seq.steps()[4]), TITLE_FALLBACK);
    }

    #[test]
    fn missing_demo_lumps_are_skipped() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let catalog = NameCatalog::from_names(["TITLEPIC", "DEMO1", "DEMO3"]);
        let seq = DemoSequencer::new(&v, &catalog);

        let names: Vec<&str> = seq.steps().iter().map(page_name).collect();
        assert_eq!(names, ["TITLEPIC", "demo1", "CREDIT", "CREDIT", "demo3"]);
    }

    //=====================================================================
    // Advancing
    //=====================================================================

    #[test]
    fn start_title_defers_the_first_step() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let mut seq = DemoSequencer::new(&v, &full_catalog());
        let mut ctx = context();
        ctx.game_action = GameAction::NewGame;

        seq.start_title(&mut ctx);

        assert!(ctx.advance_demo);
        assert_eq!(ctx.game_action, GameAction::Nothing);
        assert_eq!(seq.current_step(), None);
    }

    #[test]
    fn advance_resets_leftover_session_state() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let mut seq = DemoSequencer::new(&v, &full_catalog());
        let mut ctx = context();
        ctx.player_state = PlayerState::Dead;
        ctx.paused = true;
        ctx.user_game = true;
        ctx.game_action = GameAction::Completed;
        ctx.advance_demo = true;

        let command = seq.do_advance(&mut ctx);

        assert_eq!(command, Some(DemoCommand::StartMusic("intro")));
        assert_eq!(ctx.player_state, PlayerState::Live);
        assert!(!ctx.paused && !ctx.user_game && !ctx.advance_demo);
        assert_eq!(ctx.game_action, GameAction::Nothing);
        assert_eq!(
            ctx.presentation.state(),
            &PresentationState::DemoScreen { page: "TITLEPIC".into() }
        );
        assert_eq!(seq.page_tics(), TITLE_TICS);
    }

    #[test]
    fn demo_steps_hand_playback_to_the_loop() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let mut seq = DemoSequencer::new(&v, &full_catalog());
        let mut ctx = context();

        seq.do_advance(&mut ctx);
        let command = seq.do_advance(&mut ctx);

        assert_eq!(command, Some(DemoCommand::PlayDemo("demo1".into())));
        assert_eq!(seq.current_step(), Some(1));
    }

    #[test]
    fn page_ticker_requests_advance_after_timer_runs_out() {
        let v = variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate);
        let mut seq = DemoSequencer::new(&v, &full_catalog());
        let mut ctx = context();
        seq.do_advance(&mut ctx);

        for _ in 0..=TITLE_TICS {
            assert!(!ctx.advance_demo);
            seq.page_ticker(&mut ctx);
        }
        assert!(ctx.advance_demo);
    }

    #[test]
    fn empty_table_only_resets_state() {
        let mut seq = DemoSequencer::from_steps(Vec::new());
        let mut ctx = context();
        ctx.paused = true;

        assert_eq!(seq.do_advance(&mut ctx), None);
        assert!(!ctx.paused);
        assert_eq!(seq.current_step(), None);
    }

    //=====================================================================
    // Wrap Invariant
    //=====================================================================

    proptest! {
        #[test]
        fn full_cycles_return_to_the_same_step(start in 1usize..20, cycles in 1usize..5, ultimate: bool) {
            let v = if ultimate {
                variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate)
            } else {
                variant(GameMission::Doom2, GameMode::Commercial, GameVersion::Doom19)
            };
            let mut seq = DemoSequencer::new(&v, &full_catalog());
            let mut ctx = context();

            for _ in 0..start {
                seq.do_advance(&mut ctx);
            }
            let before = seq.current_step();

            for _ in 0..cycles * seq.len() {
                seq.do_advance(&mut ctx);
            }
            prop_assert_eq!(seq.current_step(), before);
        }
    }
}
