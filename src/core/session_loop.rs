//=========================================================================
// Session Loop
//=========================================================================
//
// The Main Loop. Runs on the session thread and owns every piece of
// session state.
//
// One iteration:
// ```text
//   1. input      drain, stamp, route menu -> game
//   2. tics       pacer decides n >= 1; per tic:
//                   advance_demo? -> DemoSequencer::do_advance
//                   Simulation::advance_one_tick
//                   page ticker while on a demo screen
//   3. audio      positional update from the listener
//   4. display    draw pass (wipe included) if the surface is visible
//   5. net        one sync per iteration
//   6. fps        frame accounting
// ```
//
// The only way out is a quit request raised while handling input (or a
// finished single demo) and the platform going away. Between iterations
// the loop publishes the mouse-grab policy to the platform; on the way
// out it tells the platform to shut down.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::collaborators::Collaborators;
use crate::core::demo::{DemoCommand, DemoSequencer};
use crate::core::input::{dispatch_all, TimedEvent};
use crate::core::platform_bridge::{
    EventCollector, PlatformEvent, PlatformHandle, SessionEvent, TickControl,
};
use crate::core::presentation::{Display, DisplayTargets, PresentationMode, PresentationState};
use crate::core::session::{LaunchPlan, SessionContext, StartPath};
use crate::core::timing::{FpsCounter, TicPacer};

//=== SessionLoop =========================================================

pub struct SessionLoop {
    ctx: SessionContext,
    collaborators: Collaborators,
    display: Display,
    demo: DemoSequencer,
    pacer: TicPacer,
    fps: FpsCounter,
    /// Recording that starts right before the first tic.
    pending_record: Option<String>,
    /// Grab state last sent to the platform.
    published_grab: Option<bool>,
    iterations: u64,
}

impl SessionLoop {
    pub fn new(
        ctx: SessionContext,
        collaborators: Collaborators,
        display: Display,
        demo: DemoSequencer,
        pacer: TicPacer,
    ) -> Self {
        Self {
            ctx,
            collaborators,
            display,
            demo,
            pacer,
            fps: FpsCounter::new(),
            pending_record: None,
            published_grab: None,
            iterations: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn demo(&self) -> &DemoSequencer {
        &self.demo
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    //--- launch() ---------------------------------------------------------

    /// Takes the chosen start path. Runs once, before the first iteration.
    pub fn launch(&mut self, plan: &LaunchPlan) {
        let ctx = &mut self.ctx;
        let sim = self.collaborators.simulation.as_mut();

        ctx.time_limit = plan.time_limit;
        self.pending_record = plan.record.clone();

        match &plan.start {
            StartPath::PlayDemo(name) => {
                ctx.flags.singledemo = true;
                sim.defer_play_demo(ctx, name);
            }
            StartPath::TimeDemo(name) => {
                ctx.flags.singledemo = true;
                sim.time_demo(ctx, name);
            }
            StartPath::LoadGame(slot) => sim.load_game(ctx, *slot),
            StartPath::NewGame { skill, episode, map } => {
                sim.init_new(ctx, *skill, *episode, *map);
                ctx.presentation.enter(PresentationState::Level { episode: *episode, map: *map });
                ctx.user_game = true;
            }
            StartPath::Title => self.demo.start_title(ctx),
        }

        info!(target: "session::loop", "Launched: {:?}", plan.start);
    }

    //--- run() ------------------------------------------------------------

    /// Runs until a quit request or until the platform goes away, then
    /// asks the platform to shut down.
    pub(crate) fn run(mut self, receiver: Receiver<PlatformEvent>, platform: &dyn PlatformHandle) {
        let mut collector = EventCollector::new(receiver);

        loop {
            if collector.collect_frame(self.collaborators.clock.as_ref()) == TickControl::Exit {
                info!(target: "session::loop", "Platform closed");
                break;
            }
            if self.run_iteration(collector.take_events()) == TickControl::Exit {
                break;
            }
            self.publish_mouse_grab(platform);
        }

        if !platform.notify(SessionEvent::Shutdown) {
            debug!(target: "session::loop", "Platform already gone");
        }
        info!(target: "session::loop", "Session loop exiting after {} iterations", self.iterations);
    }

    /// Sends the pointer grab policy when it changed since the last send.
    fn publish_mouse_grab(&mut self, platform: &dyn PlatformHandle) {
        let grab = self.ctx.wants_mouse_grab();
        if self.published_grab == Some(grab) {
            return;
        }
        debug!(target: "session::loop", "Mouse grab: {}", grab);
        platform.notify(SessionEvent::MouseGrab(grab));
        self.published_grab = Some(grab);
    }

    //--- run_iteration() --------------------------------------------------

    /// Performs one loop iteration with the events gathered for it.
    pub(crate) fn run_iteration(&mut self, events: Vec<TimedEvent>) -> TickControl {
        self.iterations += 1;

        //--- 1. Input -------------------------------------------------------
        {
            let c = &mut self.collaborators;
            dispatch_all(events, &mut self.ctx, c.menu.as_mut(), c.simulation.as_mut());
        }
        if self.ctx.quit_requested {
            info!(target: "session::loop", "Quit requested");
            return TickControl::Exit;
        }

        if let Some(name) = self.pending_record.take() {
            self.collaborators.simulation.begin_recording(&mut self.ctx, &name);
        }

        //--- 2. Tics --------------------------------------------------------
        let due = self.pacer.due_tics(self.collaborators.clock.as_ref());
        for _ in 0..due {
            self.run_tic();
            if self.ctx.quit_requested {
                return TickControl::Exit;
            }
        }

        //--- 3. Audio -------------------------------------------------------
        let listener = self.collaborators.simulation.listener();
        self.collaborators.audio.update_positional(&listener);

        //--- 4. Display -----------------------------------------------------
        if self.collaborators.surface.is_visible() {
            let c = &mut self.collaborators;
            self.display.draw(
                &mut self.ctx,
                DisplayTargets {
                    surface: c.surface.as_mut(),
                    drawers: c.drawers.as_mut(),
                    menu: c.menu.as_mut(),
                    clock: c.clock.as_ref(),
                },
            );
        }

        //--- 5. Network -----------------------------------------------------
        self.collaborators.net.update(&self.ctx);

        //--- 6. Bookkeeping -------------------------------------------------
        self.fps.record_frame(self.collaborators.clock.now_ms());

        TickControl::Continue
    }

    //--- Single tic -------------------------------------------------------

    fn run_tic(&mut self) {
        if self.ctx.advance_demo {
            if self.ctx.flags.singledemo {
                info!(target: "session::loop", "Single demo finished");
                self.ctx.request_quit();
                return;
            }
            if let Some(command) = self.demo.do_advance(&mut self.ctx) {
                self.execute(command);
            }
        }

        self.collaborators.simulation.advance_one_tick(&mut self.ctx);
        self.ctx.gametic += 1;

        if self.ctx.presentation.mode() == PresentationMode::DemoScreen {
            self.demo.page_ticker(&mut self.ctx);
        }
    }

    fn execute(&mut self, command: DemoCommand) {
        debug!(target: "session::loop", "Demo command {:?}", command);
        match command {
            DemoCommand::StartMusic(cue) => self.collaborators.audio.start_music(cue),
            DemoCommand::PlayDemo(name) => {
                self.collaborators.simulation.defer_play_demo(&mut self.ctx, &name)
            }
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
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::session::Skill;
    use crate::core::test_support::{context, CallLog, Fakes, RecordingPlatform};
    use crossbeam_channel::unbounded;
    use crate::core::timing::{ManualClock, TICRATE};
    use crate::core::wipe::WipeKind;

    //--- Test Helpers -----------------------------------------------------

    fn catalog() -> NameCatalog {
        NameCatalog::from_names(["PLAYPAL", "E1M1", "TITLEPIC", "CREDIT", "DEMO1", "DEMO2", "DEMO3", "DEMO4"])
    }

    fn build(fakes: Fakes) -> (SessionLoop, CallLog, ManualClock) {
        let ctx = context();
        let demo = DemoSequencer::new(ctx.variant(), &catalog());
        let (collaborators, log, clock) = fakes.into_collaborators();
        let session = SessionLoop::new(
            ctx,
            collaborators,
            Display::new(WipeKind::Melt, 7, TICRATE),
            demo,
            TicPacer::new(TICRATE, 35),
        );
        (session, log, clock)
    }

    fn plan(start: StartPath) -> LaunchPlan {
        LaunchPlan { start, record: None, time_limit: None }
    }

    fn key(key: KeyCode) -> TimedEvent {
        TimedEvent { time_ms: 0, event: InputEvent::KeyDown { key, modifiers: Modifiers::NONE } }
    }

    //=====================================================================
    // Iteration Order
    //=====================================================================

    #[test]
    fn iteration_runs_steps_in_order() {
        let (mut session, log, _clock) = build(Fakes::new());
        session.launch(&plan(StartPath::Title));
        log.clear();

        assert_eq!(session.run_iteration(vec![key(KeyCode::KeyA)]), TickControl::Continue);

        let calls = log.take();
        let at = |name: &str| calls.iter().position(|c| c == name).unwrap();
        assert!(at("menu_responder(KeyA)") < at("tick"));
        assert!(at("tick") < at("positional"));
        assert!(at("positional") < at("present"));
        assert!(at("present") < at("net"));
        assert_eq!(calls.last().map(String::as_str), Some("net"));
    }

    #[test]
    fn at_least_one_tic_per_iteration() {
        let (mut session, log, _clock) = build(Fakes::new());
        session.launch(&plan(StartPath::Title));

        for _ in 0..5 {
            session.run_iteration(Vec::new());
        }

        assert!(log.count("tick") >= 5);
        assert_eq!(session.context().gametic as usize, log.count("tick"));
    }

    #[test]
    fn catch_up_runs_every_due_tic() {
        let (mut session, log, clock) = build(Fakes::new());
        session.launch(&plan(StartPath::Title));
        session.run_iteration(Vec::new());
        log.clear();

        clock.advance_tics(4);
        session.run_iteration(Vec::new());

        assert_eq!(log.count("tick"), 4);
    }

    #[test]
    fn hidden_surface_skips_the_draw_pass() {
        let mut fakes = Fakes::new();
        fakes.surface.visible = false;
        let (mut session, log, _clock) = build(fakes);
        session.launch(&plan(StartPath::Title));

        session.run_iteration(Vec::new());

        assert_eq!(log.count("present"), 0);
        assert_eq!(log.count("net"), 1);
    }

    //=====================================================================
    // Input
    //=====================================================================

    #[test]
    fn quit_from_menu_ends_the_iteration_before_any_tic() {
        let mut fakes = Fakes::new();
        fakes.menu.accept(KeyCode::Escape);
        fakes.menu.quit_on(KeyCode::Escape);
        let (mut session, log, _clock) = build(fakes);
        session.launch(&plan(StartPath::Title));

        let control = session.run_iteration(vec![key(KeyCode::Escape), key(KeyCode::KeyA)]);

        assert_eq!(control, TickControl::Exit);
        assert_eq!(log.count("tick"), 0);
        assert_eq!(log.count("menu_responder(KeyA)"), 0);
    }

    //=====================================================================
    // Start Paths
    //=====================================================================

    #[test]
    fn autostart_enters_level_without_demo_screen() {
        let (mut session, log, _clock) = build(Fakes::new());

        session.launch(&plan(StartPath::NewGame { skill: Skill::Medium, episode: 1, map: 1 }));
        session.run_iteration(Vec::new());

        assert_eq!(
            session.context().presentation.state(),
            &PresentationState::Level { episode: 1, map: 1 }
        );
        assert!(session.context().user_game);
        let calls = log.take();
        assert!(calls.contains(&"init_new(Medium,1,1)".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("patch(0,0,")));
        assert_eq!(session.display().wipe_count(), 0);
    }

    #[test]
    fn title_path_starts_the_attract_loop() {
        let (mut session, log, _clock) = build(Fakes::new());
        session.launch(&plan(StartPath::Title));

        session.run_iteration(Vec::new());

        assert_eq!(session.demo().current_step(), Some(0));
        let calls = log.take();
        assert!(calls.contains(&"music(intro)".to_string()));
        assert!(calls.contains(&"patch(0,0,TITLEPIC)".to_string()));
    }

    #[test]
    fn recording_begins_before_the_first_tic() {
        let (mut session, log, _clock) = build(Fakes::new());
        let mut launch = plan(StartPath::NewGame { skill: Skill::Hard, episode: 2, map: 3 });
        launch.record = Some("mydemo".into());
        session.launch(&launch);

        session.run_iteration(Vec::new());
        session.run_iteration(Vec::new());

        let calls = log.take();
        let record = calls.iter().position(|c| c == "record(mydemo)").unwrap();
        let tick = calls.iter().position(|c| c == "tick").unwrap();
        assert!(record < tick);
        assert_eq!(calls.iter().filter(|c| *c == "record(mydemo)").count(), 1);
        assert!(session.context().demo_recording);
    }

    #[test]
    fn single_demo_quits_when_it_ends() {
        let (mut session, log, clock) = build(Fakes::new());
        session.launch(&plan(StartPath::PlayDemo("demo2".into())));
        assert!(session.context().flags.singledemo);

        let mut control = TickControl::Continue;
        for _ in 0..10 {
            control = session.run_iteration(Vec::new());
            if control == TickControl::Exit {
                break;
            }
            clock.advance_tics(1);
        }

        assert_eq!(control, TickControl::Exit);
        assert!(log.take().contains(&"play_demo(demo2)".to_string()));
    }

    //=====================================================================
    // Platform Notifications
    //=====================================================================

    #[test]
    fn quit_request_shuts_the_platform_down() {
        let mut fakes = Fakes::new();
        fakes.menu.accept(KeyCode::Escape);
        fakes.menu.quit_on(KeyCode::Escape);
        let (mut session, _log, _clock) = build(fakes);
        session.launch(&plan(StartPath::Title));
        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key: KeyCode::Escape, modifiers: Modifiers::NONE }],
            continuous: Vec::new(),
        })
        .unwrap();
        let platform = RecordingPlatform::default();

        session.run(rx, &platform);

        assert_eq!(platform.events(), vec![SessionEvent::Shutdown]);
        drop(tx);
    }

    #[test]
    fn finished_single_demo_shuts_the_platform_down() {
        let (mut session, log, _clock) = build(Fakes::new());
        session.launch(&plan(StartPath::PlayDemo("demo1".into())));
        let (tx, rx) = unbounded();
        let platform = RecordingPlatform::default();

        session.run(rx, &platform);

        let events = platform.events();
        assert_eq!(events.last(), Some(&SessionEvent::Shutdown));
        assert!(!events.contains(&SessionEvent::MouseGrab(true)), "demos never grab");
        assert!(log.count("tick") >= 3);
        drop(tx);
    }

    #[test]
    fn mouse_grab_is_published_on_change_only() {
        let (mut session, _log, _clock) = build(Fakes::new());
        session.launch(&plan(StartPath::NewGame { skill: Skill::Medium, episode: 1, map: 1 }));
        let platform = RecordingPlatform::default();

        session.run_iteration(Vec::new());
        session.publish_mouse_grab(&platform);
        session.run_iteration(Vec::new());
        session.publish_mouse_grab(&platform);

        session.ctx.menu_active = true;
        session.publish_mouse_grab(&platform);

        assert_eq!(
            platform.events(),
            vec![SessionEvent::MouseGrab(true), SessionEvent::MouseGrab(false)]
        );
    }

    //=====================================================================
    // Attract Loop
    //=====================================================================

    #[test]
    fn attract_loop_moves_from_title_to_first_demo() {
        let mut fakes = Fakes::new();
        fakes.simulation.demo_tics = 1000;
        let (mut session, log, clock) = build(fakes);
        session.launch(&plan(StartPath::Title));
        session.run_iteration(Vec::new());

        // title page runs 170 tics, then one more to go negative
        clock.advance_tics(35);
        for _ in 0..6 {
            session.run_iteration(Vec::new());
            clock.advance_tics(35);
        }

        assert_eq!(session.demo().current_step(), Some(1));
        assert!(log.take().contains(&"play_demo(demo1)".to_string()));
        assert_eq!(session.display().wipe_count(), 1, "demo screen to level wipes once");
    }
}
