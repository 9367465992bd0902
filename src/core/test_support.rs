//=========================================================================
// Test Support
//=========================================================================
//
// Recording fakes for every collaborator, sharing one call log.
//
// The surface and the drawers share a small screen. Each drawer paints
// a distinct fill so wipes always have something to move between:
//
//   player_view 7, automap 5, intermission 3, finale 4,
//   patch(name) name length
//
//=========================================================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::core::catalog::LumpId;
use crate::core::collaborators::{
    AudioSystem, Collaborators, FrameSurface, ListenerState, MenuLayer, ModeDrawers, NetSync,
    Simulation,
};
use crate::core::input::{InputEvent, KeyCode};
use crate::core::platform_bridge::{PlatformHandle, SessionEvent};
use crate::core::presentation::{PresentationState, ViewLayout};
use crate::core::session::{GameAction, SessionContext, SessionFlags, Skill};
use crate::core::timing::ManualClock;
use crate::core::variant::{GameMission, GameMode, GameVariant, GameVersion, MissionSource};
use crate::core::wipe::FrameSnapshot;

pub const SCREEN_W: usize = 16;
pub const SCREEN_H: usize = 8;

//=== Builders ============================================================

pub fn variant(mission: GameMission, mode: GameMode, version: GameVersion) -> GameVariant {
    GameVariant {
        mission,
        mode,
        version,
        mission_source: MissionSource::Content,
        description: "test".into(),
        bfg_edition: false,
        store_demo: false,
    }
}

/// Ultimate Doom session with default flags.
pub fn context() -> SessionContext {
    SessionContext::new(
        variant(GameMission::Doom, GameMode::Retail, GameVersion::Ultimate),
        SessionFlags::default(),
        LumpId(0),
    )
}

//=== CallLog =============================================================

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

type SharedScreen = Arc<Mutex<FrameSnapshot>>;

fn paint(screen: &SharedScreen, fill: u8) {
    screen.lock().unwrap().pixels_mut().fill(fill);
}

//=== FakeSurface =========================================================

pub struct FakeSurface {
    log: CallLog,
    screen: SharedScreen,
    last_read: Mutex<Option<FrameSnapshot>>,
    pub visible: bool,
}

impl FakeSurface {
    pub fn screen(&self) -> FrameSnapshot {
        self.screen.lock().unwrap().clone()
    }

    pub fn last_read(&self) -> FrameSnapshot {
        self.last_read.lock().unwrap().clone().expect("screen never read")
    }
}

impl FrameSurface for FakeSurface {
    fn read_screen(&self) -> FrameSnapshot {
        let frame = self.screen();
        *self.last_read.lock().unwrap() = Some(frame.clone());
        frame
    }

    fn write_screen(&mut self, frame: &FrameSnapshot) {
        *self.screen.lock().unwrap() = frame.clone();
    }

    fn blit_without_present(&mut self) {
        self.log.push("blit");
    }

    fn present_frame(&mut self) {
        self.log.push("present");
    }

    fn set_palette(&mut self, palette: LumpId) {
        self.log.push(format!("palette({})", palette.0));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

//=== FakeDrawers =========================================================

pub struct FakeDrawers {
    log: CallLog,
    screen: SharedScreen,
    /// Returned by the next view-size change.
    pub layout: ViewLayout,
}

impl ModeDrawers for FakeDrawers {
    fn execute_set_view_size(&mut self) -> ViewLayout {
        self.log.push("set_view_size");
        self.layout
    }

    fn erase_hud(&mut self) {
        self.log.push("erase_hud");
    }

    fn draw_automap(&mut self) {
        self.log.push("automap");
        paint(&self.screen, 5);
    }

    fn draw_status_bar(&mut self, fullscreen: bool, refresh: bool) {
        self.log.push(format!("status_bar({},{})", fullscreen, refresh));
    }

    fn draw_player_view(&mut self) {
        self.log.push("player_view");
        paint(&self.screen, 7);
    }

    fn draw_hud(&mut self) {
        self.log.push("hud");
    }

    fn draw_intermission(&mut self) {
        self.log.push("intermission");
        paint(&self.screen, 3);
    }

    fn draw_finale(&mut self) {
        self.log.push("finale");
        paint(&self.screen, 4);
    }

    fn draw_patch(&mut self, x: i32, y: i32, name: &str) {
        self.log.push(format!("patch({},{},{})", x, y, name));
        paint(&self.screen, name.len() as u8);
    }

    fn fill_back_screen(&mut self) {
        self.log.push("fill_back_screen");
    }

    fn draw_view_border(&mut self) {
        self.log.push("view_border");
    }
}

//=== FakeMenu ============================================================

pub struct FakeMenu {
    log: CallLog,
    accepts: HashSet<KeyCode>,
    quit_keys: HashSet<KeyCode>,
}

impl FakeMenu {
    /// Consume key presses of `key`.
    pub fn accept(&mut self, key: KeyCode) {
        self.accepts.insert(key);
    }

    /// Request a quit when `key` is consumed.
    pub fn quit_on(&mut self, key: KeyCode) {
        self.quit_keys.insert(key);
    }
}

fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::KeyDown { key, .. } | InputEvent::KeyUp { key, .. } => format!("{:?}", key),
        InputEvent::MouseButtonDown { button, .. } | InputEvent::MouseButtonUp { button, .. } => {
            format!("{:?}", button)
        }
        InputEvent::MouseMotion { .. } => "motion".into(),
        InputEvent::Unidentified => "unidentified".into(),
    }
}

fn pressed_key(event: &InputEvent) -> Option<KeyCode> {
    match event {
        InputEvent::KeyDown { key, .. } => Some(*key),
        _ => None,
    }
}

impl MenuLayer for FakeMenu {
    fn responder(&mut self, event: &InputEvent, ctx: &mut SessionContext) -> bool {
        self.log.push(format!("menu_responder({})", describe(event)));
        match pressed_key(event) {
            Some(key) if self.accepts.contains(&key) => {
                if self.quit_keys.contains(&key) {
                    ctx.request_quit();
                }
                true
            }
            _ => false,
        }
    }

    fn draw(&mut self, _ctx: &SessionContext) {
        self.log.push("menu");
    }
}

//=== FakeSimulation ======================================================

/// Plays demos for a fixed number of tics, then asks for the next step.
pub struct FakeSimulation {
    log: CallLog,
    accepts: HashSet<KeyCode>,
    pub demo_tics: u32,
    demo_left: Option<u32>,
}

impl FakeSimulation {
    pub fn accept(&mut self, key: KeyCode) {
        self.accepts.insert(key);
    }
}

impl Simulation for FakeSimulation {
    fn responder(&mut self, event: &InputEvent, _ctx: &mut SessionContext) -> bool {
        self.log.push(format!("game_responder({})", describe(event)));
        pressed_key(event).is_some_and(|key| self.accepts.contains(&key))
    }

    fn advance_one_tick(&mut self, ctx: &mut SessionContext) {
        self.log.push("tick");
        if ctx.game_action == GameAction::PlayDemo {
            ctx.game_action = GameAction::Nothing;
            ctx.demo_playback = true;
            ctx.presentation.enter(PresentationState::Level { episode: 1, map: 1 });
            self.demo_left = Some(self.demo_tics);
        }
        if let Some(left) = self.demo_left.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 {
                self.demo_left = None;
                ctx.demo_playback = false;
                ctx.request_demo_advance();
            }
        }
    }

    fn init_new(&mut self, _ctx: &mut SessionContext, skill: Skill, episode: u8, map: u8) {
        self.log.push(format!("init_new({:?},{},{})", skill, episode, map));
    }

    fn defer_play_demo(&mut self, ctx: &mut SessionContext, name: &str) {
        self.log.push(format!("play_demo({})", name));
        ctx.game_action = GameAction::PlayDemo;
    }

    fn time_demo(&mut self, ctx: &mut SessionContext, name: &str) {
        self.log.push(format!("time_demo({})", name));
        ctx.game_action = GameAction::PlayDemo;
    }

    fn load_game(&mut self, ctx: &mut SessionContext, slot: u8) {
        self.log.push(format!("load_game({})", slot));
        ctx.game_action = GameAction::LoadGame;
    }

    fn begin_recording(&mut self, ctx: &mut SessionContext, name: &str) {
        self.log.push(format!("record({})", name));
        ctx.demo_recording = true;
    }

    fn listener(&self) -> ListenerState {
        ListenerState::default()
    }
}

//=== FakeAudio / FakeNet =================================================

pub struct FakeAudio {
    log: CallLog,
}

impl AudioSystem for FakeAudio {
    fn update_positional(&mut self, _listener: &ListenerState) {
        self.log.push("positional");
    }

    fn start_music(&mut self, cue: &str) {
        self.log.push(format!("music({})", cue));
    }
}

pub struct FakeNet {
    log: CallLog,
    pub netgame: bool,
}

impl NetSync for FakeNet {
    fn is_netgame(&self) -> bool {
        self.netgame
    }

    fn update(&mut self, _ctx: &SessionContext) {
        self.log.push("net");
    }
}

//=== RecordingPlatform ===================================================

/// Platform handle that keeps every event the session sends.
#[derive(Default)]
pub struct RecordingPlatform {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingPlatform {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PlatformHandle for RecordingPlatform {
    fn notify(&self, event: SessionEvent) -> bool {
        self.events.lock().unwrap().push(event);
        true
    }
}

//=== Fakes ===============================================================

pub struct Fakes {
    pub surface: FakeSurface,
    pub drawers: FakeDrawers,
    pub menu: FakeMenu,
    pub simulation: FakeSimulation,
    pub audio: FakeAudio,
    pub net: FakeNet,
    pub clock: ManualClock,
    pub log: CallLog,
}

impl Fakes {
    pub fn new() -> Self {
        let log = CallLog::default();
        let screen: SharedScreen = Arc::new(Mutex::new(FrameSnapshot::filled(SCREEN_W, SCREEN_H, 0)));
        Self {
            surface: FakeSurface {
                log: log.clone(),
                screen: screen.clone(),
                last_read: Mutex::new(None),
                visible: true,
            },
            drawers: FakeDrawers {
                log: log.clone(),
                screen,
                layout: ViewLayout::default(),
            },
            menu: FakeMenu {
                log: log.clone(),
                accepts: HashSet::new(),
                quit_keys: HashSet::new(),
            },
            simulation: FakeSimulation {
                log: log.clone(),
                accepts: HashSet::new(),
                demo_tics: 3,
                demo_left: None,
            },
            audio: FakeAudio { log: log.clone() },
            net: FakeNet { log: log.clone(), netgame: false },
            clock: ManualClock::new(),
            log,
        }
    }

    /// Boxes everything for the loop. The log and clock handles stay
    /// connected to the boxed fakes.
    pub fn into_collaborators(self) -> (Collaborators, CallLog, ManualClock) {
        let collaborators = Collaborators {
            surface: Box::new(self.surface),
            drawers: Box::new(self.drawers),
            menu: Box::new(self.menu),
            simulation: Box::new(self.simulation),
            audio: Box::new(self.audio),
            net: Box::new(self.net),
            clock: Box::new(self.clock.clone()),
        };
        (collaborators, self.log, self.clock)
    }
}
