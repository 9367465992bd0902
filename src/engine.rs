//=========================================================================
// Session Engine
//
// Main entry point: the startup path and the two-thread runtime.
//
// Architecture:
// ```text
//     EngineBuilder ──build(params, catalog, collaborators)──> Engine ──run()
//         │                 │                                    │
//         ├─ with_tic_rate()├─ resolve variant (fatal on error)  ├─ spawns session thread
//         ├─ with_wipe_*()  ├─ modified-content check            └─ runs platform
//         └─ ...            ├─ palette lookup                       blocks until exit
//                           └─ flags, launch plan, launch
// ```
//
// Every fatal condition surfaces from `build` as an `EngineError`
// before any thread is started.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::catalog::AssetCatalog;
use crate::core::collaborators::Collaborators;
use crate::core::demo::DemoSequencer;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::presentation::Display;
use crate::core::session::{LaunchPlan, SessionContext, SessionFlags, StartupParams};
use crate::core::session_loop::SessionLoop;
use crate::core::timing::{TicPacer, DEFAULT_MAX_CATCH_UP, TICRATE};
use crate::core::variant::{self, GameVariant};
use crate::core::wipe::WipeKind;
use crate::error::EngineError;
use crate::platform::{self, Platform};

//=== Constants ===========================================================

/// Palette lump the session resets to outside of levels.
pub const PALETTE_LUMP: &str = "PLAYPAL";

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Tic rate**: 35 tics per second
/// - **Channel capacity**: 128 platform messages
/// - **Catch-up cap**: 35 tics per iteration
/// - **Wipe**: melt, seed 0
///
/// # Examples
///
/// ```no_run
/// use session_engine::prelude::*;
/// # fn collaborators() -> Collaborators { unimplemented!() }
///
/// let params = StartupParams::from_args(["doom", "--skill", "3"])?;
/// let catalog = NameCatalog::from_names(["PLAYPAL", "E1M1", "TITLEPIC"]);
///
/// EngineBuilder::new()
///     .with_wipe_kind(WipeKind::ColorFade)
///     .build(&params, &catalog, collaborators())?
///     .run();
/// # Ok::<(), EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tic_rate: u32,
    channel_capacity: usize,
    max_catch_up: u32,
    wipe_kind: WipeKind,
    wipe_seed: u64,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tic_rate: TICRATE,
            channel_capacity: 128,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            wipe_kind: WipeKind::default(),
            wipe_seed: 0,
        }
    }

    /// Sets the simulation rate in tics per second.
    ///
    /// # Panics
    ///
    /// Panics if `rate == 0`.
    pub fn with_tic_rate(mut self, rate: u32) -> Self {
        assert!(rate > 0, "Tic rate must be positive");
        self.tic_rate = rate;
        self
    }

    /// Sets the channel capacity for platform → session communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the most tics one iteration may run to catch up.
    ///
    /// # Panics
    ///
    /// Panics if `tics == 0`.
    pub fn with_max_catch_up(mut self, tics: u32) -> Self {
        assert!(tics > 0, "Catch-up cap must be positive");
        self.max_catch_up = tics;
        self
    }

    pub fn with_wipe_kind(mut self, kind: WipeKind) -> Self {
        self.wipe_kind = kind;
        self
    }

    /// Seeds the melt stagger; equal seeds replay equal wipes.
    pub fn with_wipe_seed(mut self, seed: u64) -> Self {
        self.wipe_seed = seed;
        self
    }

    /// Runs the startup path and prepares the session.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`] from variant resolution, the modified-content
    /// check, or [`EngineError::MissingAsset`] when the palette is absent.
    pub fn build(
        self,
        params: &StartupParams,
        catalog: &dyn AssetCatalog,
        collaborators: Collaborators,
    ) -> Result<Engine, EngineError> {
        info!(
            "Building engine (tic rate: {}, channel: {}, wipe: {:?})",
            self.tic_rate, self.channel_capacity, self.wipe_kind
        );

        //--- 1. Identify content -------------------------------------------
        let variant = variant::resolve(catalog, &params.variant_hints())?;
        variant::check_modified_content(&variant, catalog, params.is_modified())?;
        info!("{}", variant.banner());

        let palette = catalog
            .resolve(PALETTE_LUMP)
            .ok_or_else(|| EngineError::MissingAsset(PALETTE_LUMP.to_string()))?;

        //--- 2. Session state ----------------------------------------------
        let flags = SessionFlags::from_params(params);
        let plan = LaunchPlan::new(params, &variant, collaborators.net.is_netgame());
        let demo = DemoSequencer::new(&variant, catalog);
        let ctx = SessionContext::new(variant, flags, palette);

        //--- 3. Launch -----------------------------------------------------
        let mut session = SessionLoop::new(
            ctx,
            collaborators,
            Display::new(self.wipe_kind, self.wipe_seed, self.tic_rate),
            demo,
            TicPacer::new(self.tic_rate, self.max_catch_up),
        );
        session.launch(&plan);

        Ok(Engine {
            session,
            plan,
            channel_capacity: self.channel_capacity,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Session engine runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► SessionLoop (Session Thread, paced at the tic rate)
///   │     └─► Simulation, Display, DemoSequencer, ...
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded channel (PlatformEvent) one way,
/// event loop proxy (SessionEvent) the other
/// ```
pub struct Engine {
    session: SessionLoop,
    plan: LaunchPlan,
    channel_capacity: usize,
}

impl Engine {
    //--- Queries ----------------------------------------------------------

    pub fn variant(&self) -> &GameVariant {
        self.session.context().variant()
    }

    pub fn plan(&self) -> &LaunchPlan {
        &self.plan
    }

    pub fn session(&self) -> &SessionLoop {
        &self.session
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event loop and the platform → session channel
    /// 2. Spawns the session thread with a proxy back to the event loop
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → session ends
    /// 5. On quit: session ends → `Shutdown` via the proxy → platform exits
    pub fn run(self) {
        info!("Starting engine runtime");

        //--- 1. Create event loop and communication channel --------------
        let event_loop = match platform::create_event_loop() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                error!("Platform error: {}", e);
                return;
            }
        };
        let proxy = event_loop.create_proxy();
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the session thread ---------------------------------
        let session = self.session;
        let handle = match thread::Builder::new()
            .name("session".into())
            .spawn(move || session.run(rx, &proxy))
        {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to spawn session thread: {}", e);
                return;
            }
        };
        info!("Session thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        if let Err(e) = Platform::new(tx).run(event_loop) {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup ---------------------------------------------------
        match handle.join() {
            Ok(()) => info!("Session thread terminated cleanly"),
            Err(e) => error!("Session thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
