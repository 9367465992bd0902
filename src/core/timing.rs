//=========================================================================
// Timing
//=========================================================================
//
// Tic clock abstraction, tic pacing and frame-rate accounting.
//
// Architecture:
// ```text
//   TicClock (ms) ──> TicPacer::due_tics() ──> n tics to run (n >= 1)
//                                │
//                                └─ sleeps until the next tic is due
//                                   when the loop is ahead of real time
// ```
//
// Simulated time never runs ahead of real time, and the loop is never
// allowed to stall: every iteration runs at least one tic. When the loop
// falls far behind, the backlog is capped and the excess dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{trace, warn};

//=== Constants ===========================================================

/// Simulation rate in tics per second.
pub const TICRATE: u32 = 35;

/// Default cap on tics run in a single iteration.
pub const DEFAULT_MAX_CATCH_UP: u32 = 35;

//=== TicClock ============================================================

/// Millisecond time source the loop paces against.
pub trait TicClock: Send {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Blocks the calling thread for roughly `ms` milliseconds.
    fn sleep_ms(&self, ms: u64);
}

//--- SystemTicClock ------------------------------------------------------

/// Wall-clock time source.
#[derive(Debug, Clone, Copy)]
pub struct SystemTicClock {
    origin: Instant,
}

impl SystemTicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemTicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TicClock for SystemTicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

//--- ManualClock ---------------------------------------------------------

/// Hand-driven time source; sleeping advances it instantly.
///
/// Clones share the same time, so a test can keep a handle while the
/// loop owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Advances by `tics` whole tics at [`TICRATE`].
    pub fn advance_tics(&self, tics: u32) {
        self.advance_ms(tic_to_ms(tics as u64, TICRATE));
    }
}

impl TicClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance_ms(ms.max(1));
    }
}

//--- Conversions ---------------------------------------------------------

/// Whole tics elapsed at `ms` milliseconds.
pub fn ms_to_tic(ms: u64, rate: u32) -> u64 {
    ms * rate as u64 / 1000
}

/// First millisecond at which tic `tic` is due.
pub fn tic_to_ms(tic: u64, rate: u32) -> u64 {
    (tic * 1000).div_ceil(rate as u64)
}

//=== TicPacer ============================================================

/// Decides how many simulation tics each loop iteration runs.
#[derive(Debug, Clone)]
pub struct TicPacer {
    rate: u32,
    max_catch_up: u32,
    last_tic: Option<u64>,
}

impl TicPacer {
    pub fn new(rate: u32, max_catch_up: u32) -> Self {
        Self {
            rate,
            max_catch_up: max_catch_up.max(1),
            last_tic: None,
        }
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Current tic according to `clock`.
    pub fn current_tic(&self, clock: &dyn TicClock) -> u64 {
        ms_to_tic(clock.now_ms(), self.rate)
    }

    /// Returns the number of tics to run now, always at least one.
    ///
    /// Sleeps on `clock` until a tic is due if none is. A backlog beyond
    /// the catch-up cap is dropped.
    pub fn due_tics(&mut self, clock: &dyn TicClock) -> u32 {
        let mut now = self.current_tic(clock);
        let Some(last) = self.last_tic else {
            self.last_tic = Some(now);
            return 1;
        };

        while now <= last {
            let wait = tic_to_ms(last + 1, self.rate).saturating_sub(clock.now_ms());
            clock.sleep_ms(wait.max(1));
            now = self.current_tic(clock);
        }

        let behind = now - last;
        let run = if behind > self.max_catch_up as u64 {
            warn!(
                target: "session::loop",
                "Running {} tics behind, dropping {}",
                behind,
                behind - self.max_catch_up as u64
            );
            self.max_catch_up
        } else {
            behind as u32
        };

        trace!(target: "session::loop", "Tic {}: running {} tics", now, run);
        self.last_tic = Some(now);
        run
    }
}

//=== FpsCounter ==========================================================

/// Frame-rate accounting over one-second windows.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start_ms: Option<u64>,
    frames_in_window: u32,
    last_frame_ms: Option<u64>,
    fps: u32,
    frame_ms: u64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one presented frame at `now_ms`.
    pub fn record_frame(&mut self, now_ms: u64) {
        if let Some(last) = self.last_frame_ms {
            self.frame_ms = now_ms.saturating_sub(last);
        }
        self.last_frame_ms = Some(now_ms);

        // The frame that opens a window belongs to the previous one.
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            return;
        };
        self.frames_in_window += 1;

        if now_ms.saturating_sub(start) >= 1000 {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start_ms = Some(now_ms);
            trace!(target: "session::loop", "{} fps ({} ms/frame)", self.fps, self.frame_ms);
        }
    }

    /// Frames counted in the last completed window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Milliseconds between the last two frames.
    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
