//=========================================================================
// Wipe Transition Engine
//=========================================================================
//
// Animates a pixel-domain transition between two full-screen snapshots.
//
// Lifecycle:
// ```text
//   before ─┐
//           ├─ Wipe::start() ──> step(ticks) ... step(ticks) ──> done
//   after  ─┘                      │
//                                  └─ frame(): intermediate pixels
// ```
//
// A wipe owns both snapshots and its progress for its whole duration and
// is dropped once `step` reports done. It never aborts half-way.
//
// Effects:
// - `Melt`: two-pixel strips slide down with a staggered start, revealing
//   the after frame from the top
// - `ColorFade`: every palette index walks toward its target
//
//=========================================================================

//=== Module Declarations =================================================

mod fade;
mod melt;
mod snapshot;

//=== External Dependencies ===============================================

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use fade::ColorFade;
use melt::Melt;

//=== Public API ==========================================================

pub use snapshot::FrameSnapshot;

//=== WipeError ===========================================================

/// Failures when setting up a wipe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WipeError {
    /// The two snapshots do not cover the same screen.
    #[error("Wipe snapshots differ in size: before {before:?}, after {after:?}")]
    DimensionMismatch {
        before: (usize, usize),
        after: (usize, usize),
    },

    /// A pixel buffer does not match its declared dimensions.
    #[error("Frame buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

//=== WipeKind ============================================================

/// Which transition effect to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WipeKind {
    #[default]
    Melt,
    ColorFade,
}

//=== WipeProgress ========================================================

/// Transition-local bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WipeProgress {
    /// Tics consumed so far (zero-tic calls count as one).
    pub elapsed_tics: u32,

    /// Number of `step` calls that did work.
    pub steps: u32,

    /// Set once the after frame is fully revealed.
    pub done: bool,
}

//=== Effect ==============================================================

#[derive(Debug, Clone)]
enum Effect {
    Melt(Melt),
    ColorFade(ColorFade),
}

//=== Wipe ================================================================

/// A running screen transition.
#[derive(Debug, Clone)]
pub struct Wipe {
    kind: WipeKind,
    effect: Effect,
    start: FrameSnapshot,
    end: FrameSnapshot,
    screen: FrameSnapshot,
    progress: WipeProgress,
}

impl Wipe {
    //--- Construction -----------------------------------------------------

    /// Begins a transition from `before` to `after`.
    ///
    /// The melt stagger is drawn once from a `ChaCha8Rng` seeded with
    /// `seed`, so equal seeds replay identically.
    ///
    /// # Errors
    ///
    /// [`WipeError::DimensionMismatch`] if the snapshots differ in size.
    pub fn start(
        kind: WipeKind,
        before: FrameSnapshot,
        after: FrameSnapshot,
        seed: u64,
    ) -> Result<Self, WipeError> {
        if before.dimensions() != after.dimensions() {
            return Err(WipeError::DimensionMismatch {
                before: before.dimensions(),
                after: after.dimensions(),
            });
        }

        let effect = match kind {
            WipeKind::Melt => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                Effect::Melt(Melt::new(before.width(), &mut rng))
            }
            WipeKind::ColorFade => Effect::ColorFade(ColorFade),
        };

        debug!(
            target: "session::wipe",
            "Starting {:?} wipe ({}x{}, seed {:#x})",
            kind,
            before.width(),
            before.height(),
            seed
        );

        Ok(Self {
            kind,
            effect,
            screen: before.clone(),
            start: before,
            end: after,
            progress: WipeProgress::default(),
        })
    }

    //--- Stepping ---------------------------------------------------------

    /// Advances the effect by `ticks` elapsed tics and reports completion.
    ///
    /// Zero is treated as one so the very first call always makes
    /// progress. Calls after completion do nothing and return `true`.
    pub fn step(&mut self, ticks: u32) -> bool {
        if self.progress.done {
            return true;
        }

        let ticks = ticks.max(1);
        self.progress.elapsed_tics = self.progress.elapsed_tics.saturating_add(ticks);
        self.progress.steps += 1;

        let done = match &mut self.effect {
            Effect::Melt(melt) => melt.advance(&self.start, &self.end, &mut self.screen, ticks),
            Effect::ColorFade(fade) => fade.advance(&self.end, &mut self.screen, ticks),
        };

        trace!(
            target: "session::wipe",
            "Wipe step {} (+{} tics, total {})",
            self.progress.steps,
            ticks,
            self.progress.elapsed_tics
        );

        if done {
            self.screen.clone_from(&self.end);
            self.progress.done = true;
            debug!(
                target: "session::wipe",
                "Wipe finished after {} tics",
                self.progress.elapsed_tics
            );
        }
        done
    }

    //--- Accessors --------------------------------------------------------

    /// The frame to show right now.
    pub fn frame(&self) -> &FrameSnapshot {
        &self.screen
    }

    pub fn kind(&self) -> WipeKind {
        self.kind
    }

    pub fn progress(&self) -> WipeProgress {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.progress.done
    }

    /// Per-strip vertical offsets for a melt, `None` for other effects.
    pub fn column_offsets(&self) -> Option<&[i32]> {
        match &self.effect {
            Effect::Melt(melt) => Some(melt.offsets()),
            Effect::ColorFade(_) => None,
        }
    }

    /// Consumes the wipe, returning the final frame.
    pub fn into_frame(self) -> FrameSnapshot {
        self.screen
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    //--- Test Helpers -----------------------------------------------------

    fn gradient(width: usize, height: usize, base: u8) -> FrameSnapshot {
        let pixels = (0..width * height)
            .map(|i| base.wrapping_add(i as u8))
            .collect();
        FrameSnapshot::from_pixels(width, height, pixels).unwrap()
    }

    fn run_to_completion(wipe: &mut Wipe, ticks: u32) -> u32 {
        let mut calls = 0;
        while !wipe.step(ticks) {
            calls += 1;
            assert!(calls < 10_000, "wipe did not terminate");
        }
        calls + 1
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn rejects_mismatched_snapshots() {
        let err = Wipe::start(
            WipeKind::Melt,
            FrameSnapshot::filled(320, 200, 0),
            FrameSnapshot::filled(320, 168, 0),
            1,
        )
        .unwrap_err();

        assert_eq!(
            err,
            WipeError::DimensionMismatch { before: (320, 200), after: (320, 168) }
        );
    }

    #[test]
    fn first_frame_is_the_before_snapshot() {
        let before = gradient(8, 8, 0);
        let wipe = Wipe::start(WipeKind::Melt, before.clone(), gradient(8, 8, 100), 7).unwrap();

        assert_eq!(wipe.frame(), &before);
        assert!(!wipe.is_done());
    }

    //=====================================================================
    // Melt
    //=====================================================================

    #[test]
    fn zero_ticks_still_moves_every_strip() {
        let mut wipe =
            Wipe::start(WipeKind::Melt, gradient(32, 24, 0), gradient(32, 24, 9), 3).unwrap();
        let initial = wipe.column_offsets().unwrap().to_vec();

        wipe.step(0);

        let after = wipe.column_offsets().unwrap();
        assert!(initial.iter().zip(after).all(|(a, b)| b > a));
        assert_eq!(wipe.progress().elapsed_tics, 1);
        assert_eq!(wipe.progress().steps, 1);
    }

    #[test]
    fn stagger_is_bounded_and_smooth() {
        let wipe =
            Wipe::start(WipeKind::Melt, gradient(320, 4, 0), gradient(320, 4, 1), 42).unwrap();
        let offsets = wipe.column_offsets().unwrap();

        assert_eq!(offsets.len(), 160);
        assert!(offsets.iter().all(|&y| (-15..=0).contains(&y)));
        assert!(offsets.windows(2).all(|w| (w[1] - w[0]).abs() <= 1));
    }

    #[test]
    fn same_seed_replays_identically() {
        let a = Wipe::start(WipeKind::Melt, gradient(64, 8, 0), gradient(64, 8, 1), 99).unwrap();
        let b = Wipe::start(WipeKind::Melt, gradient(64, 8, 0), gradient(64, 8, 1), 99).unwrap();

        assert_eq!(a.column_offsets(), b.column_offsets());
    }

    #[test]
    fn melt_ends_on_after_frame() {
        let after = gradient(40, 30, 77);
        let mut wipe = Wipe::start(WipeKind::Melt, gradient(40, 30, 0), after.clone(), 5).unwrap();

        run_to_completion(&mut wipe, 1);

        assert_eq!(wipe.frame(), &after);
        assert!(wipe.step(1), "done wipes stay done");
    }

    #[test]
    fn melt_takes_bounded_tics() {
        let height = 200;
        let mut wipe = Wipe::start(
            WipeKind::Melt,
            FrameSnapshot::filled(320, height, 0),
            FrameSnapshot::filled(320, height, 1),
            11,
        )
        .unwrap();

        let calls = run_to_completion(&mut wipe, 1);

        assert!(calls as usize <= 16 + height);
    }

    #[test]
    fn odd_width_covers_last_column() {
        let after = gradient(5, 6, 40);
        let mut wipe = Wipe::start(WipeKind::Melt, gradient(5, 6, 0), after.clone(), 2).unwrap();

        run_to_completion(&mut wipe, 2);

        assert_eq!(wipe.into_frame(), after);
    }

    //=====================================================================
    // Color Fade
    //=====================================================================

    #[test]
    fn fade_walks_toward_target() {
        let before = FrameSnapshot::from_pixels(2, 1, vec![0, 10]).unwrap();
        let after = FrameSnapshot::from_pixels(2, 1, vec![4, 2]).unwrap();
        let mut wipe = Wipe::start(WipeKind::ColorFade, before, after.clone(), 0).unwrap();

        assert!(!wipe.step(2));
        assert_eq!(wipe.frame().pixels(), &[2, 8]);
        assert!(wipe.column_offsets().is_none());

        run_to_completion(&mut wipe, 2);
        assert_eq!(wipe.frame(), &after);
    }

    //=====================================================================
    // Properties
    //=====================================================================

    proptest! {
        #[test]
        fn any_wipe_terminates_on_after_frame(
            width in 1usize..24,
            height in 1usize..24,
            seed in any::<u64>(),
            fade in any::<bool>(),
            before_base in any::<u8>(),
            after_base in any::<u8>(),
            ticks in proptest::collection::vec(0u32..4, 1..8),
        ) {
            let kind = if fade { WipeKind::ColorFade } else { WipeKind::Melt };
            let after = gradient(width, height, after_base);
            let mut wipe = Wipe::start(kind, gradient(width, height, before_base), after.clone(), seed)
                .unwrap();

            let mut calls = 0usize;
            let mut i = 0usize;
            while !wipe.step(ticks[i % ticks.len()]) {
                i += 1;
                calls += 1;
                prop_assert!(calls < 5_000);
            }

            prop_assert_eq!(wipe.frame(), &after);
        }
    }
}
