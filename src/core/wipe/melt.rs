//=========================================================================
// Melt Effect
//=========================================================================
//
// The screen is cut into two-pixel-wide strips. Each strip carries a
// vertical offset `y`:
//
//   y < 0        strip has not started yet; counts up by one per tic
//   0 <= y < h   rows [0, y) show the after frame, rows [y, h) show the
//                before frame shifted down by y
//   y >= h       strip fully revealed
//
// Offsets start in [-15, 0] with neighbours differing by at most one, so
// the melt front stays ragged but continuous.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use super::FrameSnapshot;

//=== Constants ===========================================================

const STRIP_WIDTH: usize = 2;

/// Rows a strip drops per tic once it has moved past this depth.
const FAST_DROP: usize = 8;

/// Depth up to which strips accelerate (y + 1 per tic).
const ACCEL_ROWS: usize = 16;

//=== Melt ================================================================

#[derive(Debug, Clone)]
pub(super) struct Melt {
    offsets: Vec<i32>,
}

impl Melt {
    /// Seeds the per-strip stagger.
    pub(super) fn new<R: Rng>(width: usize, rng: &mut R) -> Self {
        let strips = width.div_ceil(STRIP_WIDTH);
        let mut offsets: Vec<i32> = Vec::with_capacity(strips);

        if strips > 0 {
            offsets.push(-rng.gen_range(0..16));
        }
        for i in 1..strips {
            let y = offsets[i - 1] + rng.gen_range(-1..=1);
            offsets.push(match y {
                y if y > 0 => 0,
                -16 => -15,
                y => y,
            });
        }

        Self { offsets }
    }

    pub(super) fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Runs `ticks` melt tics into `screen`. Returns `true` when every
    /// strip has reached the bottom.
    pub(super) fn advance(
        &mut self,
        start: &FrameSnapshot,
        end: &FrameSnapshot,
        screen: &mut FrameSnapshot,
        ticks: u32,
    ) -> bool {
        let width = screen.width();
        let height = screen.height() as i32;
        let mut done = true;

        for _ in 0..ticks {
            done = true;

            for (i, y) in self.offsets.iter_mut().enumerate() {
                if *y < 0 {
                    *y += 1;
                    done = false;
                    continue;
                }
                if *y >= height {
                    continue;
                }

                let x0 = i * STRIP_WIDTH;
                let x1 = (x0 + STRIP_WIDTH).min(width);
                let top = *y as usize;
                let dy = if top < ACCEL_ROWS { top + 1 } else { FAST_DROP };
                let dy = dy.min(height as usize - top);

                // Newly revealed rows of the after frame.
                screen.copy_columns(end, x0, x1, top, top, dy);

                // Before frame slides down beneath them.
                let top = top + dy;
                screen.copy_columns(start, x0, x1, 0, top, height as usize - top);

                *y = top as i32;
                done = false;
            }

            if done {
                break;
            }
        }

        done || self.offsets.iter().all(|&y| y >= height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
