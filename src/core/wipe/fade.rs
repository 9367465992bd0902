//=========================================================================
// Color Fade Effect
//=========================================================================

//=== Internal Dependencies ===============================================

use super::FrameSnapshot;

//=== ColorFade ===========================================================

/// Moves each palette index toward its target by `ticks` per step.
#[derive(Debug, Clone, Copy)]
pub(super) struct ColorFade;

impl ColorFade {
    pub(super) fn advance(&self, end: &FrameSnapshot, screen: &mut FrameSnapshot, ticks: u32) -> bool {
        let step = ticks.min(u8::MAX as u32) as u8;
        let mut changed = false;

        for (pixel, &target) in screen.pixels_mut().iter_mut().zip(end.pixels()) {
            if *pixel > target {
                *pixel = pixel.saturating_sub(step).max(target);
                changed = true;
            } else if *pixel < target {
                *pixel = pixel.saturating_add(step).min(target);
                changed = true;
            }
        }

        !changed || screen.pixels() == end.pixels()
    }
}
