//=========================================================================
// Input Buffer
//
// Collects input between two platform frames and hands it over in one
// batch.
//
// Responsibilities:
// - Keep discrete inputs (keys, buttons) in arrival order
// - Drop immediate repeats of the same discrete input (key auto-repeat)
// - Sum pointer motion into a single delta per frame
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    /// Motion summed since the last drain.
    motion: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            motion: None,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // Motion deltas accumulate; a frame delivers at most one motion event.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        if let Some(total) = self.motion.as_mut() {
            if total.accumulate(&event) {
                return;
            }
        }
        self.motion = Some(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` and clears the buffer, or `None`
    // when nothing arrived this frame.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.discrete.capacity();
        let discrete = std::mem::replace(&mut self.discrete, Vec::with_capacity(capacity));
        let continuous = self.motion.take().into_iter().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.motion.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
