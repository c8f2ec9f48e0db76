//! Fixed-step animation clock.
//!
//! The clock advances by a constant increment once per rendered frame and is
//! never derived from wall-clock time. If the host calls at a rate other
//! than the nominal display refresh, animation speed drifts accordingly;
//! this is the intended pacing model, not an oversight.

/// Monotonically increasing animation time in seconds.
///
/// Starts at zero when created and moves forward by [`AnimationClock::FRAME_STEP`]
/// on every [`advance`](AnimationClock::advance) call. It is never reset by a
/// viewport reconfiguration, so animation continues smoothly across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    seconds: f32,
}

impl AnimationClock {
    /// Per-frame increment, one sixtieth of a second.
    pub const FRAME_STEP: f32 = 0.0166666666;

    /// Creates a clock at zero seconds.
    pub fn new() -> Self {
        Self { seconds: 0.0 }
    }

    /// Current animation time in seconds.
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Advances the clock by one frame step and returns the new time.
    pub fn advance(&mut self) -> f32 {
        self.seconds += Self::FRAME_STEP;
        self.seconds
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
