//! Time calculation utilities for scroll animations
//!
//! All timestamps are milliseconds on the host's monotonic frame clock.

/// Start and end timestamps of one animation, fixed at setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWindow {
    pub start: f64,
    pub end: f64,
}

impl FrameWindow {
    /// Window starting `delay` ms after `now` and lasting `duration` ms
    pub fn new(now: f64, delay: f64, duration: f64) -> Self {
        let start = now + delay;
        Self {
            start,
            end: start + duration,
        }
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn has_started(&self, now: f64) -> bool {
        now >= self.start
    }

    #[inline]
    pub fn is_complete(&self, now: f64) -> bool {
        now >= self.end
    }

    /// Elapsed-time ratio. Only meaningful between start and end, where the
    /// duration is known to be positive.
    #[inline]
    pub fn progress(&self, now: f64) -> f64 {
        (now - self.start) / self.duration()
    }
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
