//! Explicit simulation clock.
//!
//! Generators never read wall-clock time; the render loop advances a
//! [`SimClock`] from host timestamps and hands the resulting [`FrameTime`]
//! to every generator call, so the same inputs always yield the same frame.

use crate::constants::MAX_FRAME_DELTA_SEC;

/// Time snapshot for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds of animation time since the loop started.
    pub elapsed_sec: f64,
    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DELTA_SEC]`.
    pub delta_sec: f32,
}

impl FrameTime {
    pub fn new(elapsed_sec: f64, delta_sec: f32) -> Self {
        Self {
            elapsed_sec,
            delta_sec,
        }
    }

    /// Elapsed time in milliseconds, the unit most of the periodic formulas use.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_sec * 1000.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct SimClock {
    elapsed_sec: f64,
    last_host_sec: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from a host timestamp (seconds, any monotonic origin).
    ///
    /// The first call only anchors the clock and yields a zero delta.
    pub fn advance_to(&mut self, host_sec: f64) -> FrameTime {
        let delta = match self.last_host_sec {
            Some(prev) => ((host_sec - prev) as f32).clamp(0.0, MAX_FRAME_DELTA_SEC),
            None => 0.0,
        };
        self.last_host_sec = Some(host_sec);
        self.elapsed_sec += delta as f64;
        FrameTime::new(self.elapsed_sec, delta)
    }

    /// Advance by an explicit step. Used by tests and fixed-step callers.
    pub fn step(&mut self, delta_sec: f32) -> FrameTime {
        let delta = delta_sec.clamp(0.0, MAX_FRAME_DELTA_SEC);
        self.elapsed_sec += delta as f64;
        FrameTime::new(self.elapsed_sec, delta)
    }

    /// Forget the host anchor so the next frame after a pause has no jump.
    pub fn rebase(&mut self) {
        self.last_host_sec = None;
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }
}
