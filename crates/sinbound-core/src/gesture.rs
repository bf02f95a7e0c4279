//! Spin-to-reveal gesture: accumulates pointer rotation around the viewport
//! centre and fires a celebration after 1.5 turns and a milestone after 3.

use std::f64::consts::{PI, TAU};

use glam::Vec2;

use crate::constants::{
    CONFETTI_SEC, METALLIC_BANNER_SEC, MILESTONE_BANNER_SEC, SPIN_CELEBRATION_ANGLE, SPIN_CURSOR_SEC,
    SPIN_HINT_SEC, SPIN_IDLE_TIMEOUT_SEC, SPIN_MILESTONE_ANGLE, SPIN_MOVEMENT_EPSILON,
};

/// Float slack when comparing the accumulator against a whole-turn threshold.
/// Covers the f32 pointer coordinates; the f64 sum itself adds next to nothing
/// however many samples a turn is split into.
const THRESHOLD_SLACK: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Effects fired by one pointer sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpinEvents {
    pub celebration: bool,
    /// Banner side when the milestone fired.
    pub milestone: Option<Side>,
}

impl SpinEvents {
    pub fn is_empty(&self) -> bool {
        !self.celebration && self.milestone.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub total_angle: f64,
    pub last_angle: Option<f64>,
    pub last_time: Option<f64>,
}

/// Wrap an angle difference into (-PI, PI].
#[inline]
pub fn normalize_delta(delta: f64) -> f64 {
    let d = (delta + PI).rem_euclid(TAU) - PI;
    if d <= -PI {
        d + TAU
    } else {
        d
    }
}

/// Centre of a `width` by `height` viewport, the pivot spins are measured around.
pub fn viewport_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width * 0.5, height * 0.5)
}

pub struct SpinDetector {
    state: GestureState,
    celebrated: bool,
    next_side: Side,
}

impl SpinDetector {
    pub fn new() -> Self {
        Self {
            state: GestureState::default(),
            celebrated: false,
            next_side: Side::Right,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn accumulated(&self) -> f64 {
        self.state.total_angle
    }

    /// Feed a pointer position; `center` is the viewport centre.
    pub fn pointer_moved(&mut self, pointer: Vec2, center: Vec2, now_sec: f64) -> SpinEvents {
        let d = pointer - center;
        self.angle_moved(f64::from(d.y).atan2(f64::from(d.x)), now_sec)
    }

    /// Feed a pointer angle (radians) observed at `now_sec`.
    ///
    /// The delta is accumulated first; a sample arriving after the idle
    /// timeout then clears everything it added without firing.
    pub fn angle_moved(&mut self, angle: f64, now_sec: f64) -> SpinEvents {
        let mut events = SpinEvents::default();
        if let (Some(last_angle), Some(last_time)) = (self.state.last_angle, self.state.last_time) {
            let delta = normalize_delta(angle - last_angle);
            if delta.abs() > SPIN_MOVEMENT_EPSILON {
                self.state.total_angle += delta;
            }
            if now_sec - last_time > SPIN_IDLE_TIMEOUT_SEC {
                self.reset();
            } else {
                events = self.evaluate();
            }
        }
        self.state.last_angle = Some(angle);
        self.state.last_time = Some(now_sec);
        events
    }

    /// Reset on idle without a pointer sample. Returns true when a reset happened.
    pub fn poll(&mut self, now_sec: f64) -> bool {
        match self.state.last_time {
            Some(last) if now_sec - last > SPIN_IDLE_TIMEOUT_SEC && self.state.total_angle != 0.0 => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        if self.state.total_angle != 0.0 {
            log::debug!("[spin] idle reset at {:.2} rad", self.state.total_angle);
        }
        self.state.total_angle = 0.0;
        self.celebrated = false;
    }

    // Celebration is checked first so a sample crossing both thresholds
    // reports both; the milestone then clears the accumulator and re-arms the
    // celebration for the next gesture.
    fn evaluate(&mut self) -> SpinEvents {
        let mut events = SpinEvents::default();
        let total = self.state.total_angle.abs() + THRESHOLD_SLACK;
        if !self.celebrated && total >= SPIN_CELEBRATION_ANGLE {
            self.celebrated = true;
            events.celebration = true;
            log::debug!("[spin] celebration");
        }
        if total >= SPIN_MILESTONE_ANGLE {
            let side = self.next_side;
            self.next_side = side.flipped();
            events.milestone = Some(side);
            self.state.total_angle = 0.0;
            self.celebrated = false;
            log::debug!("[spin] milestone, banner {}", side.as_str());
        }
        events
    }
}

impl Default for SpinDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Which spin overlays are visible, driven by [`SpinEvents`] and a clock.
#[derive(Clone, Debug, Default)]
pub struct SpinOverlay {
    metallic_until: Option<f64>,
    confetti_until: Option<f64>,
    cursor_until: Option<f64>,
    banner: Option<(Side, f64)>,
    hint_started: Option<f64>,
}

impl SpinOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_hint(&mut self, now_sec: f64) {
        self.hint_started = Some(now_sec);
    }

    pub fn apply(&mut self, events: SpinEvents, now_sec: f64) {
        if events.celebration {
            self.metallic_until = Some(now_sec + METALLIC_BANNER_SEC);
            self.confetti_until = Some(now_sec + CONFETTI_SEC);
            self.cursor_until = Some(now_sec + SPIN_CURSOR_SEC);
        }
        if let Some(side) = events.milestone {
            self.banner = Some((side, now_sec + MILESTONE_BANNER_SEC));
        }
    }

    pub fn metallic_visible(&self, now_sec: f64) -> bool {
        self.metallic_until.is_some_and(|t| now_sec < t)
    }

    pub fn confetti_visible(&self, now_sec: f64) -> bool {
        self.confetti_until.is_some_and(|t| now_sec < t)
    }

    pub fn spin_cursor(&self, now_sec: f64) -> bool {
        self.cursor_until.is_some_and(|t| now_sec < t)
    }

    pub fn banner(&self, now_sec: f64) -> Option<Side> {
        self.banner.filter(|&(_, until)| now_sec < until).map(|(side, _)| side)
    }

    /// Left-to-right reveal of the hint in [0, 1]; `None` once hidden.
    pub fn hint_mask(&self, now_sec: f64) -> Option<f32> {
        let start = self.hint_started?;
        let elapsed = now_sec - start;
        if !(0.0..SPIN_HINT_SEC).contains(&elapsed) {
            return None;
        }
        Some((elapsed / SPIN_HINT_SEC).min(1.0) as f32)
    }
}
