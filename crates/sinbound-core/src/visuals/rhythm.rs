//! Falling-ball rhythm lane laid over the player.

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::analysis::LevelKind;
use crate::color::Rgb;

#[derive(Clone, Debug)]
pub struct RhythmParams {
    /// Spawn interval at zero level, seconds.
    pub spawn_interval_sec: f32,
    /// Interval shortening at full level, seconds.
    pub spawn_interval_gain: f32,
    /// Fall speed in pixels per second at zero level.
    pub base_speed: f32,
    pub speed_gain: f32,
    /// Hit zone, pixels from the top of the lane.
    pub hit_zone: f32,
    /// Balls are dropped this far past the hit zone.
    pub overrun: f32,
    pub lane_height: f32,
    pub ball_radius: f32,
    pub color: Rgb,
    pub level: LevelKind,
}

impl Default for RhythmParams {
    fn default() -> Self {
        Self {
            spawn_interval_sec: 0.9,
            spawn_interval_gain: 0.4,
            base_speed: 2.5 * 60.0,
            speed_gain: 4.0 * 60.0,
            hit_zone: 420.0,
            overrun: 60.0,
            lane_height: 700.0,
            ball_radius: 20.0,
            color: Rgb::new(102, 204, 255),
            level: LevelKind::Overall,
        }
    }
}

pub struct RhythmLane {
    params: RhythmParams,
    /// Ball offsets from the top of the lane, pixels.
    balls: Vec<f32>,
    since_spawn: f32,
    playing: bool,
    failed: bool,
}

impl RhythmLane {
    pub fn new(params: RhythmParams) -> Self {
        Self {
            params,
            balls: Vec::new(),
            since_spawn: 0.0,
            playing: false,
            failed: false,
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// The track ended while the lane was running.
    pub fn fail(&mut self) {
        if self.playing && !self.failed {
            log::debug!("[rhythm] track failed");
            self.failed = true;
        }
    }

    pub fn reset(&mut self) {
        self.balls.clear();
        self.since_spawn = 0.0;
        self.failed = false;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn balls(&self) -> &[f32] {
        &self.balls
    }

    pub fn spawn_interval(&self, level: f32) -> f32 {
        self.params.spawn_interval_sec - level.clamp(0.0, 1.0) * self.params.spawn_interval_gain
    }

    pub fn step(&mut self, delta_sec: f32, level: f32) {
        if !self.playing || self.failed {
            return;
        }
        let p = &self.params;
        let speed = p.base_speed + level.clamp(0.0, 1.0) * p.speed_gain;
        self.since_spawn += delta_sec;
        for y in self.balls.iter_mut() {
            *y += speed * delta_sec;
        }
        let limit = p.hit_zone + p.overrun;
        self.balls.retain(|&y| y < limit);
        if self.since_spawn > self.spawn_interval(level) {
            self.balls.push(0.0);
            self.since_spawn = 0.0;
        }
    }
}

impl Default for RhythmLane {
    fn default() -> Self {
        Self::new(RhythmParams::default())
    }
}

impl Visual for RhythmLane {
    fn name(&self) -> &'static str {
        "rhythm-lane"
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        let level = input.levels.get(self.params.level);
        self.step(input.time.delta_sec, level);
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let center = input.viewport.center();
        let top = center.y - p.lane_height / 2.0 + 60.0;
        for &y in &self.balls {
            out.push(
                VisualEntity::dot(Vec3::new(center.x, top + y + p.ball_radius, 0.0), p.ball_radius, p.color, 1.0)
                    .with_shape(Shape::Glow { blur: 16.0 }),
            );
        }
    }
}
