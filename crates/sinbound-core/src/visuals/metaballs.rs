//! Metaballs drifting outward from the centre of the radio page.
//!
//! Each ball carries `{angle, distance, speed, hue}` across frames. The field
//! at a sample point is the sum of inverse-square falloffs; points above the
//! threshold are drawn with the contribution-weighted blend of ball hues.

use rand::prelude::*;

use glam::{Vec2, Vec3};

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::Rgb;
use crate::constants::NOMINAL_FPS;

#[derive(Clone, Debug)]
pub struct MetaballParams {
    pub count: usize,
    /// Pixel spacing between field samples.
    pub sample_step: u32,
    pub threshold: f32,
    /// Alpha gained per unit of field above the threshold (out of 255).
    pub alpha_gain: f32,
    /// Max drift distance as a fraction of viewport width.
    pub max_distance_frac: f32,
    /// Frames a ball lingers at max distance before respawning at the centre.
    pub linger_frames: f32,
    pub base_radius: f32,
    pub radius_swing: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for MetaballParams {
    fn default() -> Self {
        Self {
            count: 8,
            sample_step: 6,
            threshold: 1.2,
            alpha_gain: 80.0,
            max_distance_frac: 0.45,
            linger_frames: 90.0,
            base_radius: 38.0,
            radius_swing: 18.0,
            saturation: 1.0,
            lightness: 0.6,
        }
    }
}

/// Persistent per-ball state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metaball {
    pub angle: f32,
    pub distance: f32,
    pub speed: f32,
    /// Degrees in [0, 360).
    pub hue: f32,
    /// Frame counter driving the wobble terms.
    pub t: f32,
    pub radius: f32,
    pub lingered: f32,
}

impl Metaball {
    fn spawn(rng: &mut StdRng, base_radius: f32) -> Self {
        Self {
            angle: rng.gen_range(0.0..std::f32::consts::TAU),
            distance: 0.0,
            // px per nominal frame, doubled in `step`
            speed: rng.gen_range(0.008..0.02),
            hue: rng.gen_range(0.0..360.0),
            t: rng.gen_range(0.0..1000.0),
            radius: base_radius,
            lingered: 0.0,
        }
    }

    #[inline]
    pub fn center(&self, origin: Vec2) -> Vec2 {
        origin + Vec2::new(self.angle.cos(), self.angle.sin()) * self.distance
    }
}

pub struct MetaballField {
    params: MetaballParams,
    balls: Vec<Metaball>,
    colors: Vec<Rgb>,
    rng: StdRng,
    respawns: u64,
}

impl MetaballField {
    pub fn new(params: MetaballParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let balls = (0..params.count)
            .map(|_| Metaball::spawn(&mut rng, params.base_radius))
            .collect::<Vec<_>>();
        let mut field = Self {
            params,
            balls,
            colors: Vec::new(),
            rng,
            respawns: 0,
        };
        field.refresh_colors();
        field
    }

    pub fn balls(&self) -> &[Metaball] {
        &self.balls
    }

    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    fn refresh_colors(&mut self) {
        let (s, l) = (self.params.saturation, self.params.lightness);
        self.colors = self.balls.iter().map(|b| Rgb::from_hsl(b.hue, s, l)).collect();
    }

    /// Step all balls by `frames` nominal frames within a viewport of `width`.
    pub fn step(&mut self, frames: f32, width: f32) {
        let max_distance = width * self.params.max_distance_frac;
        let p = self.params.clone();
        for (i, ball) in self.balls.iter_mut().enumerate() {
            let fi = i as f32;
            ball.t += frames;
            ball.distance = (ball.distance + ball.speed * 2.0 * frames).min(max_distance);
            ball.angle += (ball.t / 120.0 + fi).sin() * 0.01 * frames;
            ball.radius = p.base_radius + (ball.t / 40.0 + fi).sin() * p.radius_swing;
            ball.hue = (ball.hue + (0.3 + (ball.t / 200.0 + fi).sin() * 0.2) * frames).rem_euclid(360.0);
            if ball.distance >= max_distance {
                ball.lingered += frames;
                if ball.lingered >= p.linger_frames {
                    *ball = Metaball::spawn(&mut self.rng, p.base_radius);
                    self.respawns += 1;
                }
            }
        }
        self.refresh_colors();
    }

    /// Field strength and blended colour at `point`.
    pub fn field_at(&self, point: Vec2, origin: Vec2) -> (f32, Rgb) {
        let mut field = 0.0f32;
        let mut acc = [0.0f32; 3];
        for (ball, color) in self.balls.iter().zip(self.colors.iter()) {
            let d = point - ball.center(origin);
            let contribution = ball.radius * ball.radius / (d.length_squared() + 1.0);
            field += contribution;
            acc[0] += color.r as f32 * contribution;
            acc[1] += color.g as f32 * contribution;
            acc[2] += color.b as f32 * contribution;
        }
        if field <= 0.0 {
            return (0.0, Rgb::BLACK);
        }
        let blend = |c: f32| (c / field).round().clamp(0.0, 255.0) as u8;
        (field, Rgb::new(blend(acc[0]), blend(acc[1]), blend(acc[2])))
    }
}

impl Visual for MetaballField {
    fn name(&self) -> &'static str {
        "metaballs"
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        let frames = input.time.delta_sec * NOMINAL_FPS;
        self.step(frames, input.viewport.width as f32);
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let step = self.params.sample_step.max(1);
        let origin = input.viewport.center();
        let half = step as f32 * 0.5;
        for y in (0..input.viewport.height).step_by(step as usize) {
            for x in (0..input.viewport.width).step_by(step as usize) {
                let point = Vec2::new(x as f32, y as f32);
                let (field, color) = self.field_at(point, origin);
                if field > self.params.threshold {
                    let alpha = ((field - self.params.threshold) * self.params.alpha_gain).min(255.0) / 255.0;
                    out.push(
                        VisualEntity::dot(Vec3::new(point.x + half, point.y + half, 0.0), half, color, alpha)
                            .with_shape(Shape::Square),
                    );
                }
            }
        }
    }
}
