//! The fluttering butterfly shown while a page loads.

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::Rgb;

#[derive(Clone, Debug)]
pub struct ButterflyParams {
    /// Animation phase per second (0.025 per frame at 60 fps).
    pub rate: f32,
    /// Horizontal drift amplitude as a fraction of viewport width.
    pub drift_frac: f32,
    pub drift_rate: f32,
    pub breathe: f32,
    pub breathe_rate: f32,
    pub color: Rgb,
    /// Alpha of the black veil laid over the previous frame.
    pub veil_alpha: f32,
}

impl Default for ButterflyParams {
    fn default() -> Self {
        Self {
            rate: 1.5,
            drift_frac: 0.18,
            drift_rate: 1.1,
            breathe: 0.08,
            breathe_rate: 1.5,
            color: Rgb::new(255, 120, 220),
            veil_alpha: 0.22,
        }
    }
}

/// Per-frame wing pose; surfaces turn this into curves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButterflyPose {
    /// Animation phase.
    pub t: f32,
    /// Wing rotation in radians, mirrored per side.
    pub wing_angle: f32,
    /// Wing-tip flutter in [-1, 1].
    pub flutter: f32,
    /// Antenna sway in [-1, 1].
    pub antenna: f32,
    pub glow_blur: f32,
}

impl ButterflyPose {
    pub fn at(t: f32) -> Self {
        Self {
            t,
            wing_angle: t.sin() * 0.22,
            flutter: (t * 2.0).sin(),
            antenna: (t * 2.0).cos(),
            glow_blur: 32.0 + 16.0 * t.sin().abs(),
        }
    }
}

#[derive(Default)]
pub struct Butterfly {
    params: ButterflyParams,
}

impl Butterfly {
    pub fn new(params: ButterflyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ButterflyParams {
        &self.params
    }
}

impl Visual for Butterfly {
    fn name(&self) -> &'static str {
        "butterfly"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let t = input.time.elapsed_sec as f32 * p.rate;
        let center = input.viewport.center();
        let width = input.viewport.width as f32;
        let x = center.x + (t * p.drift_rate).sin() * width * p.drift_frac;
        let scale = 1.0 + p.breathe * (t * p.breathe_rate).sin();
        out.push(
            VisualEntity::dot(Vec3::new(x, center.y, 0.0), scale, p.color, 1.0)
                .with_shape(Shape::Butterfly(ButterflyPose::at(t)))
                .with_phase(t),
        );
    }
}
