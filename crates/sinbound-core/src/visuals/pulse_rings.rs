//! Concentric pulse rings driven by the lower half of the spectrum.

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::Rgb;

#[derive(Clone, Debug)]
pub struct PulseRingParams {
    pub base_count: usize,
    /// One extra ring per `extra_divisor` of mean magnitude.
    pub extra_divisor: f32,
    pub base_radius: f32,
    pub radius_step: f32,
    pub base_hue: f32,
    pub hue_step: f32,
    pub opacity: f32,
}

impl Default for PulseRingParams {
    fn default() -> Self {
        Self {
            base_count: 6,
            extra_divisor: 32.0,
            base_radius: 2.5,
            radius_step: 0.7,
            base_hue: 220.0,
            hue_step: 10.0,
            opacity: 0.45,
        }
    }
}

impl PulseRingParams {
    pub fn ring_count(&self, overall: f32) -> usize {
        let mean = overall.clamp(0.0, 1.0) * 255.0;
        self.base_count + (mean / self.extra_divisor).floor() as usize
    }
}

#[derive(Default)]
pub struct PulseRings {
    params: PulseRingParams,
}

impl PulseRings {
    pub fn new(params: PulseRingParams) -> Self {
        Self { params }
    }
}

impl Visual for PulseRings {
    fn name(&self) -> &'static str {
        "pulse-rings"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let total = p.ring_count(input.levels.overall);
        let ms = input.time.elapsed_ms();
        let half = input.sample.len() / 2;
        for i in 0..total {
            let fi = i as f32;
            let mag = input.sample.proportional(i, total, half) as f32;
            let m = mag / 255.0;
            let wobble = (ms / (900.0 + i as f64 * 100.0)) as f32;
            let radius = p.base_radius + fi * p.radius_step + mag / 128.0 + wobble.sin() * (0.2 + m * 0.5);
            let z = ((ms / 1100.0) as f32 + fi).cos() * (0.7 + m * 2.5);
            let color = Rgb::from_hsl(p.base_hue + fi * p.hue_step, 1.0, 0.7);
            out.push(
                VisualEntity::dot(Vec3::new(0.0, 0.0, z), radius, color, p.opacity)
                    .with_shape(Shape::Ring {
                        thickness: 0.08 + m * 0.12,
                    })
                    .with_phase(0.25 + m * 0.7),
            );
        }
    }
}
