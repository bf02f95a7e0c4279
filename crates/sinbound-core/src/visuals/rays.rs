//! Radiating rays around the player: three layers of glowing spheres whose
//! count, radius and depth follow the spectrum.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::{cycle_palette, Rgb, RAY_PALETTE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayLayer {
    pub base_count: usize,
    pub base_radius: f32,
    /// Period multiplier; smaller layers spin faster.
    pub speed: f32,
}

impl RayLayer {
    pub const fn new(base_count: usize, base_radius: f32, speed: f32) -> Self {
        Self {
            base_count,
            base_radius,
            speed,
        }
    }
}

pub const DEFAULT_RAY_LAYERS: [RayLayer; 3] = [
    RayLayer::new(32, 2.5, 1.0),
    RayLayer::new(24, 3.7, 0.7),
    RayLayer::new(16, 5.2, 0.45),
];

#[derive(Clone, Debug)]
pub struct RayParams {
    pub layers: Vec<RayLayer>,
    /// One extra ray per `extra_divisor` of mean magnitude.
    pub extra_divisor: f32,
    pub palette: Vec<Rgb>,
    /// Pixels of glow per unit of emissive intensity.
    pub glow_px: f32,
}

impl Default for RayParams {
    fn default() -> Self {
        Self {
            layers: DEFAULT_RAY_LAYERS.to_vec(),
            extra_divisor: 12.0,
            palette: RAY_PALETTE.to_vec(),
            glow_px: 4.0,
        }
    }
}

impl RayParams {
    /// Rays drawn for a layer at the given overall level (0..=1).
    pub fn ray_count(&self, layer: &RayLayer, overall: f32) -> usize {
        let mean = overall.clamp(0.0, 1.0) * 255.0;
        layer.base_count + (mean / self.extra_divisor).floor() as usize
    }
}

#[derive(Default)]
pub struct RadiatingRays {
    params: RayParams,
}

impl RadiatingRays {
    pub fn new(params: RayParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RayParams {
        &self.params
    }
}

impl Visual for RadiatingRays {
    fn name(&self) -> &'static str {
        "radiating-rays"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let ms = input.time.elapsed_ms();
        let bass = input.levels.bass;
        let span = input.sample.len();
        for layer in &self.params.layers {
            let total = self.params.ray_count(layer, input.levels.overall);
            let speed = layer.speed as f64;
            for i in 0..total {
                let fi = i as f32;
                let mag = input.sample.proportional(i, total, span) as f32;
                let m = mag / 255.0;
                let wobble = ((ms / (600.0 * speed)) as f32 + fi).sin();
                let r = layer.base_radius + mag / 32.0 + wobble * (0.2 + m * 0.5);
                let spin = (ms / (900.0 * speed + mag as f64 * 2.0)) as f32;
                let angle = fi / total as f32 * TAU + spin;
                let slow = (ms / (1200.0 * speed)) as f32;
                let z = (slow + fi).sin() * (0.5 + m * 2.5);
                let glow = 1.5 + bass * 7.5 + m * 1.2;
                let size = 0.18 + m * 0.22 + bass * 0.45;
                let color = cycle_palette(&self.params.palette, (slow + fi * 0.13).rem_euclid(1.0));
                out.push(
                    VisualEntity::dot(Vec3::new(angle.cos() * r, angle.sin() * r, z), size, color, 1.0)
                        .with_shape(Shape::Glow {
                            blur: glow * self.params.glow_px,
                        })
                        .with_phase(glow),
                );
            }
        }
    }
}
