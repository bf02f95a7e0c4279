//! Radio page backdrop: breathing concentric discs under a static halftone dot
//! lattice.

use glam::Vec3;

use super::{FrameInput, Visual, VisualEntity};
use crate::color::{Rgb, NEON_CYAN, NEON_PINK};

#[derive(Clone, Debug)]
pub struct DiscsParams {
    pub count: usize,
    pub base_radius: f32,
    pub radius_step: f32,
    pub radius_swing: f32,
    /// Period divisors in seconds for the radius and alpha oscillations.
    pub radius_period: f32,
    pub alpha_period: f32,
    pub base_alpha: f32,
    pub alpha_swing: f32,
    /// Even discs take the first colour, odd discs the second.
    pub colors: [Rgb; 2],
}

impl Default for DiscsParams {
    fn default() -> Self {
        Self {
            count: 7,
            base_radius: 80.0,
            radius_step: 90.0,
            radius_swing: 40.0,
            radius_period: 0.9,
            alpha_period: 0.7,
            base_alpha: 0.13,
            alpha_swing: 0.07,
            colors: [NEON_CYAN, NEON_PINK],
        }
    }
}

#[derive(Default)]
pub struct RadioDiscs {
    params: DiscsParams,
}

impl RadioDiscs {
    pub fn new(params: DiscsParams) -> Self {
        Self { params }
    }

    pub fn disc_radius(&self, i: usize, elapsed_sec: f64) -> f32 {
        let p = &self.params;
        let fi = i as f32;
        let wave = (elapsed_sec as f32 / p.radius_period + fi).sin();
        p.base_radius + fi * p.radius_step + wave * p.radius_swing
    }
}

impl Visual for RadioDiscs {
    fn name(&self) -> &'static str {
        "radio-discs"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let center = input.viewport.center();
        let secs = input.time.elapsed_sec as f32;
        for i in 0..p.count {
            let fi = i as f32;
            let alpha = p.base_alpha + p.alpha_swing * (secs / p.alpha_period + fi).sin();
            out.push(VisualEntity::dot(
                Vec3::new(center.x, center.y, 0.0),
                self.disc_radius(i, input.time.elapsed_sec),
                p.colors[i % 2],
                alpha,
            ));
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalftoneOverlayParams {
    pub spacing: u32,
    pub dot_radius: f32,
    pub opacity: f32,
    pub color: Rgb,
}

impl Default for HalftoneOverlayParams {
    fn default() -> Self {
        Self {
            spacing: 10,
            dot_radius: 2.0,
            opacity: 0.13,
            color: Rgb::WHITE,
        }
    }
}

#[derive(Default)]
pub struct HalftoneOverlay {
    params: HalftoneOverlayParams,
}

impl HalftoneOverlay {
    pub fn new(params: HalftoneOverlayParams) -> Self {
        Self { params }
    }
}

impl Visual for HalftoneOverlay {
    fn name(&self) -> &'static str {
        "halftone-overlay"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let step = p.spacing.max(1) as usize;
        for y in (0..input.viewport.height).step_by(step) {
            for x in (0..input.viewport.width).step_by(step) {
                out.push(VisualEntity::dot(
                    Vec3::new(x as f32, y as f32, 0.0),
                    p.dot_radius,
                    p.color,
                    p.opacity,
                ));
            }
        }
    }
}
