//! Parallax star dots orbiting the player centre.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::analysis::LevelKind;
use crate::color::{Rgb, STAR_YELLOW};

#[derive(Clone, Debug)]
pub struct StarParams {
    pub base_count: usize,
    /// Extra stars at full level.
    pub count_gain: f32,
    pub orbit_radius: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub glow_px: f32,
    pub level: LevelKind,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            base_count: 80,
            count_gain: 120.0,
            orbit_radius: 3.5,
            color: STAR_YELLOW,
            opacity: 0.85,
            glow_px: 4.0,
            level: LevelKind::Tempo,
        }
    }
}

impl StarParams {
    pub fn star_count(&self, level: f32) -> usize {
        self.base_count + (level.clamp(0.0, 1.0) * self.count_gain).floor() as usize
    }
}

#[derive(Default)]
pub struct ParallaxStars {
    params: StarParams,
}

impl ParallaxStars {
    pub fn new(params: StarParams) -> Self {
        Self { params }
    }
}

impl Visual for ParallaxStars {
    fn name(&self) -> &'static str {
        "parallax-stars"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let level = input.levels.get(p.level).clamp(0.0, 1.0);
        let total = p.star_count(level);
        let ms = input.time.elapsed_ms();
        let swing = 0.7 + level * 2.5;
        for i in 0..total {
            let fi = i as f32;
            let t = (ms / (600.0 + i as f64 * 2.0)) as f32;
            let angle = fi / total as f32 * TAU + t * (0.7 + level * 1.5);
            let r = p.orbit_radius + (t + fi).sin() * swing;
            let z = (t + fi).cos() * swing;
            let pulse = (t + fi).sin().abs();
            let size = 0.06 + level * 0.12 + pulse * 0.08;
            let glow = 1.2 + level * 3.5 + pulse * 1.2;
            out.push(
                VisualEntity::dot(Vec3::new(angle.cos() * r, angle.sin() * r, z), size, p.color, p.opacity)
                    .with_shape(Shape::Glow {
                        blur: glow * p.glow_px,
                    }),
            );
        }
    }
}
