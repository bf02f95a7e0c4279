//! Mirrored, curved halftone dot grids drawn straight in screen space.

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::{Rgb, DARK_BLUE, NEON_BLUE};

#[derive(Clone, Debug)]
pub struct HalftoneGridParams {
    /// Lattice spans `-extent..=extent` on both axes.
    pub extent: i32,
    pub spacing: f32,
    pub curvature: f32,
    pub focal: f32,
    /// Animation phase rate in radians per second.
    pub rate: f32,
    pub z_amplitude: f32,
    pub near: Rgb,
    pub far: Rgb,
    /// `(mirror_x, mirror_y)` per grid.
    pub mirrors: Vec<(f32, f32)>,
}

impl Default for HalftoneGridParams {
    fn default() -> Self {
        Self {
            extent: 20,
            spacing: 30.0,
            curvature: 0.015,
            focal: 400.0,
            rate: 1.2, // 0.02 per frame at 60 fps
            z_amplitude: 50.0,
            near: NEON_BLUE,
            far: DARK_BLUE,
            mirrors: vec![(1.0, 1.0), (-1.0, -1.0)],
        }
    }
}

#[derive(Default)]
pub struct HalftoneGrids {
    params: HalftoneGridParams,
}

impl HalftoneGrids {
    pub fn new(params: HalftoneGridParams) -> Self {
        Self { params }
    }

    /// Oscillating depth in [0, 2 * amplitude] and colour mix in [0, 1].
    pub fn depth_and_tint(&self, elapsed_sec: f64) -> (f32, f32) {
        let tau = elapsed_sec as f32 * self.params.rate;
        let z = tau.sin() * self.params.z_amplitude + self.params.z_amplitude;
        let tint = ((tau * 0.5).sin() + 1.0) / 2.0;
        (z, tint)
    }
}

impl Visual for HalftoneGrids {
    fn name(&self) -> &'static str {
        "halftone-grids"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let (z, tint) = self.depth_and_tint(input.time.elapsed_sec);
        let color = p.near.lerp(p.far, tint);
        let center = input.viewport.center();
        let half_width = (input.viewport.width as f32 / 2.0).max(1.0);
        for &(mx, my) in &p.mirrors {
            for i in -p.extent..=p.extent {
                for j in -p.extent..=p.extent {
                    let x = i as f32 * p.spacing;
                    let y = j as f32 * p.spacing;
                    let bend = (x * mx + y * my).powi(2) * p.curvature;
                    let scale = p.focal / (p.focal + z + bend);
                    let px = center.x + x * mx * scale;
                    let py = center.y + y * my * scale;
                    let dist = (px - center.x).hypot(py - center.y);
                    let light = (1.0 - dist / half_width).max(0.0);
                    out.push(
                        VisualEntity::dot(
                            Vec3::new(px, py, z + bend),
                            3.0 + 4.0 * light,
                            color,
                            0.7 + 0.3 * light,
                        )
                        .with_shape(Shape::Glow {
                            blur: 20.0 + 40.0 * light,
                        }),
                    );
                }
            }
        }
    }
}
