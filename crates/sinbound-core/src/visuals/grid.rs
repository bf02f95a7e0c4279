//! Neon dot lattices floating in front of and behind the home rings.

use std::f32::consts::PI;

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::analysis::LevelKind;
use crate::color::{lerp_palette, Rgb, GRID_PALETTE};

#[derive(Clone, Debug)]
pub struct NeonGridParams {
    /// Dots per side.
    pub size: usize,
    pub spacing: f32,
    pub dot_radius: f32,
    /// `(base_z, phase)` per lattice.
    pub lattices: Vec<(f32, f32)>,
    pub z_amplitude: f32,
    pub parallax_gain: f32,
    pub glow_blur: f32,
    pub palette: Vec<Rgb>,
    /// Colour phase rate: `base + level * gain` cycles per second.
    pub color_rate_base: f32,
    pub color_rate_gain: f32,
    pub level: LevelKind,
}

impl Default for NeonGridParams {
    fn default() -> Self {
        Self {
            size: 32,
            spacing: 2.2,
            dot_radius: 0.18,
            lattices: vec![(-8.0, 0.0), (8.0, PI)],
            z_amplitude: 4.0,
            parallax_gain: 2.5,
            glow_blur: 12.0,
            palette: GRID_PALETTE.to_vec(),
            color_rate_base: 0.15,
            color_rate_gain: 1.2,
            level: LevelKind::Overall,
        }
    }
}

/// Colour-phase accumulator in [0, 1), independent of the lattice motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridColorPhase {
    pub phase: f32,
}

impl GridColorPhase {
    pub fn advance(&mut self, delta_sec: f32, rate: f32) {
        self.phase = (self.phase + delta_sec.max(0.0) * rate).rem_euclid(1.0);
    }
}

pub struct NeonGrids {
    params: NeonGridParams,
    color: GridColorPhase,
    hovered: bool,
}

impl NeonGrids {
    pub fn new(params: NeonGridParams) -> Self {
        Self {
            params,
            color: GridColorPhase::default(),
            hovered: false,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn color_phase(&self) -> GridColorPhase {
        self.color
    }

    /// Current lattice colour, also used to tint the scene light.
    pub fn current_color(&self) -> Rgb {
        lerp_palette(&self.params.palette, self.color.phase)
    }

    /// World z of lattice `(base_z, phase)` at `elapsed_sec`.
    #[inline]
    pub fn lattice_z(&self, base_z: f32, phase: f32, elapsed_sec: f64) -> f32 {
        (elapsed_sec as f32 + phase).sin() * self.params.z_amplitude + base_z
    }
}

impl Default for NeonGrids {
    fn default() -> Self {
        Self::new(NeonGridParams::default())
    }
}

impl Visual for NeonGrids {
    fn name(&self) -> &'static str {
        "neon-grids"
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        let level = input.levels.get(self.params.level).clamp(0.0, 1.0);
        let rate = self.params.color_rate_base + level * self.params.color_rate_gain;
        self.color.advance(input.time.delta_sec, rate);
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let p = &self.params;
        let color = if self.hovered {
            Rgb::WHITE
        } else {
            self.current_color()
        };
        let half = p.size as f32 / 2.0;
        let offset = input.pointer * p.parallax_gain;
        out.reserve(p.lattices.len() * p.size * p.size);
        for &(base_z, phase) in &p.lattices {
            let z = self.lattice_z(base_z, phase, input.time.elapsed_sec);
            for i in 0..p.size {
                for j in 0..p.size {
                    let x = (i as f32 - half) * p.spacing + offset.x;
                    let y = (j as f32 - half) * p.spacing + offset.y;
                    out.push(
                        VisualEntity::dot(Vec3::new(x, y, z), p.dot_radius, color, 1.0)
                            .with_shape(Shape::Glow { blur: p.glow_blur }),
                    );
                }
            }
        }
    }
}
