//! Expanding, fading rings behind the home grids.

use glam::Vec3;
use smallvec::SmallVec;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::analysis::LevelKind;
use crate::color::Rgb;

/// Rings alive per layer after every update.
pub const RINGS_PER_LAYER: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayer {
    pub base_radius: f32,
    pub color: Rgb,
    pub speed: f32,
    pub width: f32,
    pub opacity: f32,
}

impl RingLayer {
    const fn new(base_radius: f32, color: Rgb, speed: f32, width: f32, opacity: f32) -> Self {
        Self {
            base_radius,
            color,
            speed,
            width,
            opacity,
        }
    }
}

pub const DEFAULT_RING_LAYERS: [RingLayer; 7] = [
    RingLayer::new(2.0, Rgb::new(180, 120, 255), 1.0, 1.5, 0.18), // purple
    RingLayer::new(5.0, Rgb::new(0, 255, 200), 0.7, 2.2, 0.12),   // teal
    RingLayer::new(8.0, Rgb::new(255, 80, 180), 1.3, 2.8, 0.10),  // pink
    RingLayer::new(12.0, Rgb::new(102, 204, 255), 0.5, 3.5, 0.09), // blue
    RingLayer::new(17.0, Rgb::new(255, 255, 255), 1.1, 2.5, 0.07), // white
    RingLayer::new(21.0, Rgb::new(180, 120, 255), 0.9, 3.8, 0.06), // purple
    RingLayer::new(26.0, Rgb::new(255, 80, 180), 1.5, 4.2, 0.05), // pink
];

#[derive(Clone, Debug)]
pub struct RingsParams {
    pub layers: Vec<RingLayer>,
    pub base_speed: f32,
    pub speed_gain: f32,
    pub base_expansion: f32,
    pub expansion_gain: f32,
    pub width_gain: f32,
    /// World z of layer 0; later layers step back by `layer_depth_step`.
    pub base_depth: f32,
    pub layer_depth_step: f32,
    pub level: LevelKind,
}

impl Default for RingsParams {
    fn default() -> Self {
        Self {
            layers: DEFAULT_RING_LAYERS.to_vec(),
            base_speed: 0.25,
            speed_gain: 1.5,
            base_expansion: 12.0,
            expansion_gain: 10.0,
            width_gain: 2.5,
            base_depth: -2.0,
            layer_depth_step: 0.5,
            level: LevelKind::Overall,
        }
    }
}

/// One ring's progress through its expansion; `t` stays in [0, 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub id: u64,
    pub t: f32,
}

pub struct ExpandingRings {
    params: RingsParams,
    layers: Vec<SmallVec<[Ring; RINGS_PER_LAYER]>>,
    next_id: u64,
}

impl ExpandingRings {
    pub fn new(params: RingsParams) -> Self {
        let mut next_id = 0u64;
        let layers = params
            .layers
            .iter()
            .map(|_| {
                let mut rings = SmallVec::new();
                for k in 0..RINGS_PER_LAYER {
                    rings.push(Ring {
                        id: next_id,
                        t: k as f32 / RINGS_PER_LAYER as f32,
                    });
                    next_id += 1;
                }
                rings
            })
            .collect();
        Self {
            params,
            layers,
            next_id,
        }
    }

    pub fn params(&self) -> &RingsParams {
        &self.params
    }

    pub fn layer_rings(&self, layer: usize) -> &[Ring] {
        self.layers.get(layer).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Advance every ring by `delta_sec` at the given level.
    pub fn step(&mut self, delta_sec: f32, level: f32) {
        let rate = self.params.base_speed + level.clamp(0.0, 1.0) * self.params.speed_gain;
        for (rings, layer) in self.layers.iter_mut().zip(self.params.layers.iter()) {
            let dt = delta_sec.max(0.0) * rate * layer.speed;
            for ring in rings.iter_mut() {
                ring.t += dt;
            }
            rings.retain(|r| r.t < 1.0);
            while rings.len() < RINGS_PER_LAYER {
                rings.push(Ring {
                    id: self.next_id,
                    t: 0.0,
                });
                self.next_id += 1;
            }
        }
    }

    #[inline]
    pub fn ring_radius(&self, layer: &RingLayer, t: f32, level: f32) -> f32 {
        layer.base_radius + t * (self.params.base_expansion + level * self.params.expansion_gain)
    }
}

impl Default for ExpandingRings {
    fn default() -> Self {
        Self::new(RingsParams::default())
    }
}

impl Visual for ExpandingRings {
    fn name(&self) -> &'static str {
        "expanding-rings"
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        let level = input.levels.get(self.params.level);
        self.step(input.time.delta_sec, level);
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let level = input.levels.get(self.params.level).clamp(0.0, 1.0);
        for (i, (rings, layer)) in self.layers.iter().zip(self.params.layers.iter()).enumerate() {
            let z = self.params.base_depth - i as f32 * self.params.layer_depth_step;
            let width = layer.width + level * self.params.width_gain;
            for ring in rings {
                let inner = self.ring_radius(layer, ring.t, level);
                out.push(
                    VisualEntity::dot(
                        Vec3::new(0.0, 0.0, z),
                        inner + width * 0.5,
                        layer.color,
                        layer.opacity * (1.0 - ring.t),
                    )
                    .with_shape(Shape::Ring { thickness: width })
                    .with_phase(ring.t),
                );
            }
        }
    }
}
