//! Procedural visual generators.
//!
//! Every generator maps a [`FrameInput`] (simulation time, frequency sample,
//! levels, viewport, pointer) to an ordered list of [`VisualEntity`]
//! descriptions. Generators never touch a drawing surface; the render loop
//! driver hands their output to one.

use glam::{Vec2, Vec3};

use crate::analysis::{FrequencySample, Levels};
use crate::clock::FrameTime;
use crate::color::Rgb;

pub mod butterfly;
pub mod confetti;
pub mod discs;
pub mod grid;
pub mod halftone;
pub mod metaballs;
pub mod pulse_rings;
pub mod rays;
pub mod rhythm;
pub mod rings;
pub mod stars;
pub mod universe;

pub use butterfly::{Butterfly, ButterflyParams, ButterflyPose};
pub use confetti::{ConfettiPiece, ConfettiShower};
pub use discs::{DiscsParams, HalftoneOverlay, HalftoneOverlayParams, RadioDiscs};
pub use grid::{GridColorPhase, NeonGridParams, NeonGrids};
pub use halftone::{HalftoneGridParams, HalftoneGrids};
pub use metaballs::{Metaball, MetaballField, MetaballParams};
pub use pulse_rings::{PulseRingParams, PulseRings};
pub use rays::{RadiatingRays, RayLayer, RayParams};
pub use rhythm::{RhythmLane, RhythmParams};
pub use rings::{ExpandingRings, Ring, RingLayer, RingsParams};
pub use stars::{ParallaxStars, StarParams};
pub use universe::{Universe, UniverseParams, UniverseSway};

/// Canvas size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Shape a surface should draw for an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Filled circle of `radius`.
    Dot,
    /// Stroked circle of `radius` with the given line width.
    Ring { thickness: f32 },
    /// Filled circle with a soft glow of `blur` pixels.
    Glow { blur: f32 },
    /// Axis-aligned square of side `2 * radius`, rotated by `phase` radians.
    Square,
    /// The loading-screen butterfly, scaled by `radius`.
    Butterfly(ButterflyPose),
}

/// One drawable primitive for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualEntity {
    /// World or screen position depending on the generator; scenes hand
    /// surfaces screen-space pixels with `z` as depth.
    pub position: Vec3,
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Free animation phase (rotation for squares, hue offsets, ...).
    pub phase: f32,
    pub shape: Shape,
}

impl VisualEntity {
    pub fn dot(position: Vec3, radius: f32, color: Rgb, opacity: f32) -> Self {
        Self {
            position,
            radius,
            color,
            opacity: opacity.clamp(0.0, 1.0),
            phase: 0.0,
            shape: Shape::Dot,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }
}

/// Everything a generator may read for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub time: FrameTime,
    pub sample: &'a FrequencySample,
    pub levels: Levels,
    pub viewport: Viewport,
    /// Pointer offset from the viewport centre, each axis in [-1, 1].
    pub pointer: Vec2,
}

impl<'a> FrameInput<'a> {
    pub fn new(time: FrameTime, sample: &'a FrequencySample, viewport: Viewport) -> Self {
        Self {
            time,
            sample,
            levels: sample.levels(),
            viewport,
            pointer: Vec2::ZERO,
        }
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self
    }
}

/// A visual generator. Stateless generators only implement `generate`;
/// drifting effects also carry entity state forward in `advance`.
pub trait Visual {
    fn name(&self) -> &'static str;

    /// Step persistent entity state by one frame.
    fn advance(&mut self, _input: &FrameInput<'_>) {}

    /// Append this frame's entities to `out`, in draw order.
    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>);
}
