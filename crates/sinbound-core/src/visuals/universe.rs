//! The player's audio-reactive "universe": stars, rays and pulse rings inside
//! one swaying group, viewed by a camera that follows the pointer.

use glam::{EulerRot, Quat, Vec2};

use super::pulse_rings::PulseRings;
use super::rays::RadiatingRays;
use super::stars::ParallaxStars;
use super::{FrameInput, PulseRingParams, RayParams, StarParams, Visual, VisualEntity};
use crate::camera::Camera;

#[derive(Clone, Debug)]
pub struct UniverseParams {
    pub stars: StarParams,
    pub rays: RayParams,
    pub rings: PulseRingParams,
    pub camera_z: f32,
    pub fov_degrees: f32,
    /// Camera offset per unit of pointer offset; y is inverted.
    pub parallax: Vec2,
}

impl Default for UniverseParams {
    fn default() -> Self {
        Self {
            stars: StarParams::default(),
            rays: RayParams::default(),
            rings: PulseRingParams::default(),
            camera_z: 8.0,
            fov_degrees: 70.0,
            parallax: Vec2::new(2.0, -1.2),
        }
    }
}

impl UniverseParams {
    /// Camera for the current pointer offset, still aimed at the origin.
    pub fn camera(&self, pointer: Vec2) -> Camera {
        let mut camera = Camera::looking_at_origin(self.camera_z, self.fov_degrees);
        let offset = pointer * self.parallax;
        camera.eye.x = offset.x;
        camera.eye.y = offset.y;
        camera
    }
}

/// Group rotation for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UniverseSway {
    pub rot_x: f32,
    pub rot_z: f32,
}

impl UniverseSway {
    pub fn at(elapsed_ms: f64, overall: f32) -> Self {
        let overall = overall.clamp(0.0, 1.0);
        Self {
            rot_z: (elapsed_ms / 4000.0).sin() as f32 * 0.1 + overall * 0.2,
            rot_x: (elapsed_ms / 6000.0).cos() as f32 * 0.08 + overall * 0.1,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rot_x, 0.0, self.rot_z)
    }
}

pub struct Universe {
    params: UniverseParams,
    stars: ParallaxStars,
    rays: RadiatingRays,
    rings: PulseRings,
}

impl Universe {
    pub fn new(params: UniverseParams) -> Self {
        Self {
            stars: ParallaxStars::new(params.stars.clone()),
            rays: RadiatingRays::new(params.rays.clone()),
            rings: PulseRings::new(params.rings.clone()),
            params,
        }
    }

    pub fn params(&self) -> &UniverseParams {
        &self.params
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(UniverseParams::default())
    }
}

impl Visual for Universe {
    fn name(&self) -> &'static str {
        "universe"
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let start = out.len();
        self.stars.generate(input, out);
        self.rays.generate(input, out);
        self.rings.generate(input, out);
        let rotation = UniverseSway::at(input.time.elapsed_ms(), input.levels.overall).rotation();
        for entity in &mut out[start..] {
            entity.position = rotation * entity.position;
        }
    }
}
