//! Perspective camera used to flatten world-space generators onto a canvas.
//!
//! These types avoid referencing platform-specific APIs; scenes project their
//! world-space entities through a [`Camera`] before handing them to a surface.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::visuals::Viewport;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// A world point mapped to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel position, origin top-left.
    pub screen: Vec2,
    /// Pixels per world unit at this depth.
    pub scale: f32,
    /// View-space distance along the viewing axis.
    pub depth: f32,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(eye_z: f32, fovy_degrees: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, eye_z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: fovy_degrees.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Project a world point; `None` when it lies behind the near plane.
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Projected> {
        let view = self.view_matrix() * Vec4::from((world, 1.0));
        let depth = -view.z;
        if depth <= self.znear {
            return None;
        }
        let clip = self.projection_matrix() * view;
        if clip.w.abs() < f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let w = viewport.width as f32;
        let h = viewport.height as f32;
        let screen = Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h);
        // Vertical focal length in pixels: h / (2 tan(fov/2))
        let focal_px = h / (2.0 * (self.fovy_radians * 0.5).tan());
        Some(Projected {
            screen,
            scale: focal_px / depth,
            depth,
        })
    }
}
