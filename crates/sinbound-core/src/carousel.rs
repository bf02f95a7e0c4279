//! Radio page carousel: items on a cylinder that auto-spins until the user
//! picks one, then springs the selection to the front.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::color::Rgb;
use crate::constants::{
    CAROUSEL_AUTO_SPIN_RAD_PER_SEC, CAROUSEL_RESUME_AFTER_SEC, CAROUSEL_SCALE_FRICTION, CAROUSEL_SPRING_FRICTION,
    CAROUSEL_SPRING_MASS, CAROUSEL_SPRING_TENSION,
};

const SPRING_SUBSTEP_SEC: f32 = 1.0 / 240.0;

/// Damped spring integrated with semi-implicit Euler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
}

impl Spring {
    pub fn new(value: f32, tension: f32, friction: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            mass: CAROUSEL_SPRING_MASS,
            tension,
            friction,
        }
    }

    pub fn step(&mut self, target: f32, delta_sec: f32) {
        let mut remaining = delta_sec.max(0.0);
        while remaining > 0.0 {
            let dt = remaining.min(SPRING_SUBSTEP_SEC);
            let force = self.tension * (target - self.value) - self.friction * self.velocity;
            self.velocity += force / self.mass * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }
    }

    pub fn is_settled(&self, target: f32) -> bool {
        (self.value - target).abs() < 1e-3 && self.velocity.abs() < 1e-3
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselLayout {
    pub base_radius: f32,
    pub radius_gain: f32,
    pub camera_base: f32,
    pub camera_gain: f32,
    pub camera_min: f32,
    pub fov_degrees: f32,
    pub hovered_scale: f32,
    pub active_scale: f32,
}

impl CarouselLayout {
    /// The large layout used on desktop.
    pub const BIG: CarouselLayout = CarouselLayout {
        base_radius: 10.0,
        radius_gain: 1.2,
        camera_base: 18.0,
        camera_gain: 2.5,
        camera_min: 28.0,
        fov_degrees: 54.0,
        hovered_scale: 1.75,
        active_scale: 1.65,
    };

    pub const COMPACT: CarouselLayout = CarouselLayout {
        base_radius: 6.0,
        radius_gain: 0.8,
        camera_base: 11.0,
        camera_gain: 1.5,
        camera_min: 28.0,
        fov_degrees: 54.0,
        hovered_scale: 1.55,
        active_scale: 1.45,
    };

    pub fn radius(&self, count: usize) -> f32 {
        self.base_radius + self.radius_gain * (count as f32).sqrt()
    }

    pub fn camera_distance(&self, count: usize) -> f32 {
        (self.camera_base + self.camera_gain * (count as f32).sqrt() * 1.5).max(self.camera_min)
    }
}

/// Where and how to draw one item this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPose {
    pub index: usize,
    /// World position after the group rotation.
    pub position: Vec3,
    /// Item angle on the cylinder before the group rotation.
    pub local_angle: f32,
    pub back_facing: bool,
    pub scale: f32,
    pub active: bool,
    pub hovered: bool,
    pub glow_color: Rgb,
    pub emissive: f32,
}

pub struct CarouselState {
    layout: CarouselLayout,
    count: usize,
    current: usize,
    hovered: Option<usize>,
    auto_spin: bool,
    auto_angle: f32,
    last_action_sec: f64,
    rotation: Spring,
    scales: Vec<Spring>,
}

impl CarouselState {
    pub fn new(layout: CarouselLayout, count: usize) -> Self {
        let mut state = Self {
            layout,
            count: 0,
            current: 0,
            hovered: None,
            auto_spin: true,
            auto_angle: 0.0,
            last_action_sec: 0.0,
            rotation: Spring::new(0.0, CAROUSEL_SPRING_TENSION, CAROUSEL_SPRING_FRICTION),
            scales: Vec::new(),
        };
        state.set_count(count);
        state
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_auto_spinning(&self) -> bool {
        self.auto_spin
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    /// The item list changed; keeps `current` in range.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if count > 0 && self.current >= count {
            self.current = count - 1;
        }
        if count == 0 {
            self.current = 0;
        }
        if self.hovered.is_some_and(|h| h >= count) {
            self.hovered = None;
        }
        self.scales
            .resize(count, Spring::new(1.0, CAROUSEL_SPRING_TENSION, CAROUSEL_SCALE_FRICTION));
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        self.hovered = hovered.filter(|&h| h < self.count);
    }

    /// Select `index`, pausing the auto-spin. Returns false when out of range.
    pub fn select(&mut self, index: usize, now_sec: f64) -> bool {
        if index >= self.count {
            return false;
        }
        self.current = index;
        self.auto_spin = false;
        self.last_action_sec = now_sec;
        true
    }

    pub fn step_left(&mut self, now_sec: f64) -> bool {
        if self.count == 0 {
            return false;
        }
        self.select((self.current + self.count - 1) % self.count, now_sec)
    }

    pub fn step_right(&mut self, now_sec: f64) -> bool {
        if self.count == 0 {
            return false;
        }
        self.select((self.current + 1) % self.count, now_sec)
    }

    /// Rotation that brings the current item to the front.
    pub fn target_angle(&self) -> f32 {
        let n = self.count.max(1) as f32;
        -(TAU / n) * self.current as f32
    }

    pub fn update(&mut self, delta_sec: f32, now_sec: f64) {
        if self.auto_spin {
            self.auto_angle += CAROUSEL_AUTO_SPIN_RAD_PER_SEC * delta_sec;
        } else if now_sec - self.last_action_sec > CAROUSEL_RESUME_AFTER_SEC {
            // Resume from where the selection left the group.
            self.auto_spin = true;
            self.auto_angle = self.rotation.value;
            log::debug!("[carousel] auto-spin resumed");
        }
        let target = if self.auto_spin {
            self.auto_angle
        } else {
            nearest_turn(self.target_angle(), self.rotation.value)
        };
        self.rotation.step(target, delta_sec);

        let pulse = (now_sec * 1000.0 / 200.0).sin() as f32;
        for i in 0..self.scales.len() {
            let target = self.scale_target(i, pulse);
            self.scales[i].step(target, delta_sec);
        }
    }

    fn scale_target(&self, i: usize, pulse: f32) -> f32 {
        if self.hovered == Some(i) {
            self.layout.hovered_scale
        } else if self.current == i {
            self.layout.active_scale + 0.05 * pulse
        } else {
            1.0
        }
    }

    pub fn poses(&self, now_sec: f64) -> Vec<ItemPose> {
        let n = self.count.max(1) as f32;
        let radius = self.layout.radius(self.count);
        (0..self.count)
            .map(|i| {
                let local = TAU / n * i as f32;
                let world = local + self.rotation.value;
                let active = i == self.current;
                let hovered = self.hovered == Some(i);
                let t = now_sec as f32 + i as f32 * 0.5;
                let breathing = 0.7 + 0.3 * t.sin();
                let wobble = 10.0 * t.sin();
                let even = i % 2 == 0;
                let base_hue = if even { 180.0 } else { 50.0 };
                let contrast_hue = if even { 320.0 } else { 200.0 };
                let hue = (if active && hovered { contrast_hue } else { base_hue }) + wobble;
                ItemPose {
                    index: i,
                    position: Vec3::new(world.sin() * radius, 0.0, world.cos() * radius),
                    local_angle: local,
                    back_facing: is_back_facing(local),
                    scale: self.scales.get(i).map(|s| s.value).unwrap_or(1.0),
                    active,
                    hovered,
                    glow_color: Rgb::from_hsl(hue, 1.0, 0.6),
                    emissive: (if active || hovered { 1.2 } else { 0.5 }) * breathing,
                }
            })
            .collect()
    }

    /// Camera for the current item count; pointer parallax `(x * 2.5, -y * 1.5)`.
    pub fn camera(&self, pointer: Vec2) -> Camera {
        let mut camera = Camera::looking_at_origin(self.layout.camera_distance(self.count), self.layout.fov_degrees);
        camera.eye.x = pointer.x * 2.5;
        camera.eye.y = -pointer.y * 1.5;
        camera
    }
}

/// Whether an angle in radians faces away from the camera.
pub fn is_back_facing(angle: f32) -> bool {
    let d = angle.rem_euclid(TAU);
    d > PI / 2.0 && d < 3.0 * PI / 2.0
}

/// `angle` shifted by whole turns to lie closest to `reference`.
pub fn nearest_turn(angle: f32, reference: f32) -> f32 {
    angle + TAU * ((reference - angle) / TAU).round()
}
