//! Per-surface render loop: Idle -> Running -> Stopped.
//!
//! The loop owns a [`SimClock`] and a [`Scene`]; the platform supplies the
//! drawing [`Surface`] and a [`FrameScheduler`] (requestAnimationFrame on
//! the web, a counter in tests). Each tick advances the scene, draws it and
//! schedules the next tick.

use glam::Vec2;

use crate::analysis::FrequencySample;
use crate::clock::{FrameTime, SimClock};
use crate::color::Rgb;
use crate::scenes::Scene;
use crate::visuals::{FrameInput, Viewport, VisualEntity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// Terminal.
    Stopped,
}

/// How a surface prepares for a new frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    Clear,
    Fill(Rgb),
    /// Blend a translucent layer over the previous frame (motion trails).
    Veil { color: Rgb, alpha: f32 },
}

pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport);
    fn begin_frame(&mut self, backdrop: Backdrop);
    /// Draw screen-space entities in order.
    fn draw(&mut self, entities: &[VisualEntity]);
}

pub trait FrameScheduler {
    type Handle;
    fn schedule(&mut self) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct RenderLoop<S, F: FrameScheduler, C> {
    state: LoopState,
    surface: Option<S>,
    scheduler: F,
    scene: C,
    clock: SimClock,
    pending: Option<F::Handle>,
    entities: Vec<VisualEntity>,
    pointer: Vec2,
    frames: u64,
}

impl<S, F, C> RenderLoop<S, F, C>
where
    S: Surface,
    F: FrameScheduler,
    C: Scene,
{
    /// `surface` is `None` when the platform could not provide one.
    pub fn new(surface: Option<S>, scheduler: F, scene: C) -> Self {
        Self {
            state: LoopState::Idle,
            surface,
            scheduler,
            scene,
            clock: SimClock::new(),
            pending: None,
            entities: Vec::new(),
            pointer: Vec2::ZERO,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn scene(&self) -> &C {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut C {
        &mut self.scene
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Entities drawn by the last tick.
    pub fn last_entities(&self) -> &[VisualEntity] {
        &self.entities
    }

    /// Pointer offset from the centre, each axis in [-1, 1].
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Idle -> Running. A missing surface leaves the loop Idle.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        if self.surface.is_none() {
            log::warn!("[loop] {}: no drawing surface, not starting", self.scene.name());
            return;
        }
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.schedule());
        log::debug!("[loop] {} running", self.scene.name());
    }

    /// Run one frame at host time `host_sec`. Returns false when not running.
    pub fn tick(&mut self, host_sec: f64, sample: &FrequencySample) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.pending = None;
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let time: FrameTime = self.clock.advance_to(host_sec);
        let input = FrameInput::new(time, sample, surface.viewport()).with_pointer(self.pointer);
        self.scene.advance(&input);
        self.entities.clear();
        self.scene.render(&input, &mut self.entities);
        surface.begin_frame(self.scene.backdrop());
        surface.draw(&self.entities);
        self.frames += 1;
        self.pending = Some(self.scheduler.schedule());
        true
    }

    /// Any state -> Stopped. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.state = LoopState::Stopped;
        log::debug!("[loop] {} stopped after {} frames", self.scene.name(), self.frames);
    }

    /// New pixel size; animation time carries on untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
    }

    /// Drop the host-time anchor, e.g. when the tab becomes visible again.
    pub fn rebase_clock(&mut self) {
        self.clock.rebase();
    }
}
