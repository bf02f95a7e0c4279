//! Confetti burst played while the spin celebration is live.

use rand::prelude::*;

use glam::Vec3;

use super::{FrameInput, Shape, Visual, VisualEntity};
use crate::color::{Rgb, CONFETTI_PALETTE};
use crate::constants::{CONFETTI_PIECES, CONFETTI_SEC};

/// One piece, laid out in viewport fractions so resizes keep the burst intact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub left: f32,
    pub top: f32,
    /// Radians.
    pub rotation: f32,
    /// Side length in pixels.
    pub size: f32,
    pub color: Rgb,
}

pub struct ConfettiShower {
    pieces: Vec<ConfettiPiece>,
    started_at: Option<f64>,
    duration_sec: f64,
    rng: StdRng,
}

impl ConfettiShower {
    pub fn new(seed: u64) -> Self {
        Self {
            pieces: Vec::with_capacity(CONFETTI_PIECES),
            started_at: None,
            duration_sec: CONFETTI_SEC,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a fresh burst at `now_sec`, replacing any burst in flight.
    pub fn burst(&mut self, now_sec: f64) {
        self.pieces.clear();
        for i in 0..CONFETTI_PIECES {
            let piece = ConfettiPiece {
                left: self.rng.gen_range(0.0..1.0),
                top: self.rng.gen_range(0.0..1.0),
                rotation: self.rng.gen_range(0.0..std::f32::consts::TAU),
                size: self.rng.gen_range(16.0..34.0),
                color: CONFETTI_PALETTE[i % CONFETTI_PALETTE.len()],
            };
            self.pieces.push(piece);
        }
        self.started_at = Some(now_sec);
    }

    /// Burst progress in [0, 1), or `None` when nothing is falling.
    pub fn progress(&self, now_sec: f64) -> Option<f32> {
        let start = self.started_at?;
        let p = (now_sec - start) / self.duration_sec;
        (0.0..1.0).contains(&p).then_some(p as f32)
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }
}

impl Visual for ConfettiShower {
    fn name(&self) -> &'static str {
        "confetti"
    }

    fn advance(&mut self, input: &FrameInput<'_>) {
        if self.started_at.is_some() && self.progress(input.time.elapsed_sec).is_none() {
            self.started_at = None;
            self.pieces.clear();
        }
    }

    fn generate(&self, input: &FrameInput<'_>, out: &mut Vec<VisualEntity>) {
        let Some(p) = self.progress(input.time.elapsed_sec) else {
            return;
        };
        let w = input.viewport.width as f32;
        let h = input.viewport.height as f32;
        // Falls from 40px above its slot to a full viewport height below it.
        let drop = -40.0 + p * (h + 40.0);
        let opacity = 0.85 * (1.0 - p);
        for piece in &self.pieces {
            out.push(
                VisualEntity::dot(
                    Vec3::new(piece.left * w, piece.top * h + drop, 0.0),
                    piece.size * 0.5,
                    piece.color,
                    opacity,
                )
                .with_shape(Shape::Square)
                .with_phase(piece.rotation),
            );
        }
    }
}
