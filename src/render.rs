use std::f64::consts::TAU;

use sinbound_core::visuals::{ButterflyPose, Shape, Viewport, VisualEntity};
use sinbound_core::{Backdrop, Rgb, Surface};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D implementation of [`Surface`].
pub struct Canvas2dSurface {
    ctx: web::CanvasRenderingContext2d,
    viewport: Viewport,
}

impl Canvas2dSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            viewport: Viewport::new(canvas.width(), canvas.height()),
            ctx,
        })
    }

    /// `None` (logged) when the canvas has no 2D context.
    pub fn try_new(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        match Self::new(canvas) {
            Ok(s) => Some(s),
            Err(e) => {
                log::error!("canvas surface error: {:?}", e);
                None
            }
        }
    }

    fn circle(&self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        _ = self.ctx.arc(x, y, r.max(0.0), 0.0, TAU);
    }

    fn draw_entity(&self, e: &VisualEntity) {
        let ctx = &self.ctx;
        let (x, y) = (e.position.x as f64, e.position.y as f64);
        let r = e.radius as f64;
        ctx.set_global_alpha(e.opacity as f64);
        match e.shape {
            Shape::Dot => {
                ctx.set_fill_style_str(&e.color.css_rgba(1.0));
                self.circle(x, y, r);
                ctx.fill();
            }
            Shape::Ring { thickness } => {
                ctx.set_stroke_style_str(&e.color.css_rgba(1.0));
                ctx.set_line_width(thickness.max(0.5) as f64);
                self.circle(x, y, r);
                ctx.stroke();
            }
            Shape::Glow { blur } => {
                let css = e.color.css_rgba(1.0);
                ctx.save();
                ctx.set_shadow_color(&css);
                ctx.set_shadow_blur(blur as f64);
                ctx.set_fill_style_str(&css);
                self.circle(x, y, r);
                ctx.fill();
                ctx.restore();
            }
            Shape::Square => {
                ctx.save();
                _ = ctx.translate(x, y);
                _ = ctx.rotate(e.phase as f64);
                ctx.set_fill_style_str(&e.color.css_rgba(1.0));
                ctx.fill_rect(-r, -r, 2.0 * r, 2.0 * r);
                ctx.restore();
            }
            Shape::Butterfly(pose) => self.draw_butterfly(x, y, r, e.color, &pose),
        }
    }

    fn draw_butterfly(&self, x: f64, y: f64, scale: f64, color: Rgb, pose: &ButterflyPose) {
        let ctx = &self.ctx;
        let flutter = pose.flutter as f64;
        let antenna = pose.antenna as f64;
        ctx.save();
        _ = ctx.translate(x, y);
        _ = ctx.scale(scale, scale);

        ctx.save();
        ctx.set_stroke_style_str(&color.css_rgba(0.7));
        ctx.set_line_width(2.5);
        ctx.begin_path();
        ctx.move_to(0.0, -28.0);
        ctx.bezier_curve_to(-10.0, -48.0, -30.0, -60.0, -36.0 + flutter * 4.0, -80.0 - antenna * 6.0);
        ctx.move_to(0.0, -28.0);
        ctx.bezier_curve_to(10.0, -48.0, 30.0, -60.0, 36.0 + antenna * 4.0, -80.0 - flutter * 6.0);
        ctx.set_shadow_color(&color.css_rgba(0.5));
        ctx.set_shadow_blur(8.0);
        ctx.stroke();
        ctx.restore();

        let body = Rgb::new(255, 80, 180);
        ctx.set_shadow_color(&body.css_rgba(0.7));
        ctx.set_shadow_blur(pose.glow_blur as f64);
        ctx.begin_path();
        _ = ctx.ellipse(0.0, 0.0, 8.0, 32.0, 0.0, 0.0, TAU);
        ctx.set_fill_style_str(&body.css_rgba(0.8));
        ctx.fill();

        for side in [-1.0_f64, 1.0] {
            ctx.save();
            _ = ctx.scale(side, 1.0);
            _ = ctx.rotate(pose.wing_angle as f64 * side);
            self.wing(80.0, 60.0, flutter, antenna, &color.css_rgba(0.7));
            self.wing(40.0, 30.0, flutter * 0.5, antenna * 0.5, "rgba(255,180,255,0.25)");
            ctx.set_fill_style_str(&color.css_rgba(0.13));
            self.circle(60.0, 0.0, 30.0);
            ctx.fill();
            ctx.restore();
        }
        ctx.restore();
    }

    // One wing outline reaching `span` px with tips moving by `flutter`.
    fn wing(&self, span: f64, lift: f64, flutter: f64, sway: f64, fill: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.bezier_curve_to(0.0, -span / 8.0, lift, -lift + flutter * 10.0, span + flutter * 10.0, 0.0);
        ctx.bezier_curve_to(lift, lift + sway * 10.0, 0.0, span * 0.375, 0.0, 0.0);
        ctx.close_path();
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }
}

impl Surface for Canvas2dSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn begin_frame(&mut self, backdrop: Backdrop) {
        let ctx = &self.ctx;
        let (w, h) = (self.viewport.width as f64, self.viewport.height as f64);
        ctx.set_global_alpha(1.0);
        ctx.set_shadow_blur(0.0);
        match backdrop {
            Backdrop::Clear => ctx.clear_rect(0.0, 0.0, w, h),
            Backdrop::Fill(color) => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            Backdrop::Veil { color, alpha } => {
                ctx.set_global_alpha(alpha as f64);
                ctx.set_fill_style_str(&color.to_string());
                ctx.fill_rect(0.0, 0.0, w, h);
                ctx.set_global_alpha(1.0);
            }
        }
    }

    fn draw(&mut self, entities: &[VisualEntity]) {
        for e in entities {
            self.draw_entity(e);
        }
        self.ctx.set_global_alpha(1.0);
    }
}
