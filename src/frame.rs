use std::cell::RefCell;
use std::rc::Rc;

use sinbound_core::constants::FREQUENCY_BIN_COUNT;
use sinbound_core::visuals::Viewport;
use sinbound_core::{FrameScheduler, FrequencySample, RenderLoop, Scene, Surface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, Listener};
use crate::render::Canvas2dSurface;
use crate::session::PageSession;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame-backed [`FrameScheduler`]. The callback slot is
/// filled by [`start_loop`] before the first `schedule`.
#[derive(Default)]
pub struct RafScheduler {
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = Option<i32>;

    fn schedule(&mut self) -> Option<i32> {
        let window = web::window()?;
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame error: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: Option<i32>) {
        if let (Some(w), Some(id)) = (web::window(), handle) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

pub type CanvasLoop<C> = RenderLoop<Canvas2dSurface, RafScheduler, C>;

/// Shared handle to a running page loop.
pub struct LoopHandle<C: Scene> {
    pub render: Rc<RefCell<CanvasLoop<C>>>,
    // Keeps the resize listener registered while the loop is alive.
    _resize: Option<Listener>,
}

impl<C: Scene> LoopHandle<C> {
    pub fn stop(&self) {
        self.render.borrow_mut().stop();
    }
}

/// Build a loop for `scene` on `canvas` and start it.
///
/// Each frame samples `session` (silence without one), ticks the scene, then
/// hands the loop to `after_frame` for page-specific DOM updates. A canvas
/// without a 2D context leaves the loop idle.
pub fn start_loop<C, A>(
    canvas: &web::HtmlCanvasElement,
    scene: C,
    session: Option<Rc<RefCell<PageSession>>>,
    mut after_frame: A,
) -> LoopHandle<C>
where
    C: Scene + 'static,
    A: FnMut(&mut CanvasLoop<C>, f64) + 'static,
{
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    let scheduler = RafScheduler::new();
    let callback = scheduler.callback.clone();
    let mut surface = Canvas2dSurface::try_new(canvas);
    if let Some(s) = surface.as_mut() {
        s.resize(Viewport::new(w, h));
    }
    let render = Rc::new(RefCell::new(RenderLoop::new(surface, scheduler, scene)));

    let render_tick = render.clone();
    let silence = FrequencySample::silent(FREQUENCY_BIN_COUNT);
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts_ms: f64| {
        let now = ts_ms / 1000.0;
        let mut lp = render_tick.borrow_mut();
        let ran = match &session {
            Some(s) => {
                let mut s = s.borrow_mut();
                lp.tick(now, s.sample())
            }
            None => lp.tick(now, &silence),
        };
        if ran {
            after_frame(&mut *lp, now);
        }
    }) as Box<dyn FnMut(f64)>));

    let canvas_resize = canvas.clone();
    let render_resize = render.clone();
    let resize = Listener::on_window("resize", move |_| {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        render_resize.borrow_mut().resize(Viewport::new(w, h));
    });

    render.borrow_mut().start();
    LoopHandle { render, _resize: resize }
}
