use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[inline]
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

/// Seconds on the page's monotonic clock, the same timeline as
/// requestAnimationFrame timestamps.
pub fn now_sec() -> f64 {
    instant::now() / 1000.0
}

pub fn query_param(name: &str) -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    web::UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

pub fn pathname() -> String {
    web::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new size in device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(target: &web::EventTarget, event: &'static str, handler: impl FnMut(web::Event) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::error!("add {} listener error: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn on_window(event: &'static str, handler: impl FnMut(web::Event) + 'static) -> Option<Self> {
        let window = web::window()?;
        Some(Self::new(window.as_ref(), event, handler))
    }

    pub fn on_id(
        document: &web::Document,
        id: &str,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let el = document.get_element_by_id(id)?;
        Some(Self::new(el.as_ref(), event, handler))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Drop `value` after the current event handler returns; a closure must not
/// be freed while it is still running.
pub fn drop_later<T: 'static>(value: T) {
    spawn_local(async move {
        drop(value);
    });
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms) {
        log::error!("setTimeout error: {:?}", e);
    }
}

/// Run `f` the first time the page is hidden for navigation.
pub fn on_pagehide(f: impl FnOnce() + 'static) {
    let mut f = Some(f);
    if let Some(listener) = Listener::on_window("pagehide", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    }) {
        std::mem::forget(listener);
    }
}
