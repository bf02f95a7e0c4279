use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::Listener;
use crate::keys;

/// One pointer move in CSS pixels, plus its offset from the window centre.
#[derive(Clone, Copy, Debug)]
pub struct PointerSample {
    pub client: Vec2,
    /// Each axis in [-1, 1], +y up.
    pub offset: Vec2,
}

fn window_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

pub fn wire_pointermove(mut handler: impl FnMut(PointerSample) + 'static) -> Option<Listener> {
    Listener::on_window("pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let (w, h) = window_size();
        let (x, y) = keys::pointer_offset(client.x, client.y, w, h);
        handler(PointerSample {
            client,
            offset: Vec2::new(x, y),
        });
    })
}
