use std::cell::RefCell;
use std::rc::Rc;

use sinbound_core::{UnlockGate, UserGesture};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, Listener};

pub fn wire_keydown(mut handler: impl FnMut(&web::KeyboardEvent) + 'static) -> Option<Listener> {
    Listener::on_window("keydown", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
            handler(ev);
        }
    })
}

/// Listen for the first gesture `gate` accepts, run `on_unlock` once, then
/// remove both listeners.
pub fn wire_unlock(gate: UnlockGate, on_unlock: impl FnOnce() + 'static) {
    wire_unlock_except(gate, &[], on_unlock);
}

// True when the event target sits inside one of the elements named by id.
fn within_any(ev: &web::Event, ids: &[&str]) -> bool {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
        return false;
    };
    ids.iter().any(|id| matches!(el.closest(&format!("#{}", id)), Ok(Some(_))))
}

/// Like [`wire_unlock`], but pointer presses on the `exempt` elements are
/// left to their own handlers and do not count as the unlock gesture.
pub fn wire_unlock_except(gate: UnlockGate, exempt: &'static [&'static str], on_unlock: impl FnOnce() + 'static) {
    let gate = Rc::new(RefCell::new(gate));
    let listeners: Rc<RefCell<Vec<Listener>>> = Rc::new(RefCell::new(Vec::new()));
    let pending: RefCell<Option<Box<dyn FnOnce()>>> = RefCell::new(Some(Box::new(on_unlock)));

    let fire = {
        let listeners = listeners.clone();
        Rc::new(move || {
            if let Some(f) = pending.borrow_mut().take() {
                f();
            }
            dom::drop_later(std::mem::take(&mut *listeners.borrow_mut()));
        })
    };

    let (gate_pointer, fire_pointer) = (gate.clone(), fire.clone());
    let pointer = Listener::on_window("pointerdown", move |ev| {
        if within_any(&ev, exempt) {
            return;
        }
        if gate_pointer.borrow_mut().offer(UserGesture::PointerDown) {
            fire_pointer();
        }
    });
    let key = Listener::on_window("keydown", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        let (code, key) = (ev.code(), ev.key());
        if gate.borrow_mut().offer(UserGesture::Key { code: &code, key: &key }) {
            fire();
        }
    });
    listeners.borrow_mut().extend(pointer.into_iter().chain(key));
}
