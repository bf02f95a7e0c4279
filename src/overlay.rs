use sinbound_core::{Side, SpinOverlay};
use web_sys as web;

use crate::dom;

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for pages without the stylesheet
        _ = el.remove_attribute("hidden");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("hidden", "");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(el) => el.class_list().contains("hidden") || el.has_attribute("hidden"),
        None => true,
    }
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    // Avoid touching the DOM every frame when nothing changed.
    if visible == is_hidden(document, id) {
        if visible {
            show(document, id);
        } else {
            hide(document, id);
        }
    }
}

/// Mirror the spin effects onto the player page's overlay elements.
pub fn apply_spin(document: &web::Document, overlay: &SpinOverlay, now_sec: f64) {
    set_visible(document, "metallic-banner", overlay.metallic_visible(now_sec));
    let banner = overlay.banner(now_sec);
    set_visible(document, "milestone-left", banner == Some(Side::Left));
    set_visible(document, "milestone-right", banner == Some(Side::Right));

    match overlay.hint_mask(now_sec) {
        Some(reveal) => {
            show(document, "spin-hint");
            if let Some(el) = document.get_element_by_id("spin-hint") {
                let pct = (reveal * 100.0).clamp(0.0, 100.0);
                _ = el.set_attribute("style", &format!("clip-path: inset(0 {:.1}% 0 0)", 100.0 - pct));
            }
        }
        None => hide(document, "spin-hint"),
    }

    if let Some(body) = document.body() {
        let classes = body.class_list();
        let spinning = overlay.spin_cursor(now_sec);
        if spinning != classes.contains("spin-cursor") {
            _ = classes.toggle_with_force("spin-cursor", spinning);
        }
    }
}

/// The "tap to play" prompt shown while autoplay is blocked.
pub fn set_interaction_prompt(document: &web::Document, needed: bool) {
    set_visible(document, "interaction-prompt", needed);
}

pub fn set_progress(document: &web::Document, fraction: f64, current: &str, total: &str) {
    if let Some(el) = document.get_element_by_id("player-progress-fill") {
        _ = el.set_attribute("style", &format!("width: {:.2}%", fraction.clamp(0.0, 1.0) * 100.0));
    }
    dom::set_text(document, "player-time", &format!("{} / {}", current, total));
}
