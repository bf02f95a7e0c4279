use std::rc::Rc;

use sinbound_core::constants::{RADIO_LOOP_PATH, RADIO_SFX_PATH, RADIO_UNLOCKED_VOLUME, SFX_VOLUME};
use sinbound_core::visuals::Viewport;
use sinbound_core::{asset_url, CarouselLayout, CatalogQuery, RadioScene, Surface, Track, UnlockGate, RADIO_UNLOCK};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom::{self, Listener};
use crate::events;
use crate::fetch;
use crate::frame::{self, CanvasLoop};
use crate::keys::{self, CarouselKey};
use crate::media;

/// CSS width of a `.radio-card` before scaling.
const CARD_CSS_WIDTH: f32 = 160.0;
/// Below this window width the carousel uses the compact layout.
const COMPACT_BELOW_PX: f64 = 700.0;

fn layout_for_window() -> CarouselLayout {
    let width = web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(COMPACT_BELOW_PX);
    if width < COMPACT_BELOW_PX {
        CarouselLayout::COMPACT
    } else {
        CarouselLayout::BIG
    }
}

fn build_card(document: &web::Document, track: &Track) -> anyhow::Result<web::HtmlElement> {
    let err = |e: JsValue| anyhow::anyhow!("{:?}", e);
    let card = document
        .create_element("a")
        .map_err(err)?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    card.set_class_name("radio-card");
    card.set_attribute("href", &track.player_link()).map_err(err)?;
    if let Some(cover) = track.cover_url() {
        let img = document.create_element("img").map_err(err)?;
        img.set_attribute("src", &cover).map_err(err)?;
        img.set_attribute("alt", &track.title).map_err(err)?;
        card.append_child(&img).map_err(err)?;
    }
    let label = document.create_element("span").map_err(err)?;
    label.set_text_content(Some(&track.title));
    card.append_child(&label).map_err(err)?;
    Ok(card)
}

// Place the DOM cards where the scene projects them, back to front.
fn place_cards(render: &CanvasLoop<RadioScene>, cards: &[web::HtmlElement]) {
    let Some(surface) = render.surface() else {
        return;
    };
    let viewport: Viewport = surface.viewport();
    let scene = render.scene();
    let dpr = dom::device_pixel_ratio() as f32;
    for (z, placement) in scene.placements(viewport).iter().enumerate() {
        let Some(card) = cards.get(placement.pose.index) else {
            continue;
        };
        let css_width = 2.0 * scene.card_half_width() * placement.pose.scale * placement.scale / dpr;
        let style = format!(
            "transform: translate(-50%, -50%) translate({:.1}px, {:.1}px) scale({:.3}); z-index: {}; opacity: {}",
            placement.screen.x / dpr,
            placement.screen.y / dpr,
            css_width / CARD_CSS_WIDTH,
            z + 1,
            if placement.pose.back_facing { 0.35 } else { 1.0 },
        );
        _ = card.set_attribute("style", &style);
        _ = card.class_list().toggle_with_force("active", placement.pose.active);
    }
}

fn play_sfx(sfx: &web::HtmlMediaElement) {
    sfx.set_volume(SFX_VOLUME);
    sfx.set_current_time(0.0);
    media::play_element(sfx, None);
}

pub async fn run(document: &web::Document) -> anyhow::Result<()> {
    let canvas: web::HtmlCanvasElement = dom::element_by_id(document, "scene-canvas")?;
    let container: web::Element = dom::element_by_id(document, "carousel")?;
    let audio: web::HtmlMediaElement = dom::element_by_id(document, "radio-loop")?;
    let sfx: web::HtmlMediaElement = dom::element_by_id(document, "radio-sfx")?;
    audio.set_src(&asset_url(RADIO_LOOP_PATH));
    audio.set_loop(true);
    audio.set_muted(true);
    sfx.set_src(&asset_url(RADIO_SFX_PATH));

    let tracks = fetch::fetch_catalog().await.select(&CatalogQuery::All);
    let mut cards = Vec::with_capacity(tracks.len());
    for track in &tracks {
        let card = build_card(document, track)?;
        container.append_child(&card).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        cards.push(card);
    }
    let cards = Rc::new(cards);
    let titles: Vec<String> = tracks.iter().map(|t| t.title.clone()).collect();

    let doc_frame = document.clone();
    let cards_frame = cards.clone();
    let mut shown: Option<usize> = None;
    let handle = frame::start_loop(
        &canvas,
        RadioScene::with_layout(layout_for_window(), tracks.len()),
        None,
        move |render, _now| {
            place_cards(render, &cards_frame);
            let current = render.scene().carousel().current();
            if shown != Some(current) {
                shown = Some(current);
                dom::set_text(&doc_frame, "radio-now", titles.get(current).map(String::as_str).unwrap_or(""));
            }
        },
    );
    let mut keep: Vec<Listener> = Vec::new();

    for (i, card) in cards.iter().enumerate() {
        let render_enter = handle.render.clone();
        keep.push(Listener::new(card.as_ref(), "pointerenter", move |_| {
            render_enter.borrow_mut().scene_mut().carousel_mut().set_hovered(Some(i));
        }));
        let render_leave = handle.render.clone();
        keep.push(Listener::new(card.as_ref(), "pointerleave", move |_| {
            render_leave.borrow_mut().scene_mut().carousel_mut().set_hovered(None);
        }));
    }

    let render_keys = handle.render.clone();
    let sfx_keys = sfx.clone();
    keep.extend(events::wire_keydown(move |ev| {
        let Some(key) = keys::carousel_key(&ev.key()) else {
            return;
        };
        let mut render = render_keys.borrow_mut();
        let scene = render.scene_mut();
        let now = scene.now_sec();
        let moved = match key {
            CarouselKey::Left => scene.carousel_mut().step_left(now),
            CarouselKey::Right => scene.carousel_mut().step_right(now),
        };
        if moved {
            play_sfx(&sfx_keys);
        }
    }));

    let render_pointer = handle.render.clone();
    keep.extend(events::wire_pointermove(move |p| {
        render_pointer.borrow_mut().set_pointer(p.offset);
    }));

    let audio_unlock = audio.clone();
    events::wire_unlock(UnlockGate::new(RADIO_UNLOCK), move || {
        audio_unlock.set_muted(false);
        audio_unlock.set_volume(RADIO_UNLOCKED_VOLUME);
        media::play_element(&audio_unlock, None);
    });

    let audio_hide = audio.clone();
    dom::on_pagehide(move || {
        handle.stop();
        _ = audio_hide.pause();
        drop(keep);
    });
    log::info!("[radio] {} cards", tracks.len());
    Ok(())
}
