use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use sinbound_core::constants::ANALYSER_FFT_SIZE;
use sinbound_core::{
    viewport_center, CatalogQuery, MediaEvent, PlaybackCoordinator, PlayerScene, SpinDetector, SpinOverlay, Toggle,
    Track, UnlockGate, PLAYER_UNLOCK,
};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, Listener};
use crate::events;
use crate::fetch;
use crate::frame;
use crate::keys::{self, PlayerKey};
use crate::media::{self, HtmlAudioHost};
use crate::overlay;
use crate::session::PageSession;
use crate::storage::LocalStorage;

const AUDIO_ID: &str = "player-audio";
const TOGGLE_ID: &str = "player-toggle";

type Coordinator = Rc<RefCell<PlaybackCoordinator<HtmlAudioHost, LocalStorage>>>;

fn show_track(document: &web::Document, track: Option<&Track>) {
    let (title, artist) = track.map(|t| (t.title.as_str(), t.artist.as_str())).unwrap_or(("no track", ""));
    dom::set_text(document, "player-title", title);
    dom::set_text(document, "player-artist", artist);
    if let Some(img) = document.get_element_by_id("player-cover") {
        match track.and_then(Track::cover_url) {
            Some(url) => {
                _ = img.set_attribute("src", &url);
            }
            None => {
                _ = img.remove_attribute("src");
            }
        }
    }
}

fn spin_center() -> Vec2 {
    let w = web::window();
    let width = w.as_ref().and_then(|w| w.inner_width().ok()).and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.as_ref().and_then(|w| w.inner_height().ok()).and_then(|v| v.as_f64()).unwrap_or(0.0);
    viewport_center(width as f32, height as f32)
}

fn toggle(coordinator: &Coordinator, session: &Rc<RefCell<PageSession>>) {
    session.borrow().resume();
    match coordinator.borrow_mut().toggle() {
        Ok(Toggle::Retried) => log::info!("[player] playback retried from the toggle"),
        Ok(_) => {}
        Err(e) => log::warn!("[player] {}", e),
    }
}

fn wire_buttons(
    document: &web::Document,
    coordinator: &Coordinator,
    session: &Rc<RefCell<PageSession>>,
    keep: &mut Vec<Listener>,
) {
    let c = coordinator.clone();
    keep.extend(Listener::on_id(document, "player-prev", "click", move |_| c.borrow_mut().previous()));
    let c = coordinator.clone();
    keep.extend(Listener::on_id(document, "player-next", "click", move |_| c.borrow_mut().next()));
    let (c, s) = (coordinator.clone(), session.clone());
    keep.extend(Listener::on_id(document, TOGGLE_ID, "click", move |_| toggle(&c, &s)));

    let c = coordinator.clone();
    keep.extend(Listener::on_id(document, "player-progress", "click", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let Some(bar) = ev.current_target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let rect = bar.get_bounding_client_rect();
        let fraction = keys::seek_fraction(ev.client_x() as f64, rect.left(), rect.width());
        if c.borrow_mut().seek(fraction).is_none() {
            log::debug!("[player] seek ignored, duration unknown");
        }
    }));

    let (c, s) = (coordinator.clone(), session.clone());
    keep.extend(events::wire_keydown(move |ev| {
        let Some(action) = keys::player_key(&ev.code(), &ev.key()) else {
            return;
        };
        ev.prevent_default();
        match action {
            PlayerKey::TogglePlay => toggle(&c, &s),
            PlayerKey::Previous => c.borrow_mut().previous(),
            PlayerKey::Next => c.borrow_mut().next(),
        }
    }));
}

pub async fn run(document: &web::Document) -> anyhow::Result<()> {
    let canvas: web::HtmlCanvasElement = dom::element_by_id(document, "scene-canvas")?;
    let audio: web::HtmlMediaElement = dom::element_by_id(document, AUDIO_ID)?;
    audio.set_cross_origin(Some("anonymous"));

    let query = CatalogQuery::from_params(dom::query_param("mix").as_deref(), dom::query_param("track").as_deref());
    let tracks = fetch::fetch_catalog().await.select(&query);
    log::info!("[player] {:?} -> {} tracks", query, tracks.len());

    let host = HtmlAudioHost::new(audio.clone());
    let rejections = host.rejections();
    let coordinator: Coordinator = Rc::new(RefCell::new(PlaybackCoordinator::new(host, LocalStorage::open())));
    {
        let mut c = coordinator.borrow_mut();
        c.set_playlist(tracks.iter().map(Track::track_url).collect());
        c.restore();
    }

    let session = Rc::new(RefCell::new(PageSession::new(ANALYSER_FFT_SIZE)));
    let spin = Rc::new(RefCell::new((SpinDetector::new(), SpinOverlay::new())));
    spin.borrow_mut().1.show_hint(dom::now_sec());

    let doc_frame = document.clone();
    let (coordinator_frame, spin_frame) = (coordinator.clone(), spin.clone());
    let mut shown: Option<usize> = None;
    let handle = frame::start_loop(&canvas, PlayerScene::new(), Some(session.clone()), move |_render, now| {
        let mut c = coordinator_frame.borrow_mut();
        for rejection in rejections.borrow_mut().drain(..) {
            c.play_rejected(rejection);
        }
        let state = c.state();
        if shown != Some(state.current_index) {
            shown = Some(state.current_index);
            show_track(&doc_frame, tracks.get(state.current_index));
        }
        overlay::set_progress(
            &doc_frame,
            state.progress(),
            &keys::format_clock(state.current_time),
            &keys::format_clock(state.duration),
        );
        overlay::set_interaction_prompt(&doc_frame, c.needs_user_interaction());
        dom::set_text(&doc_frame, "player-toggle", if state.is_playing { "pause" } else { "play" });

        let mut spin = spin_frame.borrow_mut();
        spin.0.poll(now);
        overlay::apply_spin(&doc_frame, &spin.1, now);
    });
    let mut keep: Vec<Listener> = Vec::new();

    for name in media::MEDIA_EVENTS {
        let (c, render, session, element) = (
            coordinator.clone(),
            handle.render.clone(),
            session.clone(),
            audio.clone(),
        );
        keep.push(Listener::new(audio.as_ref(), name, move |_| {
            let Some(event) = media::media_event(name, &element) else {
                return;
            };
            c.borrow_mut().handle_event(event);
            match event {
                MediaEvent::Play => {
                    _ = session.borrow_mut().attach(&element);
                    render.borrow_mut().scene_mut().set_playing(true);
                }
                MediaEvent::Pause => render.borrow_mut().scene_mut().set_playing(false),
                MediaEvent::Ended => render.borrow_mut().scene_mut().track_ended(),
                _ => {}
            }
        }));
    }

    wire_buttons(document, &coordinator, &session, &mut keep);

    let (render_pointer, spin_pointer) = (handle.render.clone(), spin.clone());
    keep.extend(events::wire_pointermove(move |p| {
        let now = dom::now_sec();
        let mut render = render_pointer.borrow_mut();
        render.set_pointer(p.offset);
        let mut spin = spin_pointer.borrow_mut();
        let events = spin.0.pointer_moved(p.client, spin_center(), now);
        if events.is_empty() {
            return;
        }
        spin.1.apply(events, now);
        if events.celebration {
            render.scene_mut().celebrate();
        }
    }));

    // The toggle button retries on its own click; counting its pointerdown here
    // too would retry first and let the click pause the resumed track.
    let (c, session_unlock) = (coordinator.clone(), session.clone());
    events::wire_unlock_except(UnlockGate::new(PLAYER_UNLOCK), &[TOGGLE_ID], move || {
        session_unlock.borrow().resume();
        if c.borrow_mut().user_gesture() {
            log::info!("[player] playback retried after gesture");
        }
    });

    dom::on_pagehide(move || {
        handle.stop();
        drop(keep);
    });
    Ok(())
}
