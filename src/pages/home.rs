use std::cell::RefCell;
use std::rc::Rc;

use sinbound_core::constants::{HOME_ANALYSER_FFT_SIZE, HOME_LOOP_PATH};
use sinbound_core::{asset_url, AnalyzerHandle, HomeScene, HomeStyle, UnlockGate, HOME_UNLOCK};
use web_sys as web;

use crate::dom::{self, Listener};
use crate::events;
use crate::frame;
use crate::media;
use crate::session::PageSession;

const AUDIO_ID: &str = "home-loop";

fn style_from_query() -> HomeStyle {
    match dom::query_param("style").as_deref() {
        Some("halftone") => HomeStyle::Halftone,
        _ => HomeStyle::Neon,
    }
}

fn toggle_label(playing: bool) -> &'static str {
    if playing {
        "pause music"
    } else {
        "play music"
    }
}

pub fn run(document: &web::Document) -> anyhow::Result<()> {
    let canvas: web::HtmlCanvasElement = dom::element_by_id(document, "scene-canvas")?;
    let audio: web::HtmlMediaElement = dom::element_by_id(document, AUDIO_ID)?;
    audio.set_cross_origin(Some("anonymous"));
    audio.set_src(&asset_url(HOME_LOOP_PATH));
    audio.set_loop(true);

    let session = Rc::new(RefCell::new(PageSession::new(HOME_ANALYSER_FFT_SIZE)));
    let handle = frame::start_loop(&canvas, HomeScene::new(style_from_query()), Some(session.clone()), |_, _| {});
    let mut keep: Vec<Listener> = Vec::new();

    // Analyse the loop only while it plays; the visuals idle on silence.
    let analysing: Rc<RefCell<Option<AnalyzerHandle<String>>>> = Rc::new(RefCell::new(None));
    let (session_play, audio_play, doc_play, analysing_play) =
        (session.clone(), audio.clone(), document.clone(), analysing.clone());
    keep.push(Listener::new(audio.as_ref(), "play", move |_| {
        *analysing_play.borrow_mut() = session_play.borrow_mut().attach(&audio_play);
        dom::set_text(&doc_play, "music-toggle", toggle_label(true));
    }));
    let (session_pause, doc_pause) = (session.clone(), document.clone());
    keep.push(Listener::new(audio.as_ref(), "pause", move |_| {
        if let Some(handle) = analysing.borrow_mut().take() {
            session_pause.borrow_mut().detach(handle);
        }
        dom::set_text(&doc_pause, "music-toggle", toggle_label(false));
    }));

    let audio_toggle = audio.clone();
    let session_toggle = session.clone();
    keep.extend(Listener::on_id(document, "music-toggle", "click", move |_| {
        if audio_toggle.paused() {
            session_toggle.borrow().resume();
            media::play_element(&audio_toggle, None);
        } else {
            _ = audio_toggle.pause();
        }
    }));

    let render_hover = handle.render.clone();
    keep.push(Listener::new(canvas.as_ref(), "pointerenter", move |_| {
        render_hover.borrow_mut().scene_mut().set_hovered(true);
    }));
    let render_leave = handle.render.clone();
    keep.push(Listener::new(canvas.as_ref(), "pointerleave", move |_| {
        render_leave.borrow_mut().scene_mut().set_hovered(false);
    }));
    let render_pointer = handle.render.clone();
    keep.extend(events::wire_pointermove(move |p| {
        render_pointer.borrow_mut().set_pointer(p.offset);
    }));

    // Autoplay usually fails on a fresh visit; the first accepted gesture retries.
    media::play_element(&audio, None);
    let (session_unlock, audio_unlock) = (session.clone(), audio.clone());
    events::wire_unlock(UnlockGate::new(HOME_UNLOCK), move || {
        session_unlock.borrow().resume();
        if audio_unlock.paused() {
            media::play_element(&audio_unlock, None);
        }
    });

    let audio_hide = audio.clone();
    dom::on_pagehide(move || {
        handle.stop();
        _ = audio_hide.pause();
        drop(keep);
    });
    log::info!("[home] ready");
    Ok(())
}
