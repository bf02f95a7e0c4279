use sinbound_core::{CatalogQuery, Track};
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::dom::{self, Listener};
use crate::fetch;
use crate::media;
use crate::overlay;

fn build_row(document: &web::Document, track: &Track) -> Result<(web::Element, web::Element), JsValue> {
    let row = document.create_element("li")?;
    row.set_class_name("archive-row");
    let title = document.create_element("span")?;
    title.set_text_content(Some(&track.title));
    row.append_child(&title)?;

    let play = document.create_element("button")?;
    play.set_class_name("archive-play");
    play.set_text_content(Some("\u{25b6}"));
    row.append_child(&play)?;

    let download = document.create_element("a")?;
    download.set_attribute("href", &track.track_url())?;
    download.set_attribute("download", "")?;
    download.set_text_content(Some("download"));
    row.append_child(&download)?;
    Ok((row, play))
}

pub async fn run(document: &web::Document) -> anyhow::Result<()> {
    let list: web::Element = dom::element_by_id(document, "archive-list")?;
    let audio: web::HtmlMediaElement = dom::element_by_id(document, "archive-audio")?;

    // The archive filters by `mix` only.
    let query = CatalogQuery::from_params(dom::query_param("mix").as_deref(), None);
    let tracks = fetch::fetch_catalog().await.select(&query);

    let mut keep: Vec<Listener> = Vec::new();
    for track in &tracks {
        let (row, play) = build_row(document, track).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        list.append_child(&row).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let (url, audio_play, doc_play) = (track.track_url(), audio.clone(), document.clone());
        keep.push(Listener::new(play.as_ref(), "click", move |_| {
            audio_play.set_src(&url);
            overlay::show(&doc_play, "archive-audio");
            media::play_element(&audio_play, None);
        }));
    }
    if tracks.is_empty() {
        dom::set_text(document, "archive-empty", "no tracks found");
    }
    log::info!("[archive] {} tracks", tracks.len());

    dom::on_pagehide(move || {
        _ = audio.pause();
        drop(keep);
    });
    Ok(())
}
