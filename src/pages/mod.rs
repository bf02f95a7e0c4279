use sinbound_core::constants::LOADING_SCREEN_SEC;
use sinbound_core::LoadingScene;
use web_sys as web;

use crate::dom;
use crate::frame;
use crate::overlay;
use crate::route::Route;

mod archive;
mod home;
mod player;
mod radio;

pub async fn run(route: Route, document: web::Document) -> anyhow::Result<()> {
    log::info!("[page] {:?}", route);
    if route.shows_loading_screen() {
        show_loading(&document);
    }
    match route {
        Route::Home => home::run(&document),
        Route::Radio => radio::run(&document).await,
        Route::Player => player::run(&document).await,
        Route::Archive => archive::run(&document).await,
    }
}

/// Butterfly veil over the page for the first moments after load.
fn show_loading(document: &web::Document) {
    let canvas = match dom::element_by_id::<web::HtmlCanvasElement>(document, "loading-canvas") {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[page] no loading screen: {:?}", e);
            return;
        }
    };
    overlay::show(document, "loading-overlay");
    let handle = frame::start_loop(&canvas, LoadingScene::new(), None, |_, _| {});
    let doc = document.clone();
    dom::set_timeout((LOADING_SCREEN_SEC * 1000.0) as i32, move || {
        handle.stop();
        overlay::hide(&doc, "loading-overlay");
    });
}
