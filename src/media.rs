use std::cell::RefCell;
use std::rc::Rc;

use sinbound_core::{MediaEvent, MediaHost, PlayRejection};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type RejectionQueue = Rc<RefCell<Vec<PlayRejection>>>;

/// [`MediaHost`] over an `<audio>` element. Rejected `play()` promises land
/// in a queue the page drains into the coordinator.
pub struct HtmlAudioHost {
    element: web::HtmlMediaElement,
    rejections: RejectionQueue,
}

impl HtmlAudioHost {
    pub fn new(element: web::HtmlMediaElement) -> Self {
        Self {
            element,
            rejections: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn element(&self) -> &web::HtmlMediaElement {
        &self.element
    }

    pub fn rejections(&self) -> RejectionQueue {
        self.rejections.clone()
    }
}

impl MediaHost for HtmlAudioHost {
    fn set_source(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn play(&mut self) {
        play_element(&self.element, Some(self.rejections.clone()));
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            log::warn!("[media] pause failed: {:?}", e);
        }
    }

    fn set_current_time(&mut self, sec: f64) {
        self.element.set_current_time(sec);
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn is_ended(&self) -> bool {
        self.element.ended()
    }
}

/// Start playback, classifying a rejected promise into `rejections` (or
/// logging it when there is no queue).
pub fn play_element(element: &web::HtmlMediaElement, rejections: Option<RejectionQueue>) {
    let promise = match element.play() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[media] play failed: {:?}", e);
            return;
        }
    };
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            let name = e
                .dyn_ref::<web::DomException>()
                .map(|d| d.name())
                .unwrap_or_default();
            let rejection = PlayRejection::from_name(&name);
            match (&rejection, rejections) {
                (_, Some(queue)) => queue.borrow_mut().push(rejection),
                (PlayRejection::NotAllowed, None) => log::info!("[media] autoplay blocked, waiting for a gesture"),
                (PlayRejection::Other(name), None) => log::warn!("[media] play rejected: {}", name),
            }
        }
    });
}

/// Media element event names mapped to [`MediaEvent`]s.
pub const MEDIA_EVENTS: [&str; 6] = ["play", "pause", "ended", "timeupdate", "loadedmetadata", "loadeddata"];

pub fn media_event(name: &str, element: &web::HtmlMediaElement) -> Option<MediaEvent> {
    let current_time = element.current_time();
    let duration = element.duration();
    let duration = if duration.is_finite() { duration } else { 0.0 };
    match name {
        "play" => Some(MediaEvent::Play),
        "pause" => Some(MediaEvent::Pause),
        "ended" => Some(MediaEvent::Ended),
        "timeupdate" => Some(MediaEvent::TimeUpdate { current_time, duration }),
        "loadedmetadata" => Some(MediaEvent::LoadedMetadata { current_time, duration }),
        "loadeddata" => Some(MediaEvent::LoadedData),
        _ => None,
    }
}
