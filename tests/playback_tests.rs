// Host-side tests for the playback coordinator, using a scripted media host
// and an in-memory store.

use std::collections::HashMap;

use sinbound_core::{
    KeyValueStore, MediaEvent, MediaHost, PlayRejection, PlaybackCoordinator, PlaybackError, Toggle,
};

#[derive(Default)]
struct FakeMedia {
    source: Option<String>,
    paused: bool,
    ended: bool,
    current_time: f64,
    play_calls: u32,
}

impl MediaHost for FakeMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn play(&mut self) {
        self.play_calls += 1;
        self.paused = false;
        self.ended = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_current_time(&mut self, sec: f64) {
        self.current_time = sec;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        self.ended
    }
}

#[derive(Default)]
struct MemoryStore(HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

type Coordinator = PlaybackCoordinator<FakeMedia, MemoryStore>;

fn tracks(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("track-{}.mp3", i)).collect()
}

fn coordinator(n: usize) -> Coordinator {
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), MemoryStore::default());
    c.set_playlist(tracks(n));
    c
}

fn stored(c: &Coordinator, key: &str) -> Option<String> {
    c.store().get(key)
}

#[test]
fn seek_uses_the_reported_duration() {
    let mut c = coordinator(3);
    assert_eq!(c.seek(0.5), None);

    c.handle_event(MediaEvent::LoadedMetadata { current_time: 0.0, duration: 120.0 });
    assert_eq!(c.seek(0.5), Some(60.0));
    assert_eq!(c.media().current_time, 60.0);
    assert_eq!(c.seek(2.0), Some(120.0));
    assert_eq!(c.seek(-1.0), Some(0.0));
    assert_eq!(c.seek(f64::NAN), None);
}

#[test]
fn infinite_duration_is_treated_as_unknown() {
    let mut c = coordinator(1);
    c.handle_event(MediaEvent::TimeUpdate { current_time: 5.0, duration: f64::INFINITY });
    assert_eq!(c.state().duration, 0.0);
    assert_eq!(c.state().progress(), 0.0);
    assert_eq!(c.seek(0.3), None);
}

#[test]
fn next_and_previous_wrap_around() {
    let mut c = coordinator(4);
    c.select(2).expect("select");
    c.next();
    assert_eq!(c.state().current_index, 3);
    c.next();
    assert_eq!(c.state().current_index, 0);
    c.previous();
    assert_eq!(c.state().current_index, 3);
    assert_eq!(c.current_source(), Some("track-3.mp3"));
    assert_eq!(c.media().source.as_deref(), Some("track-3.mp3"));
}

#[test]
fn wrap_holds_for_any_start_index() {
    for n in 1..6 {
        for start in 0..n {
            let mut c = coordinator(n);
            c.select(start).expect("select");
            c.next();
            assert_eq!(c.state().current_index, (start + 1) % n);
            c.previous();
            c.previous();
            assert_eq!(c.state().current_index, (start + n - 1) % n);
        }
    }
}

#[test]
fn select_rejects_out_of_range() {
    let mut c = coordinator(2);
    assert_eq!(c.select(2), Err(PlaybackError::TrackOutOfRange { index: 2, len: 2 }));
    assert_eq!(c.state().current_index, 0);
}

#[test]
fn empty_playlist_is_inert() {
    let mut c = coordinator(0);
    assert_eq!(c.track_count(), 0);
    assert_eq!(c.play(), Err(PlaybackError::EmptyPlaylist));
    c.next();
    c.previous();
    assert_eq!(c.state().current_index, 0);
    assert_eq!(c.current_source(), None);
}

#[test]
fn state_is_persisted_after_changes() {
    let mut c = coordinator(5);
    c.select(3).expect("select");
    assert_eq!(stored(&c, "trackplayer_current").as_deref(), Some("3"));
    assert_eq!(stored(&c, "trackplayer_isPlaying").as_deref(), Some("true"));
    c.pause();
    assert_eq!(stored(&c, "trackplayer_isPlaying").as_deref(), Some("false"));
}

#[test]
fn restore_resumes_persisted_track() {
    let mut store = MemoryStore::default();
    store.set("trackplayer_current", "2");
    store.set("trackplayer_isPlaying", "true");
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), store);
    c.set_playlist(tracks(4));
    c.restore();
    assert_eq!(c.state().current_index, 2);
    assert!(c.state().is_playing);
    assert_eq!(c.media().source.as_deref(), Some("track-2.mp3"));
    assert_eq!(c.media().play_calls, 1);
}

#[test]
fn restore_clamps_stale_index_and_ignores_garbage() {
    let mut store = MemoryStore::default();
    store.set("trackplayer_current", "9");
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), store);
    c.set_playlist(tracks(3));
    c.restore();
    assert_eq!(c.state().current_index, 2);
    assert!(!c.state().is_playing);

    let mut store = MemoryStore::default();
    store.set("trackplayer_current", "not a number");
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), store);
    c.set_playlist(tracks(3));
    c.restore();
    assert_eq!(c.state().current_index, 0);
}

#[test]
fn blocked_autoplay_waits_for_a_gesture() {
    let mut store = MemoryStore::default();
    store.set("trackplayer_isPlaying", "true");
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), store);
    c.set_playlist(tracks(2));
    c.restore();

    // the element refused and reports itself paused
    c.media_mut().paused = true;
    c.play_rejected(PlayRejection::from_name("NotAllowedError"));
    c.handle_event(MediaEvent::Pause);
    assert!(c.needs_user_interaction());
    assert!(!c.state().is_playing);

    assert!(c.user_gesture());
    assert!(!c.needs_user_interaction());
    assert_eq!(c.media().play_calls, 2);
    c.handle_event(MediaEvent::Play);
    assert!(c.state().is_playing);

    // later gestures are no-ops
    assert!(!c.user_gesture());
}

fn blocked_after_restore() -> Coordinator {
    let mut store = MemoryStore::default();
    store.set("trackplayer_isPlaying", "true");
    let mut c = PlaybackCoordinator::new(FakeMedia::default(), store);
    c.set_playlist(tracks(2));
    c.restore();
    c.media_mut().paused = true;
    c.play_rejected(PlayRejection::NotAllowed);
    c
}

#[test]
fn toggle_while_blocked_retries_instead_of_pausing() {
    let mut c = blocked_after_restore();
    // restore already counted as playing; the element never started
    assert!(c.state().is_playing);

    assert_eq!(c.toggle(), Ok(Toggle::Retried));
    assert!(!c.needs_user_interaction());
    assert_eq!(c.media().play_calls, 2);
    assert!(!c.media().paused);
    c.handle_event(MediaEvent::Play);
    assert!(c.state().is_playing);

    // the next press is an ordinary pause
    assert_eq!(c.toggle(), Ok(Toggle::Paused));
    assert!(c.media().paused);
    assert!(!c.state().is_playing);
    assert_eq!(c.toggle(), Ok(Toggle::Played));
    assert_eq!(c.media().play_calls, 3);
}

#[test]
fn toggle_while_blocked_and_reported_paused_still_only_retries() {
    let mut c = blocked_after_restore();
    c.handle_event(MediaEvent::Pause);
    assert!(!c.state().is_playing);
    assert_eq!(c.toggle(), Ok(Toggle::Retried));
    assert_eq!(c.media().play_calls, 2);
    assert!(!c.state().is_playing);
    c.handle_event(MediaEvent::Play);
    assert!(c.state().is_playing);
}

#[test]
fn toggle_on_an_empty_playlist_reports_the_error() {
    let mut c = coordinator(0);
    assert_eq!(c.toggle(), Err(PlaybackError::EmptyPlaylist));
}

#[test]
fn other_rejections_do_not_prompt() {
    let mut c = coordinator(1);
    c.play_rejected(PlayRejection::from_name("AbortError"));
    assert!(!c.needs_user_interaction());
    assert_eq!(PlayRejection::from_name("AbortError"), PlayRejection::Other("AbortError".into()));
}

#[test]
fn ended_event_clears_playing() {
    let mut c = coordinator(2);
    c.play().expect("play");
    c.media_mut().ended = true;
    c.handle_event(MediaEvent::Ended);
    assert!(!c.state().is_playing);
}

#[test]
fn stop_rewinds_and_pauses() {
    let mut c = coordinator(2);
    c.handle_event(MediaEvent::LoadedMetadata { current_time: 0.0, duration: 100.0 });
    c.play().expect("play");
    c.seek(0.4);
    c.stop();
    assert_eq!(c.state().current_time, 0.0);
    assert_eq!(c.media().current_time, 0.0);
    assert!(c.media().paused);
    assert!(!c.state().is_playing);
}

#[test]
fn loaded_data_resumes_when_meant_to_play() {
    let mut c = coordinator(2);
    c.play().expect("play");
    c.media_mut().paused = true;
    c.handle_event(MediaEvent::LoadedData);
    assert_eq!(c.media().play_calls, 2);
    assert!(!c.media().paused);
}
