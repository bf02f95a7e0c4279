//! Playback state coordinator.
//!
//! Commands flow out to a [`MediaHost`] (the audio element); element events
//! flow back in through [`PlaybackCoordinator::handle_event`] and correct the
//! state, e.g. after the platform refused to autoplay. The index and playing
//! flag are written to a [`KeyValueStore`] after every change.

use thiserror::Error;

use crate::constants::{STORAGE_KEY_CURRENT, STORAGE_KEY_IS_PLAYING};

/// The controllable side of an audio element.
pub trait MediaHost {
    fn set_source(&mut self, url: &str);
    /// Request playback. The outcome arrives later through
    /// [`PlaybackCoordinator::play_rejected`] or a `Play` event.
    fn play(&mut self);
    fn pause(&mut self);
    fn set_current_time(&mut self, sec: f64);
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;
}

/// Durable string storage (localStorage on the web).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    TimeUpdate { current_time: f64, duration: f64 },
    LoadedMetadata { current_time: f64, duration: f64 },
    LoadedData,
}

/// Why a play request was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayRejection {
    /// Autoplay policy: a user gesture is required first.
    NotAllowed,
    Other(String),
}

impl PlayRejection {
    /// Classify a DOMException name.
    pub fn from_name(name: &str) -> Self {
        if name == "NotAllowedError" {
            PlayRejection::NotAllowed
        } else {
            PlayRejection::Other(name.to_string())
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("track index {index} out of range for {len} tracks")]
    TrackOutOfRange { index: usize, len: usize },
    #[error("playlist is empty")]
    EmptyPlaylist,
}

/// What [`PlaybackCoordinator::toggle`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Playback was blocked; the press became the retry.
    Retried,
    Paused,
    Played,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub current_time: f64,
    /// Zero until the element reports metadata.
    pub duration: f64,
}

impl PlaybackState {
    /// Progress in [0, 1]; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 && self.duration.is_finite() {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

pub struct PlaybackCoordinator<M, S> {
    media: M,
    store: S,
    state: PlaybackState,
    playlist: Vec<String>,
    needs_user_interaction: bool,
}

impl<M: MediaHost, S: KeyValueStore> PlaybackCoordinator<M, S> {
    pub fn new(media: M, store: S) -> Self {
        Self {
            media,
            store,
            state: PlaybackState::default(),
            playlist: Vec::new(),
            needs_user_interaction: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn needs_user_interaction(&self) -> bool {
        self.needs_user_interaction
    }

    pub fn track_count(&self) -> usize {
        self.playlist.len()
    }

    pub fn current_source(&self) -> Option<&str> {
        self.playlist.get(self.state.current_index).map(String::as_str)
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the track list. The index is clamped into the new list.
    pub fn set_playlist(&mut self, sources: Vec<String>) {
        self.playlist = sources;
        let clamped = self.state.current_index.min(self.playlist.len().saturating_sub(1));
        if clamped != self.state.current_index {
            log::debug!("[playback] index clamped {} -> {}", self.state.current_index, clamped);
            self.state.current_index = clamped;
            self.persist();
        }
        self.load_current();
    }

    /// Load persisted state and try to resume. If the platform refuses,
    /// [`Self::needs_user_interaction`] turns on via `play_rejected`.
    pub fn restore(&mut self) {
        let was_playing = self.store.get(STORAGE_KEY_IS_PLAYING).as_deref() == Some("true");
        if let Some(index) = self.store.get(STORAGE_KEY_CURRENT).and_then(|s| s.trim().parse::<usize>().ok()) {
            self.state.current_index = index.min(self.playlist.len().saturating_sub(1));
        }
        log::debug!(
            "[playback] restored index {} playing {}",
            self.state.current_index,
            was_playing
        );
        self.load_current();
        if was_playing && !self.playlist.is_empty() {
            self.state.is_playing = true;
            self.media.play();
        }
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        self.media.play();
        self.set_playing(true);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.set_playing(false);
    }

    /// Pause and rewind to the start.
    pub fn stop(&mut self) {
        self.media.set_current_time(0.0);
        self.media.pause();
        self.state.current_time = 0.0;
        self.set_playing(false);
    }

    /// Seek to `fraction` of the duration, clamped to [0, 1]. No-op (returning
    /// `None`) while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) -> Option<f64> {
        let duration = self.state.duration;
        if !(duration > 0.0 && duration.is_finite()) || fraction.is_nan() {
            return None;
        }
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.media.set_current_time(target);
        self.state.current_time = target;
        Some(target)
    }

    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        self.change_index((self.state.current_index + 1) % len);
    }

    pub fn previous(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        self.change_index((self.state.current_index + len - 1) % len);
    }

    /// Jump to `index` and start playing it.
    pub fn select(&mut self, index: usize) -> Result<(), PlaybackError> {
        let len = self.playlist.len();
        if index >= len {
            return Err(PlaybackError::TrackOutOfRange { index, len });
        }
        self.state.is_playing = true;
        self.change_index(index);
        Ok(())
    }

    /// Correct state from an element event.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play | MediaEvent::Pause | MediaEvent::Ended => {
                let playing = !self.media.is_paused() && !self.media.is_ended();
                self.set_playing(playing);
            }
            MediaEvent::TimeUpdate { current_time, duration }
            | MediaEvent::LoadedMetadata { current_time, duration } => {
                self.state.current_time = current_time;
                self.state.duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
            }
            MediaEvent::LoadedData => {
                if self.state.is_playing && self.media.is_paused() {
                    self.media.play();
                }
            }
        }
    }

    pub fn play_rejected(&mut self, rejection: PlayRejection) {
        match rejection {
            PlayRejection::NotAllowed => {
                log::info!("[playback] autoplay blocked, waiting for a gesture");
                self.needs_user_interaction = true;
            }
            PlayRejection::Other(name) => log::warn!("[playback] play() rejected: {}", name),
        }
    }

    /// A pointer or key gesture arrived. Retries playback when it was blocked.
    /// Returns true when a retry was issued.
    pub fn user_gesture(&mut self) -> bool {
        if !self.needs_user_interaction {
            return false;
        }
        self.needs_user_interaction = false;
        self.media.play();
        true
    }

    /// The play/pause control. While autoplay is blocked the press is the
    /// gesture that retries, so it never pauses the track it just resumed.
    pub fn toggle(&mut self) -> Result<Toggle, PlaybackError> {
        if self.user_gesture() {
            return Ok(Toggle::Retried);
        }
        if self.state.is_playing {
            self.pause();
            Ok(Toggle::Paused)
        } else {
            self.play().map(|()| Toggle::Played)
        }
    }

    fn change_index(&mut self, index: usize) {
        self.state.current_index = index;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.load_current();
        if self.state.is_playing {
            self.media.play();
        }
        self.persist();
    }

    fn load_current(&mut self) {
        if let Some(src) = self.playlist.get(self.state.current_index) {
            self.media.set_source(src);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing != playing {
            self.state.is_playing = playing;
            self.persist();
        }
    }

    fn persist(&mut self) {
        let playing = if self.state.is_playing { "true" } else { "false" };
        self.store.set(STORAGE_KEY_IS_PLAYING, playing);
        self.store.set(STORAGE_KEY_CURRENT, &self.state.current_index.to_string());
    }
}
