// Shared tuning constants for analysis, gestures, playback and the page scenes.
//
// These constants express intended behavior (time windows, thresholds, storage
// keys) and keep magic numbers out of the generators and state machines.
use std::f64::consts::TAU;

// Analyser
pub const ANALYSER_FFT_SIZE: u32 = 256; // yields 128 frequency bins
pub const FREQUENCY_BIN_COUNT: usize = (ANALYSER_FFT_SIZE / 2) as usize;
pub const HOME_ANALYSER_FFT_SIZE: u32 = 32; // coarse level meter for the home loop
pub const BYTE_MAX: f32 = 255.0;

// Derived level bin ranges (half-open)
pub const BASS_BINS: std::ops::Range<usize> = 0..8;
pub const TEMPO_BINS: std::ops::Range<usize> = 32..128;
pub const DRIVE_DIVISOR: f32 = 128.0; // mean / 128, clamped: loud mixes saturate early

// Frame clock
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1;
pub const NOMINAL_FPS: f32 = 60.0;

// Spin gesture
pub const SPIN_MOVEMENT_EPSILON: f64 = 0.01; // radians; smaller deltas are jitter
pub const SPIN_IDLE_TIMEOUT_SEC: f64 = 2.0;
pub const SPIN_CELEBRATION_TURNS: f64 = 1.5;
pub const SPIN_MILESTONE_TURNS: f64 = 3.0;
pub const SPIN_CELEBRATION_ANGLE: f64 = TAU * SPIN_CELEBRATION_TURNS;
pub const SPIN_MILESTONE_ANGLE: f64 = TAU * SPIN_MILESTONE_TURNS;

// Spin overlay timings (seconds)
pub const METALLIC_BANNER_SEC: f64 = 3.0;
pub const CONFETTI_SEC: f64 = 2.0;
pub const SPIN_CURSOR_SEC: f64 = 2.0;
pub const MILESTONE_BANNER_SEC: f64 = 2.0;
pub const SPIN_HINT_SEC: f64 = 3.0;
pub const CONFETTI_PIECES: usize = 48;

// Playback persistence
pub const STORAGE_KEY_IS_PLAYING: &str = "trackplayer_isPlaying";
pub const STORAGE_KEY_CURRENT: &str = "trackplayer_current";

// Radio unlock
pub const RADIO_UNLOCKED_VOLUME: f64 = 0.85;
pub const SFX_VOLUME: f64 = 0.12;

// Carousel
pub const CAROUSEL_AUTO_SPIN_RAD_PER_SEC: f32 = 0.008 * NOMINAL_FPS;
pub const CAROUSEL_RESUME_AFTER_SEC: f64 = 3.0;
pub const CAROUSEL_SPRING_MASS: f32 = 1.0;
pub const CAROUSEL_SPRING_TENSION: f32 = 170.0;
pub const CAROUSEL_SPRING_FRICTION: f32 = 26.0;
pub const CAROUSEL_SCALE_FRICTION: f32 = 18.0;

// Remote assets
pub const ASSET_PREFIX: &str = "https://sinbound.online.s3.amazonaws.com/public";
pub const CATALOG_PATH: &str = "songdatabase.json";
pub const COVER_IMAGE_DIR: &str = "mix-coverimage";
pub const TRACK_AUDIO_DIR: &str = "mix-tracks";
pub const HOME_LOOP_PATH: &str = "tsukihime.mp3";
pub const RADIO_LOOP_PATH: &str = "birkin loop.wav";
pub const RADIO_SFX_PATH: &str = "sfx001.wav";

// Loading screen
pub const LOADING_SCREEN_SEC: f64 = 1.8;
