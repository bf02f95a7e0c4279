// Key and pointer mapping shared by the pages. Pure so it can be tested on
// the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselKey {
    Left,
    Right,
}

/// Arrow keys step the radio carousel.
#[inline]
pub fn carousel_key(key: &str) -> Option<CarouselKey> {
    match key {
        "ArrowLeft" => Some(CarouselKey::Left),
        "ArrowRight" => Some(CarouselKey::Right),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKey {
    TogglePlay,
    Previous,
    Next,
}

#[inline]
pub fn player_key(code: &str, key: &str) -> Option<PlayerKey> {
    if code == "Space" || key == " " {
        return Some(PlayerKey::TogglePlay);
    }
    match key {
        "ArrowLeft" => Some(PlayerKey::Previous),
        "ArrowRight" => Some(PlayerKey::Next),
        _ => None,
    }
}

/// Pointer position relative to the centre of a `width` x `height` box,
/// each axis in [-1, 1] with +y up.
#[inline]
pub fn pointer_offset(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = -((y / height) * 2.0 - 1.0);
    (nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}

/// Fraction along a horizontal bar for a click at `client_x`.
#[inline]
pub fn seek_fraction(client_x: f64, left: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    ((client_x - left) / width).clamp(0.0, 1.0)
}

/// `m:ss` for the player clock; unknown durations show as `0:00`.
pub fn format_clock(sec: f64) -> String {
    if !sec.is_finite() || sec <= 0.0 {
        return "0:00".to_string();
    }
    let total = sec.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
