use std::fmt;

/// 8-bit RGB colour as used by the canvas surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation with `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// HSL to RGB; `h` in degrees (wrapped), `s` and `l` in [0, 1].
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Rgb {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }
        let h = h.rem_euclid(360.0) / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f32| (hue_to_channel(p, q, t) * 255.0).round() as u8;
        Rgb::new(
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
        )
    }

    /// CSS `rgba(...)` string with the given alpha.
    pub fn css_rgba(&self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Interpolate across a palette whose last entry closes the loop.
///
/// `t` is wrapped into [0, 1); t = 0 yields the first colour.
pub fn lerp_palette(palette: &[Rgb], t: f32) -> Rgb {
    match palette.len() {
        0 => Rgb::BLACK,
        1 => palette[0],
        n => {
            let scaled = t.rem_euclid(1.0) * (n - 1) as f32;
            let i = scaled.floor() as usize;
            let frac = scaled - i as f32;
            palette[i % n].lerp(palette[(i + 1) % n], frac)
        }
    }
}

/// Cycle through a palette where every entry is a segment start (wraps to index 0).
pub fn cycle_palette(palette: &[Rgb], t: f32) -> Rgb {
    match palette.len() {
        0 => Rgb::BLACK,
        n => {
            let scaled = t.rem_euclid(1.0) * n as f32;
            let i = (scaled.floor() as usize).min(n - 1);
            let frac = scaled - i as f32;
            palette[i].lerp(palette[(i + 1) % n], frac)
        }
    }
}

// Palettes
pub const GRID_PALETTE: [Rgb; 5] = [
    Rgb::new(102, 204, 255), // blue
    Rgb::new(0, 255, 200),   // teal
    Rgb::new(180, 80, 255),  // purple
    Rgb::new(255, 80, 180),  // pink
    Rgb::new(102, 204, 255), // blue (loop)
];

pub const RAY_PALETTE: [Rgb; 4] = [
    Rgb::new(0, 255, 191), // teal
    Rgb::new(0, 255, 255), // cyan
    Rgb::new(255, 79, 163), // pink
    Rgb::new(0, 191, 255), // blue
];

pub const CONFETTI_PALETTE: [Rgb; 5] = [
    Rgb::new(255, 225, 79),
    Rgb::new(255, 79, 163),
    Rgb::new(0, 255, 191),
    Rgb::new(0, 191, 255),
    Rgb::new(255, 251, 224),
];

pub const NEON_BLUE: Rgb = Rgb::new(102, 204, 255);
pub const DARK_BLUE: Rgb = Rgb::new(10, 20, 60);
pub const NEON_CYAN: Rgb = Rgb::new(0, 255, 247);
pub const NEON_PINK: Rgb = Rgb::new(255, 79, 163);
pub const STAR_YELLOW: Rgb = Rgb::new(255, 225, 79);
pub const RADIO_BACKDROP: Rgb = Rgb::new(10, 10, 42);
