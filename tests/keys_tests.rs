// Host-side tests for key, pointer and route mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}
mod route {
    include!("../src/route.rs");
}

use keys::*;
use route::Route;

#[test]
fn arrows_step_the_carousel() {
    assert_eq!(carousel_key("ArrowLeft"), Some(CarouselKey::Left));
    assert_eq!(carousel_key("ArrowRight"), Some(CarouselKey::Right));
    assert_eq!(carousel_key("ArrowUp"), None);
    assert_eq!(carousel_key("a"), None);
}

#[test]
fn player_keys_map_space_and_arrows() {
    assert_eq!(player_key("Space", " "), Some(PlayerKey::TogglePlay));
    // some layouts report an empty code for the space bar
    assert_eq!(player_key("", " "), Some(PlayerKey::TogglePlay));
    assert_eq!(player_key("ArrowLeft", "ArrowLeft"), Some(PlayerKey::Previous));
    assert_eq!(player_key("ArrowRight", "ArrowRight"), Some(PlayerKey::Next));
    assert_eq!(player_key("KeyK", "k"), None);
}

#[test]
fn pointer_offset_is_centered_with_y_up() {
    assert_eq!(pointer_offset(50.0, 50.0, 100.0, 100.0), (0.0, 0.0));
    assert_eq!(pointer_offset(0.0, 0.0, 100.0, 100.0), (-1.0, 1.0));
    assert_eq!(pointer_offset(100.0, 100.0, 100.0, 100.0), (1.0, -1.0));
    // outside the box clamps
    assert_eq!(pointer_offset(-50.0, 300.0, 100.0, 100.0), (-1.0, -1.0));
    assert_eq!(pointer_offset(10.0, 10.0, 0.0, 100.0), (0.0, 0.0));
}

#[test]
fn pointer_offset_stays_in_unit_square() {
    for i in -10..30 {
        for j in -10..30 {
            let (x, y) = pointer_offset(i as f32 * 10.0, j as f32 * 10.0, 200.0, 150.0);
            assert!((-1.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&y));
        }
    }
}

#[test]
fn seek_fraction_clamps_to_the_bar() {
    assert_eq!(seek_fraction(150.0, 100.0, 200.0), 0.25);
    assert_eq!(seek_fraction(50.0, 100.0, 200.0), 0.0);
    assert_eq!(seek_fraction(400.0, 100.0, 200.0), 1.0);
    assert_eq!(seek_fraction(150.0, 100.0, 0.0), 0.0);
}

#[test]
fn clock_formats_minutes_and_seconds() {
    assert_eq!(format_clock(0.0), "0:00");
    assert_eq!(format_clock(9.9), "0:09");
    assert_eq!(format_clock(61.0), "1:01");
    assert_eq!(format_clock(3725.0), "62:05");
    assert_eq!(format_clock(f64::NAN), "0:00");
    assert_eq!(format_clock(f64::INFINITY), "0:00");
    assert_eq!(format_clock(-3.0), "0:00");
}

#[test]
fn routes_dispatch_on_pathname() {
    assert_eq!(Route::from_path("/"), Route::Home);
    assert_eq!(Route::from_path(""), Route::Home);
    assert_eq!(Route::from_path("/radio"), Route::Radio);
    assert_eq!(Route::from_path("/radio/"), Route::Radio);
    assert_eq!(Route::from_path("/trackplayer"), Route::Player);
    assert_eq!(Route::from_path("/archive"), Route::Archive);
    assert_eq!(Route::from_path("/nope"), Route::Home);
}

#[test]
fn only_home_skips_the_loading_screen() {
    assert!(!Route::Home.shows_loading_screen());
    for route in [Route::Radio, Route::Player, Route::Archive] {
        assert!(route.shows_loading_screen());
    }
}
