// Host-side tests for the spin gesture detector and its overlays.

use std::f64::consts::{PI, TAU};

use glam::Vec2;
use sinbound_core::{normalize_delta, viewport_center, Side, SpinDetector, SpinEvents, SpinOverlay};

const STEP: f64 = 0.1;

/// Feed `steps` increments of `dir * STEP` starting at `start_angle`, 10 ms apart.
fn spin(detector: &mut SpinDetector, start_angle: f64, dir: f64, steps: usize, t0: f64) -> Vec<SpinEvents> {
    (0..=steps)
        .map(|i| detector.angle_moved(start_angle + dir * STEP * i as f64, t0 + i as f64 * 0.01))
        .filter(|e| !e.is_empty())
        .collect()
}

#[test]
fn normalize_wraps_into_half_open_range() {
    for i in -100..100 {
        let d = normalize_delta(i as f64 * 0.37);
        assert!(d > -PI - 1e-9 && d <= PI + 1e-9, "{}", d);
    }
    assert!((normalize_delta(TAU - 0.1) + 0.1).abs() < 1e-9);
    assert!((normalize_delta(0.25) - 0.25).abs() < 1e-12);
}

#[test]
fn three_turns_fire_one_celebration_then_one_milestone() {
    let mut detector = SpinDetector::new();
    // 189 steps of 0.1 rad is just past three turns
    let events = spin(&mut detector, 0.0, 1.0, 189, 0.0);
    assert_eq!(events.len(), 2, "{:?}", events);
    assert!(events[0].celebration && events[0].milestone.is_none());
    assert_eq!(events[1].milestone, Some(Side::Right));
    assert!(!events[1].celebration);
    assert_eq!(detector.accumulated(), 0.0);
}

/// Positions on a circle around `center`, `per_turn` samples per revolution,
/// covering `turns` full revolutions and ending where they started.
fn circle(center: Vec2, per_turn: usize, turns: usize, dir: f64) -> Vec<Vec2> {
    (0..=per_turn * turns)
        .map(|i| {
            let a = 0.3 + dir * TAU * i as f64 / per_turn as f64;
            center + Vec2::new((a.cos() * 100.0) as f32, (a.sin() * 100.0) as f32)
        })
        .collect()
}

#[test]
fn exactly_three_turns_fire_the_milestone_at_any_sample_rate() {
    let center = viewport_center(1280.0, 720.0);
    // steps stay above the jitter epsilon up to 628 samples per turn
    for per_turn in [4, 8, 60, 144, 279, 360, 500, 600] {
        for dir in [1.0, -1.0] {
            let mut detector = SpinDetector::new();
            let events: Vec<SpinEvents> = circle(center, per_turn, 3, dir)
                .into_iter()
                .enumerate()
                .map(|(i, p)| detector.pointer_moved(p, center, i as f64 * 0.004))
                .filter(|e| !e.is_empty())
                .collect();
            let milestones: Vec<Side> = events.iter().filter_map(|e| e.milestone).collect();
            assert_eq!(milestones, vec![Side::Right], "{} per turn, dir {}", per_turn, dir);
            assert_eq!(events.iter().filter(|e| e.celebration).count(), 1, "{} per turn", per_turn);
            assert_eq!(detector.accumulated(), 0.0, "{} per turn", per_turn);
        }
    }
}

#[test]
fn a_sample_short_of_three_turns_does_not_fire() {
    let center = viewport_center(800.0, 600.0);
    for per_turn in [60, 360, 600] {
        let mut detector = SpinDetector::new();
        let mut points = circle(center, per_turn, 3, 1.0);
        points.pop();
        let fired = points
            .into_iter()
            .enumerate()
            .any(|(i, p)| detector.pointer_moved(p, center, i as f64 * 0.004).milestone.is_some());
        assert!(!fired, "{} per turn", per_turn);
        assert!((detector.accumulated() - (3.0 * TAU - TAU / per_turn as f64)).abs() < 1e-4);
    }
}

#[test]
fn counter_clockwise_spins_count_too_and_banners_alternate() {
    let mut detector = SpinDetector::new();
    let first = spin(&mut detector, 0.0, -1.0, 189, 0.0);
    assert_eq!(first.last().and_then(|e| e.milestone), Some(Side::Right));
    let last_angle = detector.state().last_angle.expect("anchored");
    let second = spin(&mut detector, last_angle, -1.0, 189, 2.0);
    assert!(second.iter().any(|e| e.celebration));
    assert_eq!(second.last().and_then(|e| e.milestone), Some(Side::Left));
}

#[test]
fn wrapping_past_pi_does_not_jump() {
    let mut detector = SpinDetector::new();
    detector.angle_moved(PI - 0.05, 0.0);
    detector.angle_moved(-PI + 0.05, 0.01);
    assert!((detector.accumulated() - 0.1).abs() < 1e-9);
}

#[test]
fn jitter_below_epsilon_is_ignored() {
    let mut detector = SpinDetector::new();
    for i in 0..500 {
        let angle = if i % 2 == 0 { 0.0 } else { 0.005 };
        assert!(detector.angle_moved(angle, i as f64 * 0.01).is_empty());
    }
    assert_eq!(detector.accumulated(), 0.0);
}

#[test]
fn pausing_past_idle_timeout_resets_without_firing() {
    let mut detector = SpinDetector::new();
    // 1.4 turns, just short of a celebration
    let events = spin(&mut detector, 0.0, 1.0, 88, 0.0);
    assert!(events.is_empty());
    assert!(detector.accumulated() > 8.0);

    let last = detector.state().last_angle.expect("anchored");
    let late = detector.angle_moved(last + 1.0, 10.0);
    assert!(late.is_empty());
    assert_eq!(detector.accumulated(), 0.0);
}

#[test]
fn poll_resets_idle_gesture() {
    let mut detector = SpinDetector::new();
    spin(&mut detector, 0.0, 1.0, 20, 0.0);
    assert!(!detector.poll(1.0));
    assert!(detector.poll(5.0));
    assert_eq!(detector.accumulated(), 0.0);
    assert!(!detector.poll(6.0));
}

#[test]
fn pointer_angle_is_measured_around_center() {
    let mut detector = SpinDetector::new();
    let center = Vec2::new(100.0, 100.0);
    detector.pointer_moved(Vec2::new(200.0, 100.0), center, 0.0);
    detector.pointer_moved(Vec2::new(100.0, 200.0), center, 0.1);
    assert!((detector.accumulated() - PI / 2.0).abs() < 1e-6);
}

#[test]
fn spins_pivot_on_the_viewport_centre() {
    assert_eq!(viewport_center(1280.0, 720.0), Vec2::new(640.0, 360.0));
    assert_eq!(viewport_center(0.0, 0.0), Vec2::ZERO);

    // a quarter turn around the middle of the window
    let center = viewport_center(1000.0, 800.0);
    let mut detector = SpinDetector::new();
    detector.pointer_moved(Vec2::new(900.0, 400.0), center, 0.0);
    detector.pointer_moved(Vec2::new(500.0, 800.0), center, 0.1);
    assert!((detector.accumulated() - PI / 2.0).abs() < 1e-6);
}

#[test]
fn overlay_timings_follow_events() {
    let mut overlay = SpinOverlay::new();
    assert!(!overlay.metallic_visible(0.0));
    overlay.apply(SpinEvents { celebration: true, milestone: None }, 10.0);
    assert!(overlay.metallic_visible(12.9));
    assert!(!overlay.metallic_visible(13.0));
    assert!(overlay.confetti_visible(11.9));
    assert!(!overlay.confetti_visible(12.0));
    assert!(overlay.spin_cursor(11.0));
    assert!(!overlay.spin_cursor(12.5));
    assert_eq!(overlay.banner(11.0), None);

    overlay.apply(SpinEvents { celebration: false, milestone: Some(Side::Left) }, 20.0);
    assert_eq!(overlay.banner(21.0), Some(Side::Left));
    assert_eq!(overlay.banner(22.0), None);
}

#[test]
fn hint_reveals_left_to_right_then_hides() {
    let mut overlay = SpinOverlay::new();
    assert_eq!(overlay.hint_mask(0.0), None);
    overlay.show_hint(5.0);
    assert_eq!(overlay.hint_mask(5.0), Some(0.0));
    let mid = overlay.hint_mask(6.5).expect("visible");
    assert!((mid - 0.5).abs() < 1e-6);
    assert_eq!(overlay.hint_mask(8.0), None);
    assert_eq!(overlay.hint_mask(4.0), None);
}
