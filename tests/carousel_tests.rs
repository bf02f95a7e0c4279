// Host-side tests for the radio carousel.

use std::f32::consts::{PI, TAU};

use sinbound_core::{is_back_facing, nearest_turn, CarouselLayout, CarouselState, Spring};

fn settle(state: &mut CarouselState, from_sec: f64, seconds: f64) -> f64 {
    let mut now = from_sec;
    let end = from_sec + seconds;
    while now < end {
        now += 1.0 / 60.0;
        state.update(1.0 / 60.0, now);
    }
    now
}

#[test]
fn stepping_wraps_both_ways() {
    let mut c = CarouselState::new(CarouselLayout::BIG, 5);
    assert!(c.step_left(0.0));
    assert_eq!(c.current(), 4);
    assert!(c.step_right(0.0));
    assert!(c.step_right(0.0));
    assert_eq!(c.current(), 1);
    assert!(!c.is_auto_spinning());
}

#[test]
fn empty_carousel_ignores_input() {
    let mut c = CarouselState::new(CarouselLayout::COMPACT, 0);
    assert!(!c.step_left(0.0));
    assert!(!c.step_right(0.0));
    assert!(!c.select(0, 0.0));
    assert!(c.poses(0.0).is_empty());
}

#[test]
fn shrinking_clamps_current_and_hover() {
    let mut c = CarouselState::new(CarouselLayout::BIG, 6);
    c.select(5, 0.0);
    c.set_hovered(Some(4));
    c.set_count(3);
    assert_eq!(c.current(), 2);
    assert_eq!(c.hovered(), None);
    c.set_hovered(Some(7));
    assert_eq!(c.hovered(), None);
}

#[test]
fn selection_springs_to_the_front() {
    let mut c = CarouselState::new(CarouselLayout::BIG, 4);
    c.select(1, 0.0);
    settle(&mut c, 0.0, 2.5);
    let target = nearest_turn(c.target_angle(), c.rotation());
    assert!((c.rotation() - target).abs() < 0.01, "{} vs {}", c.rotation(), target);
    let front = c.poses(2.5).into_iter().find(|p| p.active).expect("active pose");
    assert_eq!(front.index, 1);
    // the selected item sits at the front of the cylinder
    assert!(front.position.z > 0.0 && front.position.x.abs() < 0.1);
}

#[test]
fn auto_spin_resumes_after_three_quiet_seconds() {
    let mut c = CarouselState::new(CarouselLayout::BIG, 4);
    c.select(2, 0.0);
    let now = settle(&mut c, 0.0, 2.9);
    assert!(!c.is_auto_spinning());
    let resumed_at = c.rotation();
    settle(&mut c, now, 1.0);
    assert!(c.is_auto_spinning());
    // resumes from the current rotation, no snap back to zero
    assert!((c.rotation() - resumed_at).abs() < 1.0);
}

#[test]
fn nearest_turn_picks_the_short_way() {
    assert!((nearest_turn(0.0, TAU * 3.0 + 0.2) - TAU * 3.0).abs() < 1e-4);
    assert!((nearest_turn(-PI / 2.0, -TAU + 0.1) - (-TAU - PI / 2.0)).abs() < 1e-4);
    for i in -20..20 {
        let reference = i as f32 * 0.7;
        let shifted = nearest_turn(1.0, reference);
        assert!((shifted - reference).abs() <= PI + 1e-4);
    }
}

#[test]
fn back_facing_is_the_far_half() {
    assert!(!is_back_facing(0.0));
    assert!(!is_back_facing(PI / 2.0));
    assert!(is_back_facing(PI));
    assert!(is_back_facing(-PI + 0.1));
    assert!(!is_back_facing(TAU + 0.1));
}

#[test]
fn hovered_card_grows_past_the_active_one() {
    let mut c = CarouselState::new(CarouselLayout::BIG, 3);
    c.select(0, 0.0);
    c.set_hovered(Some(2));
    settle(&mut c, 0.0, 1.5);
    let poses = c.poses(1.5);
    assert!(poses[2].scale > poses[0].scale);
    assert!(poses[0].scale > poses[1].scale);
    assert!((poses[1].scale - 1.0).abs() < 0.01);
}

#[test]
fn spring_settles_on_target() {
    let mut s = Spring::new(0.0, 170.0, 26.0);
    s.step(1.0, 3.0);
    assert!(s.is_settled(1.0));
}
