// Host-side tests for camera projection and colour helpers.

use glam::Vec3;
use sinbound_core::color::{cycle_palette, lerp_palette};
use sinbound_core::visuals::Viewport;
use sinbound_core::{Camera, Rgb};

#[test]
fn origin_projects_to_viewport_center() {
    let mut camera = Camera::looking_at_origin(40.0, 60.0);
    let viewport = Viewport::new(800, 600);
    camera.set_viewport(viewport);
    let p = camera.project(Vec3::ZERO, viewport).expect("visible");
    assert!((p.screen.x - 400.0).abs() < 1e-3);
    assert!((p.screen.y - 300.0).abs() < 1e-3);
    assert!((p.depth - 40.0).abs() < 1e-3);
}

#[test]
fn nearer_points_scale_up_and_y_points_down_on_screen() {
    let viewport = Viewport::new(800, 600);
    let camera = Camera::looking_at_origin(40.0, 60.0);
    let far = camera.project(Vec3::new(0.0, 0.0, -10.0), viewport).expect("far");
    let near = camera.project(Vec3::new(0.0, 0.0, 10.0), viewport).expect("near");
    assert!(near.scale > far.scale);
    let up = camera.project(Vec3::new(0.0, 5.0, 0.0), viewport).expect("up");
    assert!(up.screen.y < 300.0);
}

#[test]
fn points_behind_the_camera_are_culled() {
    let camera = Camera::looking_at_origin(40.0, 60.0);
    assert!(camera.project(Vec3::new(0.0, 0.0, 50.0), Viewport::default()).is_none());
}

#[test]
fn hsl_primaries() {
    assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
    assert_eq!(Rgb::from_hsl(600.0, 1.0, 0.5), Rgb::new(0, 0, 255));
    assert_eq!(Rgb::from_hsl(42.0, 0.0, 1.0), Rgb::WHITE);
}

#[test]
fn lerp_clamps_and_palettes_wrap() {
    assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 2.0), Rgb::WHITE);
    assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));

    let palette = [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)];
    assert_eq!(lerp_palette(&palette, 0.0), palette[0]);
    assert_eq!(lerp_palette(&palette, 1.0), palette[0]);
    assert_eq!(cycle_palette(&palette, 0.5), palette[1]);
    assert_eq!(cycle_palette(&[], 0.3), Rgb::BLACK);
    assert_eq!(Rgb::new(1, 2, 3).css_rgba(1.5), "rgba(1,2,3,1.000)");
    assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1,2,3)");
}
