// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use mixer_core::{NormalizedPoint, PresetId};

const ORIGIN: Vec2 = Vec2::new(100.0, 50.0);
const SIZE: Vec2 = Vec2::new(600.0, 600.0);

#[test]
fn surface_point_maps_rect_to_unit_square() {
    let center = surface_point(Vec2::new(400.0, 350.0), ORIGIN, SIZE).expect("inside rect");
    assert_eq!(center, NormalizedPoint::CENTER);

    let top = surface_point(Vec2::new(400.0, 50.0), ORIGIN, SIZE).expect("inside rect");
    assert!((top.x - 0.5).abs() < 1e-6);
    assert!(top.y.abs() < 1e-6);

    let p = surface_point(Vec2::new(250.0, 200.0), ORIGIN, SIZE).expect("inside rect");
    assert!((p.x - 0.25).abs() < 1e-6 && (p.y - 0.25).abs() < 1e-6);
}

#[test]
fn surface_point_clamps_to_boundary_circle() {
    // bounding-box corner, outside the circle
    let corner = surface_point(Vec2::new(700.0, 650.0), ORIGIN, SIZE).expect("clamped");
    assert!((corner.radius() - 0.5).abs() < 1e-5);
    let diag = std::f32::consts::FRAC_PI_4;
    assert!((corner.angle() - diag).abs() < 1e-5);

    // far outside the element entirely, to the left
    let left = surface_point(Vec2::new(-5000.0, 350.0), ORIGIN, SIZE).expect("clamped");
    assert!(left.x.abs() < 1e-5);
    assert!((left.y - 0.5).abs() < 1e-5);
}

#[test]
fn surface_point_rejects_degenerate_rect() {
    assert!(surface_point(Vec2::new(1.0, 1.0), ORIGIN, Vec2::ZERO).is_none());
    assert!(surface_point(Vec2::new(1.0, 1.0), ORIGIN, Vec2::new(600.0, -1.0)).is_none());
    assert!(surface_point(Vec2::new(f32::NAN, 1.0), ORIGIN, SIZE).is_none());
}

#[test]
fn marker_percent_scales_to_css() {
    assert_eq!(marker_percent(NormalizedPoint::CENTER), (50.0, 50.0));
    assert_eq!(marker_percent(NormalizedPoint::BOUNDARY_TOP), (50.0, 0.0));
}

#[test]
fn drag_state_defaults_inactive() {
    let d = DragState::default();
    assert!(!d.active);
}

#[test]
fn key_commands() {
    assert_eq!(key_command(" "), Some(KeyCommand::TogglePlay));
    assert_eq!(key_command("a"), Some(KeyCommand::ToggleAutopilot));
    assert_eq!(key_command("A"), Some(KeyCommand::ToggleAutopilot));
    for id in 1..=7u8 {
        assert_eq!(
            key_command(&id.to_string()),
            Some(KeyCommand::SelectPreset(PresetId::new(id).expect("valid preset")))
        );
    }
    assert_eq!(key_command("0"), None);
    assert_eq!(key_command("8"), None);
    assert_eq!(key_command("12"), None);
    assert_eq!(key_command("Enter"), None);
    assert_eq!(key_command(""), None);
}
