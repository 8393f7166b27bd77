// Host-side tests for the position-to-volume mapper.

use mixer_core::*;

fn anchors() -> AnchorSet {
    AnchorSet::default()
}

#[test]
fn default_geometry_matches_surface_layout() {
    let g = SurfaceGeometry::default();
    assert_eq!(g.size_px, 600.0);
    assert!((g.outer_radius_px - 270.0).abs() < 1e-3);
    assert!((g.anchor_radius_px - 193.8).abs() < 1e-3);

    // anchor 0 straight above the center, the rest clockwise
    let a = anchors();
    let p0 = a.points()[0];
    assert!((p0.x - 300.0).abs() < 1e-3);
    assert!((p0.y - (300.0 - 193.8)).abs() < 1e-3);
    let p1 = a.points()[1];
    assert!(p1.x > 300.0 && p1.y < 300.0);
}

#[test]
fn boundary_and_outside_are_silent() {
    let a = anchors();
    for p in [
        NormalizedPoint::BOUNDARY_TOP,
        NormalizedPoint::new(1.0, 0.5),
        NormalizedPoint::new(0.0, 0.5),
        NormalizedPoint::new(0.5, 1.0),
        NormalizedPoint::new(0.0, 0.0),
        NormalizedPoint::new(1.0, 1.0),
    ] {
        assert_eq!(map_volumes(p, &a), SILENCE, "expected silence at {:?}", p);
    }
}

#[test]
fn center_spreads_budget_evenly() {
    let v = map_volumes(NormalizedPoint::CENTER, &anchors());
    // 80 / 9 each
    assert_eq!(v, [9; TRACK_COUNT]);
}

#[test]
fn controller_on_anchor_solos_its_track() {
    let a = anchors();
    for i in 0..TRACK_COUNT {
        let v = map_volumes(a.normalized(i), &a);
        assert_eq!(v[i], 80, "track {} at its own anchor: {:?}", i, v);
        for (j, &other) in v.iter().enumerate() {
            if j != i {
                assert_eq!(other, 0, "track {} should be suppressed at anchor {}", j, i);
            }
        }
    }
}

#[test]
fn nearer_anchor_is_louder() {
    let a = anchors();
    // halfway from the center toward anchor 0
    let p = NormalizedPoint::new(0.5, 0.5 - 0.1794);
    let v = map_volumes(p, &a);
    let loudest = v.iter().enumerate().max_by_key(|(_, &x)| x).map(|(i, _)| i);
    assert_eq!(loudest, Some(0));
    // anchors 4 and 5 sit opposite anchor 0
    assert!(v[0] > v[4] && v[0] > v[5]);
    assert_eq!(v[1], v[8]);
}

#[test]
fn volumes_never_exceed_ceiling() {
    let a = anchors();
    for yi in 0..=40 {
        for xi in 0..=40 {
            let p = NormalizedPoint::new(xi as f32 / 40.0, yi as f32 / 40.0);
            let v = map_volumes(p, &a);
            assert!(v.iter().all(|&x| x <= 80), "{:?} -> {:?}", p, v);
        }
    }
}

#[test]
fn small_moves_change_volumes_by_at_most_one() {
    let a = anchors();
    // straight up from the center, through anchor 0, out to the boundary
    let steps = 2500;
    let mut prev = map_volumes(NormalizedPoint::CENTER, &a);
    for s in 1..=steps {
        let y = 0.5 - 0.5 * s as f32 / steps as f32;
        let v = map_volumes(NormalizedPoint::new(0.5, y), &a);
        for (i, (&before, &after)) in prev.iter().zip(v.iter()).enumerate() {
            let delta = (before as i16 - after as i16).abs();
            assert!(delta <= 1, "track {} jumped {} -> {} at y={}", i, before, after, y);
        }
        prev = v;
    }
    assert_eq!(prev, SILENCE);
}

#[test]
fn edge_proximity_fades_toward_boundary() {
    let a = anchors();
    // between anchors 0 and 1, outside the solo radius of both
    let angle = (-90.0f32 + 20.0).to_radians();
    let inner = map_volumes(NormalizedPoint::from_polar(angle, 0.2), &a);
    let outer = map_volumes(NormalizedPoint::from_polar(angle, 0.45), &a);
    let inner_sum: u32 = inner.iter().map(|&x| x as u32).sum();
    let outer_sum: u32 = outer.iter().map(|&x| x as u32).sum();
    assert!(outer_sum < inner_sum);
    assert!(outer_sum <= 10);
}
