use ambient_field::scene::pointer::{normalize_client, PointerState};
use glam::Vec2;

#[test]
fn client_pixels_map_to_unit_square_with_y_up() {
    assert_eq!(normalize_client(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_client(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalize_client(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn zero_sized_viewport_does_not_divide_by_zero() {
    let p = normalize_client(0.0, 0.0, 0.0, 0.0);
    assert!(p.is_finite());
}

#[test]
fn smoothing_shrinks_distance_geometrically() {
    let mut ptr = PointerState::new(0.05);
    ptr.set_raw(Vec2::new(1.0, 0.0));
    let mut prev = 1.0;
    for _ in 0..10 {
        let s = ptr.step();
        let remaining = 1.0 - s.x;
        assert!((remaining - prev * 0.95).abs() < 1e-5);
        prev = remaining;
    }
}

#[test]
fn smoothed_value_converges_and_snaps() {
    let mut ptr = PointerState::new(0.05);
    ptr.set_raw(Vec2::new(0.6, -0.4));
    for _ in 0..1_000 {
        ptr.step();
    }
    assert_eq!(ptr.smoothed, ptr.raw);
}

#[test]
fn jumps_in_raw_input_never_jump_the_smoothed_value() {
    let mut ptr = PointerState::new(0.05);
    ptr.set_raw(Vec2::new(-1.0, -1.0));
    let before = ptr.smoothed;
    ptr.set_raw(Vec2::new(1.0, 1.0));
    let after = ptr.step();
    assert!((after - before).length() <= 0.05 * Vec2::splat(2.0).length() + 1e-6);
}

#[test]
fn raw_input_is_clamped_and_non_finite_ignored() {
    let mut ptr = PointerState::new(0.05);
    ptr.set_raw(Vec2::new(5.0, -3.0));
    assert_eq!(ptr.raw, Vec2::new(1.0, -1.0));
    ptr.set_raw(Vec2::new(f32::NAN, 0.0));
    assert_eq!(ptr.raw, Vec2::new(1.0, -1.0));
}

#[test]
fn factor_of_one_tracks_immediately() {
    let mut ptr = PointerState::new(1.0);
    ptr.set_client(200.0, 150.0, 800.0, 600.0);
    assert_eq!(ptr.step(), ptr.raw);
}
