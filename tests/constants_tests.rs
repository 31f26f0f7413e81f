// Sanity checks on tuning constants and their relationships.

use ambient_field::scene::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Smoothing is an exponential factor
    assert!(POINTER_SMOOTHING > 0.0 && POINTER_SMOOTHING <= 1.0);
    assert!(POINTER_SNAP_EPSILON > 0.0);

    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(MAX_FRAME_DT_SEC > 0.0);

    assert!(PARTICLE_ALPHA > 0.0 && PARTICLE_ALPHA <= 1.0);
    assert!(LINE_OPACITY > 0.0 && LINE_OPACITY <= 1.0);
    assert!(SHAPE_ALPHA > 0.0 && SHAPE_ALPHA <= 1.0);
    assert!(PARTICLE_SIZE_MIN_FRACTION > 0.0 && PARTICLE_SIZE_MIN_FRACTION <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn idle_motion_fits_inside_drift_bound() {
    // The float term alone must never trip containment
    assert!(FLOAT_AMPLITUDE < DRIFT_BOUND);
    assert!(POINTER_INFLUENCE < DRIFT_BOUND);
    assert!(DRIFT_SPEED < DRIFT_BOUND);
}

#[test]
fn camera_sits_outside_the_default_volume() {
    let front = DEFAULT_CENTER[2] + DEFAULT_HALF_EXTENTS[2];
    assert!(CAMERA_DISTANCE > front);
    assert!(CAMERA_DISTANCE - front > CAMERA_NEAR);
}

#[test]
fn defaults_fit_palette_and_line_limits() {
    assert!(!DEFAULT_PALETTE.is_empty() && DEFAULT_PALETTE.len() <= MAX_PALETTE_COLORS);
    assert!(!SHAPE_PALETTE.is_empty() && SHAPE_PALETTE.len() <= MAX_PALETTE_COLORS);
    assert!(LINE_MAX_PARTICLES <= DEFAULT_PARTICLE_COUNT);
    assert!(LINE_CAPACITY > 0);
    assert!(MOBILE_AGENT_TOKENS.iter().all(|t| *t == t.to_lowercase()));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn secondary_layer_is_sparser_and_larger() {
    assert!(LAYER_PARTICLE_COUNT > 0 && LAYER_PARTICLE_COUNT < DEFAULT_PARTICLE_COUNT);
    assert!(LAYER_PARTICLE_SIZE > DEFAULT_PARTICLE_SIZE);
    assert!(LAYER_ALPHA > 0.0 && LAYER_ALPHA <= 1.0);
    // Counter-rotates against the main field on y
    assert!(LAYER_ROTATION[1].signum() != GROUP_ROTATION[1].signum());
    assert!(!LAYER_PALETTE.is_empty());
    assert!(FOG_DENSITY >= 0.0);
    assert!(MIN_SPRITE_PX > 0.0);
}
