//! Default tuning for the particle field.
//!
//! These constants express the intended look (spread, easing factors, clamp
//! limits) and keep magic numbers out of the update code. Every value can be
//! overridden through `FieldConfig` except where noted.

// Particle budget
pub const DEFAULT_PARTICLE_COUNT: usize = 800;
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0; // viewports narrower than this count as mobile
pub const MOBILE_AGENT_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

// Palette
pub const DEFAULT_PALETTE: [&str; 2] = ["#00D4FF", "#8B5CF6"];
pub const MAX_PALETTE_COLORS: usize = 4;
pub const PARTICLE_ALPHA: f32 = 0.85;

// Spawn volume (box half extents, world units)
pub const DEFAULT_HALF_EXTENTS: [f32; 3] = [30.0, 20.0, 15.0];
pub const DEFAULT_CENTER: [f32; 3] = [0.0, 0.0, -10.0];

// Point sprites
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.25; // world-space sprite width before jitter
pub const PARTICLE_SIZE_MIN_FRACTION: f32 = 0.4;
pub const MAX_PIXEL_RATIO: f32 = 2.0; // backing store never exceeds 2x CSS pixels
pub const MIN_SPRITE_PX: f32 = 1.0; // CSS-pixel radius floor for distant sprites

// Secondary layer: fewer, larger, dimmer, counter-rotating
pub const LAYER_PARTICLE_COUNT: usize = 120;
pub const LAYER_PALETTE: [&str; 1] = ["#A78BFA"];
pub const LAYER_PARTICLE_SIZE: f32 = 0.45;
pub const LAYER_ALPHA: f32 = 0.55;
pub const LAYER_ROTATION: [f32; 2] = [0.0002, -0.00045];

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 30.0;

// Pointer and scroll
pub const POINTER_SMOOTHING: f32 = 0.05; // smoothed += (raw - smoothed) * α
pub const POINTER_SNAP_EPSILON: f32 = 1e-5;
pub const PARALLAX: [f32; 2] = [3.0, 2.0]; // world units per normalized pointer unit
pub const SCROLL_FACTOR: f32 = 0.005; // world units per scrolled CSS pixel

// Idle motion
pub const FLOAT_AMPLITUDE: f32 = 0.5;
pub const FLOAT_FREQUENCY: f32 = 0.8; // radians per second, jittered per particle
pub const FLOAT_FREQUENCY_JITTER: f32 = 0.5;
pub const DRIFT_SPEED: f32 = 0.01; // max per-frame velocity component
pub const POINTER_INFLUENCE: f32 = 2.0; // world offset at full pointer deflection
pub const POINTER_FOLLOW: f32 = 0.01; // easing toward the pointer offset
pub const DRIFT_BOUND: f32 = 3.0; // per-axis displacement from home before reset
pub const GROUP_ROTATION: [f32; 2] = [0.0002, 0.0005]; // radians per frame (x, y)

// Decorative shapes
pub const SHAPE_COUNT: usize = 6;
pub const SHAPE_PALETTE: [&str; 4] = ["#00D4FF", "#8B5CF6", "#10B981", "#F472B6"];
pub const SHAPE_SCALE: f32 = 0.9;
pub const SHAPE_HALF_EXTENTS: [f32; 3] = [10.0, 7.5, 6.0];
pub const SHAPE_CENTER: [f32; 3] = [0.0, 0.0, -14.0];
pub const SHAPE_ROTATION_MAX: f32 = 0.005; // radians per frame, per axis
pub const SHAPE_ALPHA: f32 = 0.6;

// Depth fog (exp2 falloff toward transparent)
pub const FOG_DENSITY: f32 = 0.015;

// Connecting lines
pub const LINE_THRESHOLD: f32 = 6.0;
pub const LINE_CAPACITY: usize = 1500;
pub const LINE_MAX_PARTICLES: usize = 150; // pairwise search is O(n²) per frame
pub const LINE_OPACITY: f32 = 0.2;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // long stalls (tab switch) are not replayed
