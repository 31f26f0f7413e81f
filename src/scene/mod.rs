pub mod camera;
pub mod config;
pub mod constants;
pub mod field;
pub mod lifecycle;
pub mod lines;
pub mod palette;
pub mod particles;
pub mod pointer;
pub mod shapes;
pub mod volume;

pub use camera::{Camera, CameraRig, Viewport};
pub use config::{ConfigError, FieldConfig, FogConfig, LayerConfig, ScrollAxis};
pub use field::FieldState;
pub use lifecycle::{FrameLoop, FrameScheduler, LoopState};
pub use lines::{LineBuffer, LineVertex, Segment};
pub use palette::{ColorMode, Palette};
pub use particles::{Particle, ParticleField};
pub use pointer::PointerState;
pub use shapes::{DecorativeShape, ShapeKind};
pub use volume::Volume;

// Shaders bundled as string constants
pub static FIELD_WGSL: &str = include_str!("../../shaders/field.wgsl");
