//! Construction options for the field renderer.
//!
//! Every field has a default, so a host page can pass `{}` or a partial JSON
//! object and only override what it cares about.

use super::constants::*;
use super::palette::{parse_hex, ColorMode};
use super::volume::Volume;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("palette must hold 1 to {max} colors, got {got}")]
    PaletteSize { got: usize, max: usize },
    #[error("invalid hex color `{0}`")]
    InvalidColor(String),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("pointer smoothing must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("camera near plane {near} must be below a finite far plane {far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("{field} must lie within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("float amplitude {amplitude} must stay below drift bound {bound}")]
    FloatExceedsBound { amplitude: f32, bound: f32 },
    #[error("invalid config json: {0}")]
    Json(String),
}

/// Which camera axis the page scroll offset moves along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Forward,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub float_amplitude: f32,
    pub float_frequency: f32,
    pub drift_speed: f32,
    pub pointer_influence: f32,
    pub pointer_follow: f32,
    pub drift_bound: f32,
    pub group_rotation: [f32; 2],
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            float_amplitude: FLOAT_AMPLITUDE,
            float_frequency: FLOAT_FREQUENCY,
            drift_speed: DRIFT_SPEED,
            pointer_influence: POINTER_INFLUENCE,
            pointer_follow: POINTER_FOLLOW,
            drift_bound: DRIFT_BOUND,
            group_rotation: GROUP_ROTATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub count: usize,
    pub palette: Vec<String>,
    pub scale: f32,
    pub spread: [f32; 3],
    pub center: [f32; 3],
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            count: SHAPE_COUNT,
            palette: SHAPE_PALETTE.iter().map(|s| s.to_string()).collect(),
            scale: SHAPE_SCALE,
            spread: SHAPE_HALF_EXTENTS,
            center: SHAPE_CENTER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub enabled: bool,
    pub threshold: f32,
    pub capacity: usize,
    pub max_particles: usize,
    pub opacity: f32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: LINE_THRESHOLD,
            capacity: LINE_CAPACITY,
            max_particles: LINE_MAX_PARTICLES,
            opacity: LINE_OPACITY,
        }
    }
}

/// Extra particle layer drawn with the main field. Counts shrink on mobile
/// by the same rule as the main field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub count: usize,
    pub palette: Vec<String>,
    pub color_mode: ColorMode,
    /// Spawn region; the main volume when absent.
    pub volume: Option<Volume>,
    pub particle_size: f32,
    pub alpha: f32,
    pub group_rotation: [f32; 2],
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            count: LAYER_PARTICLE_COUNT,
            palette: LAYER_PALETTE.iter().map(|s| s.to_string()).collect(),
            color_mode: ColorMode::Pick,
            volume: None,
            particle_size: LAYER_PARTICLE_SIZE,
            alpha: LAYER_ALPHA,
            group_rotation: LAYER_ROTATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub density: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            density: FOG_DENSITY,
        }
    }
}

impl FogConfig {
    /// Density as sent to the shader; zero turns fog off.
    pub fn effective_density(&self) -> f32 {
        if self.enabled {
            self.density
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub mobile_particle_count: Option<usize>,
    pub mobile_breakpoint_px: f32,
    pub palette: Vec<String>,
    pub color_mode: ColorMode,
    pub volume: Volume,
    pub center: [f32; 3],
    pub particle_size: f32,
    pub camera: CameraConfig,
    pub pointer_smoothing: f32,
    pub parallax: [f32; 2],
    pub scroll_factor: f32,
    pub scroll_axis: ScrollAxis,
    pub motion: MotionConfig,
    pub shapes: ShapeConfig,
    pub lines: LineConfig,
    pub layers: Vec<LayerConfig>,
    pub fog: FogConfig,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            mobile_particle_count: None,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            color_mode: ColorMode::Blend,
            volume: Volume::Box {
                half_extents: DEFAULT_HALF_EXTENTS,
            },
            center: DEFAULT_CENTER,
            particle_size: DEFAULT_PARTICLE_SIZE,
            camera: CameraConfig::default(),
            pointer_smoothing: POINTER_SMOOTHING,
            parallax: PARALLAX,
            scroll_factor: SCROLL_FACTOR,
            scroll_axis: ScrollAxis::Vertical,
            motion: MotionConfig::default(),
            shapes: ShapeConfig::default(),
            lines: LineConfig::default(),
            layers: vec![LayerConfig::default()],
            fog: FogConfig::default(),
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_palette(&self.palette)?;
        if self.shapes.count > 0 {
            check_palette(&self.shapes.palette)?;
        }
        self.volume.validate()?;
        positive("particle_size", self.particle_size)?;
        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near", self.camera.near)?;
        positive("camera.distance", self.camera.distance)?;
        if self.camera.fov_degrees >= 180.0 {
            return Err(ConfigError::OutOfRange {
                field: "camera.fov_degrees",
                value: self.camera.fov_degrees,
                min: 0.0,
                max: 180.0,
            });
        }
        if !(self.camera.far.is_finite() && self.camera.near < self.camera.far) {
            return Err(ConfigError::ClipPlanes {
                near: self.camera.near,
                far: self.camera.far,
            });
        }
        if !(self.pointer_smoothing > 0.0 && self.pointer_smoothing <= 1.0) {
            return Err(ConfigError::Smoothing(self.pointer_smoothing));
        }
        self.motion.validate()?;
        if self.lines.enabled {
            positive("lines.threshold", self.lines.threshold)?;
        }
        if self.shapes.count > 0 {
            positive("shapes.scale", self.shapes.scale)?;
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        if !(self.fog.density >= 0.0 && self.fog.density.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "fog.density",
                value: self.fog.density,
                min: 0.0,
                max: f32::MAX,
            });
        }
        Ok(())
    }

    pub fn is_mobile(&self, viewport_width: f32, mobile_agent: bool) -> bool {
        mobile_agent || viewport_width < self.mobile_breakpoint_px
    }

    /// Particle budget for the given viewport: the mobile count (or half the
    /// desktop count) below the breakpoint or on a mobile user agent.
    pub fn effective_particle_count(&self, viewport_width: f32, mobile_agent: bool) -> usize {
        if self.is_mobile(viewport_width, mobile_agent) {
            self.mobile_particle_count
                .unwrap_or(self.particle_count / 2)
        } else {
            self.particle_count
        }
    }
}

impl MotionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("motion.drift_bound", self.drift_bound)?;
        unit_range("motion.pointer_follow", self.pointer_follow)?;
        // Containment would otherwise fire on every float peak.
        if !self.float_amplitude.is_finite() || self.float_amplitude.abs() >= self.drift_bound {
            return Err(ConfigError::FloatExceedsBound {
                amplitude: self.float_amplitude,
                bound: self.drift_bound,
            });
        }
        Ok(())
    }
}

impl LayerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Ok(());
        }
        check_palette(&self.palette)?;
        if let Some(volume) = &self.volume {
            volume.validate()?;
        }
        positive("layers.particle_size", self.particle_size)?;
        unit_range("layers.alpha", self.alpha)
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENT_TOKENS.iter().any(|t| ua.contains(t))
}

fn check_palette(palette: &[String]) -> Result<(), ConfigError> {
    if palette.is_empty() || palette.len() > MAX_PALETTE_COLORS {
        return Err(ConfigError::PaletteSize {
            got: palette.len(),
            max: MAX_PALETTE_COLORS,
        });
    }
    for hex in palette {
        parse_hex(hex)?;
    }
    Ok(())
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
