//! Viewport, camera and the pointer/scroll parallax rig.
//!
//! These types avoid platform APIs so the web frontend and host tests share
//! the same projection math.

use super::config::{FieldConfig, ScrollAxis};
use super::constants::MAX_PIXEL_RATIO;
use glam::{Mat4, Vec2, Vec3};

/// CSS-pixel viewport plus device pixel ratio. Dimensions are clamped to at
/// least 1x1 so aspect math never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let clamp_dim = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: clamp_dim(width),
            height: clamp_dim(height),
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel ratio used for the backing store and point sizing.
    pub fn effective_pixel_ratio(&self) -> f32 {
        self.pixel_ratio.min(MAX_PIXEL_RATIO)
    }

    /// Backing-store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let dpr = self.effective_pixel_ratio();
        let w = (self.width * dpr) as u32;
        let h = (self.height * dpr) as u32;
        (w.max(1), h.max(1))
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_config(config: &FieldConfig, viewport: &Viewport) -> Self {
        let target = Vec3::from(config.camera.look_at);
        Self {
            eye: target + Vec3::new(0.0, 0.0, config.camera.distance),
            target,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: config.camera.fov_degrees.to_radians(),
            znear: config.camera.near,
            zfar: config.camera.far,
        }
    }

    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

/// Places the camera from smoothed pointer and scroll offset each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub base_eye: Vec3,
    pub look_at: Vec3,
    pub parallax: Vec2,
    pub scroll_factor: f32,
    pub scroll_axis: ScrollAxis,
}

impl CameraRig {
    pub fn from_config(config: &FieldConfig) -> Self {
        let look_at = Vec3::from(config.camera.look_at);
        Self {
            base_eye: look_at + Vec3::new(0.0, 0.0, config.camera.distance),
            look_at,
            parallax: Vec2::from(config.parallax),
            scroll_factor: config.scroll_factor,
            scroll_axis: config.scroll_axis,
        }
    }

    fn scroll_offset(&self, scroll_y: f32) -> Vec3 {
        let scroll = -scroll_y * self.scroll_factor;
        match self.scroll_axis {
            ScrollAxis::Vertical => Vec3::new(0.0, scroll, 0.0),
            ScrollAxis::Forward => Vec3::new(0.0, 0.0, scroll),
        }
    }

    pub fn eye_for(&self, pointer: Vec2, scroll_y: f32) -> Vec3 {
        self.base_eye + (pointer * self.parallax).extend(0.0) + self.scroll_offset(scroll_y)
    }

    /// Forward scrolling dollies the target along with the eye; vertical
    /// scrolling keeps the target fixed so the view tilts.
    pub fn target_for(&self, scroll_y: f32) -> Vec3 {
        match self.scroll_axis {
            ScrollAxis::Vertical => self.look_at,
            ScrollAxis::Forward => self.look_at + self.scroll_offset(scroll_y),
        }
    }

    /// Move the eye, then re-aim at the look target. The re-aim happens every
    /// frame; without it the parallax reads as a flat pan.
    pub fn apply(&self, camera: &mut Camera, pointer: Vec2, scroll_y: f32) {
        camera.eye = self.eye_for(pointer, scroll_y);
        camera.target = self.target_for(scroll_y);
    }
}
