use super::constants::POINTER_SNAP_EPSILON;
use glam::Vec2;

/// Raw and smoothed pointer position in normalized device units.
///
/// `raw` is written whenever a pointer event arrives (irregularly); `smoothed`
/// is advanced once per frame toward it with a fixed exponential factor, so
/// it never jumps even when `raw` does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smoothed: Vec2,
    factor: f32,
}

impl PointerState {
    pub fn new(factor: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            smoothed: Vec2::ZERO,
            factor: factor.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn set_raw(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.raw = ndc.clamp(Vec2::splat(-1.0), Vec2::ONE);
        }
    }

    /// Record a pointer position given in CSS pixels relative to the viewport.
    pub fn set_client(&mut self, client_x: f32, client_y: f32, width: f32, height: f32) {
        self.set_raw(normalize_client(client_x, client_y, width, height));
    }

    /// Advance one frame. The remaining distance shrinks by `(1 - factor)`
    /// each call; once below epsilon the value snaps onto the target.
    pub fn step(&mut self) -> Vec2 {
        let delta = self.raw - self.smoothed;
        if delta.length_squared() <= POINTER_SNAP_EPSILON * POINTER_SNAP_EPSILON {
            self.smoothed = self.raw;
        } else {
            self.smoothed += delta * self.factor;
        }
        self.smoothed
    }
}

/// Map viewport pixels to [-1, 1] on both axes with +y pointing up.
#[inline]
pub fn normalize_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((client_x / w) * 2.0 - 1.0, -((client_y / h) * 2.0 - 1.0))
}
