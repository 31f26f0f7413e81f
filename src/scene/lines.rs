//! Connecting lines between nearby particles.
//!
//! The search is a plain pairwise scan, O(n²) in the number of candidate
//! particles. That is fine for the tens to low hundreds of points a page
//! background uses; the caller caps candidates (`lines.max_particles`) and a
//! spatial index would be needed beyond that.

use glam::{Vec3, Vec4};

/// GPU-ready line endpoint: position followed by straight RGBA.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Segment {
    pub start: LineVertex,
    pub end: LineVertex,
}

impl Segment {
    /// Degenerate, fully transparent segment used for unused slots.
    pub const ZERO: Segment = Segment {
        start: LineVertex {
            position: [0.0; 3],
            color: [0.0; 4],
        },
        end: LineVertex {
            position: [0.0; 3],
            color: [0.0; 4],
        },
    };

    pub fn new(a: Vec3, b: Vec3, color: Vec4) -> Self {
        let color = color.to_array();
        Self {
            start: LineVertex {
                position: a.to_array(),
                color,
            },
            end: LineVertex {
                position: b.to_array(),
                color,
            },
        }
    }

    pub fn endpoints(&self) -> (Vec3, Vec3) {
        (
            Vec3::from(self.start.position),
            Vec3::from(self.end.position),
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Segment::ZERO
    }
}

/// Fixed-capacity segment buffer rebuilt every frame.
///
/// Invariant: every slot at or beyond `emitted` is `Segment::ZERO`, so
/// segments from a previous, busier frame never linger.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    segments: Vec<Segment>,
    emitted: usize,
    threshold: f32,
    color: Vec3,
    opacity: f32,
}

impl LineBuffer {
    pub fn new(capacity: usize, threshold: f32, color: Vec3, opacity: f32) -> Self {
        Self {
            segments: vec![Segment::ZERO; capacity],
            emitted: 0,
            threshold,
            color,
            opacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whole buffer including zeroed tail, as uploaded to the GPU.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn active(&self) -> &[Segment] {
        &self.segments[..self.emitted]
    }

    /// Emit a segment for every unordered pair closer than the threshold,
    /// in `(i, j)` scan order, until the buffer is full. Alpha falls off
    /// linearly with distance. Returns the number of segments emitted.
    pub fn rebuild(&mut self, positions: &[Vec3]) -> usize {
        let capacity = self.segments.len();
        let threshold_sq = self.threshold * self.threshold;
        let mut n = 0;
        'scan: for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if n == capacity {
                    break 'scan;
                }
                let d_sq = positions[i].distance_squared(positions[j]);
                if d_sq < threshold_sq {
                    let falloff = 1.0 - d_sq.sqrt() / self.threshold;
                    let color = self.color.extend(falloff * self.opacity);
                    self.segments[n] = Segment::new(positions[i], positions[j], color);
                    n += 1;
                }
            }
        }
        let stale_end = self.emitted.max(n);
        for slot in &mut self.segments[n..stale_end] {
            *slot = Segment::ZERO;
        }
        self.emitted = n;
        n
    }
}
