use super::config::{positive, ConfigError};
use glam::Vec3;
use rand::Rng;
use serde::Deserialize;
use std::f32::consts::TAU;

/// Region particles are spawned into, centered on the origin.
///
/// Sampling is uniform over the region so particles do not cluster at the
/// center: the sphere scales its radius by `cbrt(u)`, the disc by `sqrt(u)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Volume {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
    Disc { radius: f32, thickness: f32 },
}

impl Volume {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            Volume::Sphere { radius } => {
                let r = radius * rng.gen::<f32>().cbrt();
                let theta = rng.gen::<f32>() * TAU;
                let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.sin() * theta.sin(),
                    r * phi.cos(),
                )
            }
            Volume::Box { half_extents } => Vec3::new(
                symmetric(rng, half_extents[0]),
                symmetric(rng, half_extents[1]),
                symmetric(rng, half_extents[2]),
            ),
            Volume::Disc { radius, thickness } => {
                let r = radius * rng.gen::<f32>().sqrt();
                let theta = rng.gen::<f32>() * TAU;
                Vec3::new(
                    r * theta.cos(),
                    r * theta.sin(),
                    symmetric(rng, thickness * 0.5),
                )
            }
        }
    }

    /// Whether `p` (relative to the volume center) lies inside, with a small
    /// tolerance for float rounding in the trigonometric samplers.
    pub fn contains(&self, p: Vec3) -> bool {
        const EPS: f32 = 1e-4;
        match *self {
            Volume::Sphere { radius } => p.length() <= radius * (1.0 + EPS) + EPS,
            Volume::Box { half_extents } => {
                p.abs().cmple(Vec3::from(half_extents) + EPS).all()
            }
            Volume::Disc { radius, thickness } => {
                p.truncate().length() <= radius * (1.0 + EPS) + EPS
                    && p.z.abs() <= thickness * 0.5 + EPS
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Volume::Sphere { radius } => positive("volume.radius", radius),
            Volume::Box { half_extents } => {
                for h in half_extents {
                    if !(h >= 0.0 && h.is_finite()) {
                        return Err(ConfigError::NonPositive {
                            field: "volume.half_extents",
                            value: h,
                        });
                    }
                }
                Ok(())
            }
            Volume::Disc { radius, thickness } => {
                positive("volume.radius", radius)?;
                if thickness < 0.0 || !thickness.is_finite() {
                    return Err(ConfigError::NonPositive {
                        field: "volume.thickness",
                        value: thickness,
                    });
                }
                Ok(())
            }
        }
    }
}

#[inline]
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * half
}
