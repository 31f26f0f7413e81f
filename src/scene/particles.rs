use super::config::MotionConfig;
use super::constants::{FLOAT_FREQUENCY_JITTER, PARTICLE_ALPHA, PARTICLE_SIZE_MIN_FRACTION};
use super::palette::Palette;
use super::volume::Volume;
use glam::{EulerRot, Mat3, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Spawn position; idle motion oscillates around it.
    pub home: Vec3,
    /// Local position after this frame's motion, before the group rotation.
    pub position: Vec3,
    /// Accumulated velocity drift and pointer nudge relative to `home`.
    pub offset: Vec3,
    pub velocity: Vec3,
    pub phase: f32,
    pub frequency: f32,
    pub color: Vec3,
    pub size: f32,
}

impl Particle {
    pub fn at_rest(home: Vec3) -> Self {
        Self {
            home,
            position: home,
            offset: Vec3::ZERO,
            velocity: Vec3::ZERO,
            phase: 0.0,
            frequency: 0.0,
            color: Vec3::ONE,
            size: 1.0,
        }
    }

    pub fn displacement(&self) -> Vec3 {
        self.position - self.home
    }
}

pub struct SpawnParams<'a> {
    pub volume: Volume,
    pub center: Vec3,
    pub palette: &'a Palette,
    pub size: f32,
    pub drift_speed: f32,
    pub float_frequency: f32,
    /// Group rotation per frame (x, y), radians.
    pub spin: Vec2,
    pub alpha: f32,
}

/// One particle layer plus its slow group rotation about the spawn center.
///
/// Particles are allocated once; resizes and pointer input only mutate them.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    center: Vec3,
    rotation: Vec2,
    spin: Vec2,
    alpha: f32,
    world: Vec<Vec3>,
}

impl ParticleField {
    pub fn spawn<R: Rng + ?Sized>(count: usize, params: &SpawnParams<'_>, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let home = params.center + params.volume.sample(rng);
            let velocity = Vec3::new(
                symmetric(rng, params.drift_speed),
                symmetric(rng, params.drift_speed),
                symmetric(rng, params.drift_speed * 0.5),
            );
            let jitter = 1.0 + FLOAT_FREQUENCY_JITTER * (rng.gen::<f32>() * 2.0 - 1.0);
            let size_fraction =
                PARTICLE_SIZE_MIN_FRACTION + (1.0 - PARTICLE_SIZE_MIN_FRACTION) * rng.gen::<f32>();
            particles.push(Particle {
                home,
                position: home,
                offset: Vec3::ZERO,
                velocity,
                phase: rng.gen::<f32>() * TAU,
                frequency: params.float_frequency * jitter,
                color: params.palette.sample(rng),
                size: params.size * size_fraction,
            });
        }
        Self::with_center(particles, params.center)
            .with_spin(params.spin)
            .with_alpha(params.alpha)
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self::with_center(particles, Vec3::ZERO)
    }

    fn with_center(particles: Vec<Particle>, center: Vec3) -> Self {
        let world = particles.iter().map(|p| p.position).collect();
        Self {
            particles,
            center,
            rotation: Vec2::ZERO,
            spin: Vec2::ZERO,
            alpha: PARTICLE_ALPHA,
            world,
        }
    }

    pub fn with_spin(mut self, spin: Vec2) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions after the group rotation, as rendered.
    pub fn world_positions(&self) -> &[Vec3] {
        &self.world
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn spin(&self) -> Vec2 {
        self.spin
    }

    /// Opacity shared by every particle in the layer.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Advance idle motion for one frame.
    ///
    /// The float term is recomputed from `elapsed` around `home + offset`
    /// rather than accumulated, so it cannot drift. Any axis whose
    /// displacement from home exceeds `drift_bound` snaps back to home.
    pub fn update(&mut self, elapsed: f32, pointer: Vec2, motion: &MotionConfig) {
        let pull = (pointer * motion.pointer_influence).extend(0.0);
        let amplitude = motion.float_amplitude;
        let bound = motion.drift_bound;
        for p in &mut self.particles {
            p.offset += p.velocity;
            p.offset += (pull - p.offset) * motion.pointer_follow;
            let t = elapsed * p.frequency + p.phase;
            let float = Vec3::new(t.cos() * amplitude * 0.6, t.sin() * amplitude, 0.0);
            p.position = p.home + p.offset + float;
            contain(p, bound);
        }

        self.rotation = Vec2::new(
            (self.rotation.x + self.spin.x).rem_euclid(TAU),
            (self.rotation.y + self.spin.y).rem_euclid(TAU),
        );
        let rot = Mat3::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        for (w, p) in self.world.iter_mut().zip(&self.particles) {
            *w = self.center + rot * (p.position - self.center);
        }
    }
}

#[inline]
fn contain(p: &mut Particle, bound: f32) {
    for axis in 0..3 {
        if (p.position[axis] - p.home[axis]).abs() > bound {
            p.position[axis] = p.home[axis];
            p.offset[axis] = 0.0;
        }
    }
}

#[inline]
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_resets_only_the_offending_axis() {
        let mut p = Particle::at_rest(Vec3::new(1.0, 2.0, 3.0));
        p.position = Vec3::new(1.5, 9.0, 3.0);
        p.offset = Vec3::new(0.5, 7.0, 0.0);
        contain(&mut p, 3.0);
        assert_eq!(p.position, Vec3::new(1.5, 2.0, 3.0));
        assert_eq!(p.offset, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn group_rotation_preserves_distance_to_center() {
        let particles = vec![
            Particle::at_rest(Vec3::new(3.0, 0.0, 0.0)),
            Particle::at_rest(Vec3::new(0.0, -2.0, 1.0)),
        ];
        let mut field = ParticleField::from_particles(particles).with_spin(Vec2::new(0.3, 0.7));
        let motion = MotionConfig {
            float_amplitude: 0.0,
            drift_speed: 0.0,
            pointer_follow: 0.0,
            ..MotionConfig::default()
        };
        for _ in 0..10 {
            field.update(0.0, Vec2::ZERO, &motion);
        }
        let world = field.world_positions();
        assert!((world[0].length() - 3.0).abs() < 1e-4);
        assert!((world[1].length() - 5.0_f32.sqrt()).abs() < 1e-4);
    }
}
