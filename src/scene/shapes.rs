use super::config::MotionConfig;
use super::constants::{SHAPE_ALPHA, SHAPE_ROTATION_MAX};
use super::lines::Segment;
use super::palette::Palette;
use super::volume::Volume;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

const PHI: f32 = 1.618_034;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [
        ShapeKind::Icosahedron,
        ShapeKind::Octahedron,
        ShapeKind::Tetrahedron,
    ];

    /// Unit-circumradius vertices.
    pub fn vertices(self) -> SmallVec<[Vec3; 12]> {
        let raw: &[[f32; 3]] = match self {
            ShapeKind::Tetrahedron => &[
                [1.0, 1.0, 1.0],
                [1.0, -1.0, -1.0],
                [-1.0, 1.0, -1.0],
                [-1.0, -1.0, 1.0],
            ],
            ShapeKind::Octahedron => &[
                [1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 0.0, -1.0],
            ],
            ShapeKind::Icosahedron => &[
                [-1.0, PHI, 0.0],
                [1.0, PHI, 0.0],
                [-1.0, -PHI, 0.0],
                [1.0, -PHI, 0.0],
                [0.0, -1.0, PHI],
                [0.0, 1.0, PHI],
                [0.0, -1.0, -PHI],
                [0.0, 1.0, -PHI],
                [PHI, 0.0, -1.0],
                [PHI, 0.0, 1.0],
                [-PHI, 0.0, -1.0],
                [-PHI, 0.0, 1.0],
            ],
        };
        raw.iter().map(|v| Vec3::from(*v).normalize()).collect()
    }

    /// Edges are the vertex pairs at the minimum pairwise distance, which
    /// holds for every regular polyhedron used here.
    pub fn edges(self) -> Vec<[u8; 2]> {
        let verts = self.vertices();
        let mut min_d = f32::MAX;
        for i in 0..verts.len() {
            for j in (i + 1)..verts.len() {
                min_d = min_d.min(verts[i].distance(verts[j]));
            }
        }
        let mut edges = Vec::new();
        for i in 0..verts.len() {
            for j in (i + 1)..verts.len() {
                if (verts[i].distance(verts[j]) - min_d).abs() < 1e-3 {
                    edges.push([i as u8, j as u8]);
                }
            }
        }
        edges
    }
}

/// Wireframe polyhedron floating in the background.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorativeShape {
    pub kind: ShapeKind,
    pub home: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub float_phase: f32,
    pub float_frequency: f32,
    pub scale: f32,
    pub color: Vec3,
    offset_x: f32,
    vertices: SmallVec<[Vec3; 12]>,
    edges: Vec<[u8; 2]>,
}

impl DecorativeShape {
    pub fn new(kind: ShapeKind, home: Vec3, scale: f32, color: Vec3) -> Self {
        Self {
            kind,
            home,
            position: home,
            rotation: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
            float_phase: 0.0,
            float_frequency: 1.0,
            scale,
            color,
            offset_x: 0.0,
            vertices: kind.vertices(),
            edges: kind.edges(),
        }
    }

    pub fn spawn<R: Rng + ?Sized>(
        count: usize,
        volume: Volume,
        center: Vec3,
        scale: f32,
        palette: &Palette,
        rng: &mut R,
    ) -> Vec<Self> {
        (0..count)
            .map(|i| {
                let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
                let home = center + volume.sample(rng);
                let size = scale * (0.7 + 0.6 * rng.gen::<f32>());
                let mut shape = Self::new(kind, home, size, palette.cycle(i));
                shape.rotation_speed = Vec3::new(
                    (rng.gen::<f32>() * 2.0 - 1.0) * SHAPE_ROTATION_MAX,
                    (rng.gen::<f32>() * 2.0 - 1.0) * SHAPE_ROTATION_MAX,
                    (rng.gen::<f32>() * 2.0 - 1.0) * SHAPE_ROTATION_MAX * 0.5,
                );
                shape.float_phase = rng.gen::<f32>() * TAU;
                shape.float_frequency = 1.0 + rng.gen::<f32>();
                shape
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Rotate, bob around the home height and ease sideways toward the
    /// pointer. The sideways offset is eased, not accumulated. Any axis
    /// displaced past `drift_bound` snaps back to home.
    pub fn update(&mut self, elapsed: f32, pointer: Vec2, motion: &MotionConfig) {
        let r = self.rotation + self.rotation_speed;
        self.rotation = Vec3::new(r.x.rem_euclid(TAU), r.y.rem_euclid(TAU), r.z.rem_euclid(TAU));
        let target_x = pointer.x * motion.pointer_influence * 0.25;
        self.offset_x += (target_x - self.offset_x) * motion.pointer_follow * 2.0;
        let bob = (elapsed * self.float_frequency + self.float_phase).sin() * motion.float_amplitude;

        let mut displacement = Vec3::new(self.offset_x, bob, 0.0);
        for axis in 0..3 {
            if displacement[axis].abs() > motion.drift_bound {
                displacement[axis] = 0.0;
            }
        }
        if displacement.x == 0.0 {
            self.offset_x = 0.0;
        }
        self.position = self.home + displacement;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }

    pub fn world_vertices(&self) -> SmallVec<[Vec3; 12]> {
        let model = self.model_matrix();
        self.vertices
            .iter()
            .map(|v| model.transform_point3(*v))
            .collect()
    }

    /// Append this shape's edges as world-space segments.
    pub fn write_segments(&self, out: &mut Vec<Segment>) {
        let world = self.world_vertices();
        let color = self.color.extend(SHAPE_ALPHA);
        for [a, b] in &self.edges {
            out.push(Segment::new(world[*a as usize], world[*b as usize], color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyhedra_have_expected_edge_counts() {
        assert_eq!(ShapeKind::Tetrahedron.edges().len(), 6);
        assert_eq!(ShapeKind::Octahedron.edges().len(), 12);
        assert_eq!(ShapeKind::Icosahedron.edges().len(), 30);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut shape = DecorativeShape::new(
            ShapeKind::Octahedron,
            Vec3::new(2.0, 1.0, -10.0),
            1.0,
            Vec3::ONE,
        );
        shape.float_phase = 1.3;
        let motion = MotionConfig::default();
        for frame in 0..5_000 {
            shape.update(frame as f32 / 60.0, Vec2::new(1.0, -1.0), &motion);
            let d = shape.position - shape.home;
            assert!(d.y.abs() <= motion.float_amplitude + 1e-5);
            assert!(d.x.abs() <= motion.drift_bound);
            assert_eq!(d.z, 0.0);
        }
    }

    #[test]
    fn every_axis_is_contained() {
        let mut shape =
            DecorativeShape::new(ShapeKind::Tetrahedron, Vec3::ZERO, 1.0, Vec3::ONE);
        shape.float_phase = 0.4;
        // Bob larger than the bound: containment must still hold
        let motion = MotionConfig {
            float_amplitude: 4.0,
            drift_bound: 1.0,
            pointer_influence: 20.0,
            pointer_follow: 0.5,
            ..MotionConfig::default()
        };
        for frame in 0..600 {
            shape.update(frame as f32 / 60.0, Vec2::new(1.0, 0.0), &motion);
            let d = shape.position - shape.home;
            assert!(d.abs().max_element() <= motion.drift_bound, "frame {} {:?}", frame, d);
        }
    }
}
