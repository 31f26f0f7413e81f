use super::camera::{Camera, CameraRig, Viewport};
use super::config::{ConfigError, FieldConfig};
use super::constants::{MAX_FRAME_DT_SEC, PARTICLE_ALPHA};
use super::lines::{LineBuffer, Segment};
use super::palette::{ColorMode, Palette};
use super::particles::{ParticleField, SpawnParams};
use super::pointer::PointerState;
use super::shapes::DecorativeShape;
use super::volume::Volume;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// All scene state owned by one renderer instance.
///
/// Input handlers write pointer, scroll and viewport; `step` advances one
/// frame. Nothing here touches the GPU, so the whole update is testable on
/// the host.
pub struct FieldState {
    config: FieldConfig,
    viewport: Viewport,
    camera: Camera,
    rig: CameraRig,
    pointer: PointerState,
    scroll_y: f32,
    particles: ParticleField,
    layers: Vec<ParticleField>,
    shapes: Vec<DecorativeShape>,
    shape_segments: Vec<Segment>,
    lines: Option<LineBuffer>,
    elapsed: f32,
    frames: u64,
}

impl FieldState {
    pub fn new(
        config: &FieldConfig,
        viewport: Viewport,
        mobile_agent: bool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let palette = Palette::from_hex(&config.palette, config.color_mode)?;
        let count = config.effective_particle_count(viewport.width, mobile_agent);
        let particles = ParticleField::spawn(
            count,
            &SpawnParams {
                volume: config.volume,
                center: Vec3::from(config.center),
                palette: &palette,
                size: config.particle_size,
                drift_speed: config.motion.drift_speed,
                float_frequency: config.motion.float_frequency,
                spin: Vec2::from(config.motion.group_rotation),
                alpha: PARTICLE_ALPHA,
            },
            &mut rng,
        );

        let mobile = config.is_mobile(viewport.width, mobile_agent);
        let mut layers = Vec::with_capacity(config.layers.len());
        for layer in config.layers.iter().filter(|l| l.count > 0) {
            let layer_palette = Palette::from_hex(&layer.palette, layer.color_mode)?;
            let count = if mobile { layer.count / 2 } else { layer.count };
            layers.push(ParticleField::spawn(
                count,
                &SpawnParams {
                    volume: layer.volume.unwrap_or(config.volume),
                    center: Vec3::from(config.center),
                    palette: &layer_palette,
                    size: layer.particle_size,
                    drift_speed: config.motion.drift_speed,
                    float_frequency: config.motion.float_frequency,
                    spin: Vec2::from(layer.group_rotation),
                    alpha: layer.alpha,
                },
                &mut rng,
            ));
        }

        let shapes = if config.shapes.count > 0 {
            let shape_palette = Palette::from_hex(&config.shapes.palette, ColorMode::Pick)?;
            DecorativeShape::spawn(
                config.shapes.count,
                Volume::Box {
                    half_extents: config.shapes.spread,
                },
                Vec3::from(config.shapes.center),
                config.shapes.scale,
                &shape_palette,
                &mut rng,
            )
        } else {
            Vec::new()
        };
        let edge_total = shapes.iter().map(DecorativeShape::edge_count).sum();

        let lines = config.lines.enabled.then(|| {
            LineBuffer::new(
                config.lines.capacity,
                config.lines.threshold,
                palette.colors()[0],
                config.lines.opacity,
            )
        });

        log::info!(
            "[field] particles={} layers={} shapes={} lines={}",
            particles.len(),
            layers.iter().map(ParticleField::len).sum::<usize>(),
            shapes.len(),
            lines.as_ref().map_or(0, LineBuffer::capacity)
        );

        let mut state = Self {
            config: config.clone(),
            viewport,
            camera: Camera::from_config(config, &viewport),
            rig: CameraRig::from_config(config),
            pointer: PointerState::new(config.pointer_smoothing),
            scroll_y: 0.0,
            particles,
            layers,
            shapes,
            shape_segments: Vec::with_capacity(edge_total),
            lines,
            elapsed: 0.0,
            frames: 0,
        };
        state.refresh_shape_segments();
        Ok(state)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Secondary layers, drawn with the main field but never connected by lines.
    pub fn layers(&self) -> &[ParticleField] {
        &self.layers
    }

    /// Main field followed by every layer, in draw order.
    pub fn point_sets(&self) -> impl Iterator<Item = &ParticleField> {
        std::iter::once(&self.particles).chain(&self.layers)
    }

    pub fn point_count(&self) -> usize {
        self.point_sets().map(ParticleField::len).sum()
    }

    pub fn shapes(&self) -> &[DecorativeShape] {
        &self.shapes
    }

    pub fn shape_segments(&self) -> &[Segment] {
        &self.shape_segments
    }

    pub fn lines(&self) -> Option<&LineBuffer> {
        self.lines.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.pointer
            .set_client(client_x, client_y, self.viewport.width, self.viewport.height);
    }

    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer.set_raw(ndc);
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
    }

    /// Update the projection for a new viewport. The particle set is kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(&viewport);
    }

    pub fn step(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.frames += 1;

        let pointer = self.pointer.step();
        self.rig.apply(&mut self.camera, pointer, self.scroll_y);

        let motion = &self.config.motion;
        self.particles.update(self.elapsed, pointer, motion);
        for layer in &mut self.layers {
            layer.update(self.elapsed, pointer, motion);
        }
        for shape in &mut self.shapes {
            shape.update(self.elapsed, pointer, motion);
        }
        self.refresh_shape_segments();

        if let Some(lines) = &mut self.lines {
            let candidates = self.config.lines.max_particles.min(self.particles.len());
            lines.rebuild(&self.particles.world_positions()[..candidates]);
        }
    }

    /// `(view, projection)` for the current camera.
    pub fn matrices(&self) -> (Mat4, Mat4) {
        (self.camera.view_matrix(), self.camera.projection_matrix())
    }

    fn refresh_shape_segments(&mut self) {
        self.shape_segments.clear();
        for shape in &self.shapes {
            shape.write_segments(&mut self.shape_segments);
        }
    }
}
