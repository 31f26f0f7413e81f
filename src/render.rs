use crate::scene::constants::MIN_SPRITE_PX;
use crate::scene::{FieldState, Segment};
use web_sys as web;

mod pipelines;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FieldUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    position: [f32; 3],
    size: f32,
    color: [f32; 4],
}

/// Element counts the vertex buffers are allocated for. Fixed for the
/// renderer's lifetime since the particle set never grows.
#[derive(Clone, Copy, Debug)]
pub struct GpuCapacity {
    pub particles: usize,
    pub line_segments: usize,
    pub shape_segments: usize,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points_pipeline: wgpu::RenderPipeline,
    lines_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    particle_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    shape_buffer: wgpu::Buffer,
    capacity: GpuCapacity,
    instances: Vec<ParticleInstance>,
    pixel_ratio: f32,
    released: bool,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        width: u32,
        height: u32,
        pixel_ratio: f32,
        capacity: GpuCapacity,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface: wgpu::Surface<'static> =
            instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("field_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let fallback_format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Palette colors are authored in sRGB already; a linear target keeps them as-is.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(fallback_format);
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipes = pipelines::create_field_pipelines(&device, format);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bg"),
            layout: &pipes.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let particle_buffer = vertex_buffer::<ParticleInstance>(
            &device,
            "particle_instances",
            capacity.particles,
        );
        let line_buffer = vertex_buffer::<Segment>(&device, "line_segments", capacity.line_segments);
        let shape_buffer =
            vertex_buffer::<Segment>(&device, "shape_segments", capacity.shape_segments);

        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            config.width,
            config.height,
            format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            points_pipeline: pipes.points,
            lines_pipeline: pipes.lines,
            uniform_buffer,
            bind_group,
            particle_buffer,
            line_buffer,
            shape_buffer,
            capacity,
            instances: Vec::with_capacity(capacity.particles),
            pixel_ratio,
            released: false,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        if self.released || width == 0 || height == 0 {
            return;
        }
        self.pixel_ratio = pixel_ratio;
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn reconfigure(&mut self) {
        if !self.released {
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, state: &FieldState) -> Result<(), wgpu::SurfaceError> {
        if self.released {
            return Ok(());
        }
        let (view_m, proj_m) = state.matrices();
        let uniforms = FieldUniforms {
            view: view_m.to_cols_array_2d(),
            proj: proj_m.to_cols_array_2d(),
            params: [
                self.config.height as f32,
                state.elapsed(),
                MIN_SPRITE_PX * self.pixel_ratio,
                state.config().fog.effective_density(),
            ],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.instances.clear();
        for field in state.point_sets() {
            let alpha = field.alpha();
            self.instances.extend(
                field
                    .particles()
                    .iter()
                    .zip(field.world_positions())
                    .map(|(p, w)| ParticleInstance {
                        position: w.to_array(),
                        size: p.size,
                        color: p.color.extend(alpha).to_array(),
                    }),
            );
        }
        self.instances.truncate(self.capacity.particles);
        let point_count = self.instances.len();
        if point_count > 0 {
            self.queue.write_buffer(
                &self.particle_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let shape_segments = state.shape_segments();
        let shape_count = shape_segments.len().min(self.capacity.shape_segments);
        if shape_count > 0 {
            self.queue.write_buffer(
                &self.shape_buffer,
                0,
                bytemuck::cast_slice(&shape_segments[..shape_count]),
            );
        }

        let mut line_count = 0;
        if let Some(lines) = state.lines() {
            // Upload the zeroed tail too so the GPU copy never holds stale lines.
            let upload = lines.segments().len().min(self.capacity.line_segments);
            if upload > 0 {
                self.queue.write_buffer(
                    &self.line_buffer,
                    0,
                    bytemuck::cast_slice(&lines.segments()[..upload]),
                );
            }
            line_count = lines.emitted().min(upload);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("field_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.lines_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            if shape_count > 0 {
                rpass.set_vertex_buffer(0, self.shape_buffer.slice(..));
                rpass.draw(0..(shape_count * 2) as u32, 0..1);
            }
            if line_count > 0 {
                rpass.set_vertex_buffer(0, self.line_buffer.slice(..));
                rpass.draw(0..(line_count * 2) as u32, 0..1);
            }

            if point_count > 0 {
                rpass.set_pipeline(&self.points_pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                rpass.draw(0..6, 0..point_count as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free GPU-side buffers. Safe to call more than once; later renders
    /// are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.particle_buffer.destroy();
        self.line_buffer.destroy();
        self.shape_buffer.destroy();
        self.uniform_buffer.destroy();
        self.instances = Vec::new();
        log::info!("[gpu] buffers released");
    }
}

/// Vertex buffer sized for `count` elements of `T` (at least one, since
/// empty slices cannot be bound).
fn vertex_buffer<T>(device: &wgpu::Device, label: &str, count: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (std::mem::size_of::<T>() * count.max(1)) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
