//! Rendering system with wgpu pipelines for the fading scope trace.
//!
//! Frames accumulate in an offscreen trail texture: every new frame first
//! darkens the trail with a translucent black quad, then draws the polylines
//! on top. The trail is copied to the swapchain on every redraw, which also
//! makes it the source for snapshots.

use bytemuck::{Pod, Zeroable};
use log::info;
use std::sync::{mpsc, Arc};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::controls::display_mode_label;
use crate::geometry::Point;
use crate::params::{DisplayMode, RenderConfig};
use crate::scheduler::{Frame, Renderer};
use crate::snapshot::SnapshotError;

/// Base window title; live overlay text is appended to it
pub const WINDOW_TITLE: &str = "Hilbertscope";

/// Trail texture format (linear, read back directly for snapshots)
const TRAIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Pixel-space vertex with per-vertex color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Uniform buffer for the scope shader (viewport size in pixels)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub viewport: [f32; 2],
    pub _padding: [f32; 2], // Padding for alignment
}

/// Build vertices for a polyline drawn in a single color
pub fn polyline_vertices(points: &[Point], color: [f32; 4], out: &mut Vec<Vertex>) {
    out.clear();
    out.extend(points.iter().map(|&position| Vertex { position, color }));
}

/// Two triangles covering the viewport in translucent black
pub fn fade_quad(width: f32, height: f32, alpha: f32) -> [Vertex; 6] {
    let color = [0.0, 0.0, 0.0, alpha];
    let corner = |x: f32, y: f32| Vertex {
        position: [x, y],
        color,
    };
    [
        corner(0.0, 0.0),
        corner(width, 0.0),
        corner(width, height),
        corner(0.0, 0.0),
        corner(width, height),
        corner(0.0, height),
    ]
}

/// Format for the window title while `overlay` is live
pub fn window_title(overlay: Option<&str>) -> String {
    match overlay {
        Some(text) => format!("{} - {}", WINDOW_TITLE, text),
        None => WINDOW_TITLE.to_string(),
    }
}

/// Growable vertex buffer holding one polyline
struct PolylineBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl PolylineBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
            count: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.count = vertices.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count < 2 {
            return;
        }
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..self.count, 0..1);
    }
}

/// Offscreen texture the trace accumulates in
struct Trail {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl Trail {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Trail Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TRAIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Trail Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            }],
        });
        Self {
            texture,
            view,
            bind_group,
            width,
            height,
        }
    }
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    fade_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    blit_pipeline: wgpu::RenderPipeline,
    blit_bind_group_layout: wgpu::BindGroupLayout,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    fade_buffer: wgpu::Buffer,
    curve: PolylineBuffer,
    wave: PolylineBuffer,
    trail: Trail,
    scratch: Vec<Vertex>,

    render_config: RenderConfig,
    display_mode: DisplayMode,
    frozen: bool,
    /// A submitted frame has not been drawn into the trail yet
    pending: bool,
    /// Trail texture is fresh and must be cleared before use
    needs_clear: bool,
    overlay: Option<String>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<Window>,
        render_config: RenderConfig,
        block_size: usize,
    ) -> Result<Self, String> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to request device: {}", e))?;

        // Trail colors are stored unconverted, so prefer a linear swapchain
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!("Surface: {}x{} {:?}", width, height, surface_format);

        // Load shaders
        let scope_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scope Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scope.wgsl").into()),
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        // Create buffers
        let uniforms = Uniforms {
            viewport: [width as f32, height as f32],
            _padding: [0.0; 2],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let fade_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fade Buffer"),
            contents: bytemuck::cast_slice(&fade_quad(
                width as f32,
                height as f32,
                render_config.fade_alpha,
            )),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let curve = PolylineBuffer::new(&device, "Curve Buffer", block_size);
        let wave = PolylineBuffer::new(&device, "Wave Buffer", block_size.div_ceil(2));

        // Create scope bind group
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let scope_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scope Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        // Fade quad and polylines share the shader, differing only in topology
        let scope_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&scope_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &scope_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &scope_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TRAIL_FORMAT,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let fade_pipeline = scope_pipeline("Fade Pipeline", wgpu::PrimitiveTopology::TriangleList);
        let line_pipeline = scope_pipeline("Line Pipeline", wgpu::PrimitiveTopology::LineStrip);

        // Create blit bind group layout and pipeline
        let blit_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Blit Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                }],
            });

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_bind_group_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let trail = Trail::new(&device, &blit_bind_group_layout, width, height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            fade_pipeline,
            line_pipeline,
            blit_pipeline,
            blit_bind_group_layout,
            uniform_buffer,
            uniform_bind_group,
            fade_buffer,
            curve,
            wave,
            trail,
            scratch: Vec::with_capacity(block_size),
            render_config,
            display_mode: DisplayMode::default(),
            frozen: false,
            pending: false,
            needs_clear: true,
            overlay: None,
        })
    }

    /// Reconfigure the swapchain and start a fresh trail
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.trail = Trail::new(&self.device, &self.blit_bind_group_layout, width, height);
        self.needs_clear = true;

        let uniforms = Uniforms {
            viewport: [width as f32, height as f32],
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        self.queue.write_buffer(
            &self.fade_buffer,
            0,
            bytemuck::cast_slice(&fade_quad(
                width as f32,
                height as f32,
                self.render_config.fade_alpha,
            )),
        );
    }

    /// Reconfigure after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Current drawable size
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn set_overlay(&mut self, overlay: Option<&str>) {
        if self.overlay.as_deref() == overlay {
            return;
        }
        if let Some(text) = overlay {
            info!("{}", text);
        }
        self.overlay = overlay.map(str::to_string);
        self.window.set_title(&window_title(overlay));
    }

    /// Render a frame: advance the trail if a new frame arrived, then present it
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let advance = self.pending && !self.frozen;
        if advance || self.needs_clear {
            let load = if self.needs_clear {
                wgpu::LoadOp::Clear(wgpu::Color::BLACK)
            } else {
                wgpu::LoadOp::Load
            };

            let mut trail_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trail Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.trail.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if advance {
                trail_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

                // Fade previous frames
                trail_pass.set_pipeline(&self.fade_pipeline);
                trail_pass.set_vertex_buffer(0, self.fade_buffer.slice(..));
                trail_pass.draw(0..6, 0..1);

                trail_pass.set_pipeline(&self.line_pipeline);
                if self.display_mode.shows_curve() {
                    self.curve.draw(&mut trail_pass);
                }
                if self.display_mode.shows_wave() {
                    self.wave.draw(&mut trail_pass);
                }
            }
        }
        self.needs_clear = false;
        self.pending = false;

        {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &self.trail.bind_group, &[]);
            blit_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Read the trail texture back as tightly packed RGBA rows, top row first
    pub fn capture_trail(&self) -> Result<(u32, u32, Vec<u8>), SnapshotError> {
        let (width, height) = (self.trail.width, self.trail.height);
        let bytes_per_pixel = 4; // RGBA8
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        // Create buffer to read texture data
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Snapshot Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        // Copy texture to buffer
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Snapshot Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.trail.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and wait for the copy
        let buffer_slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| SnapshotError::Capture(e.to_string()))?
            .map_err(|e| SnapshotError::Capture(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let mut image_data = vec![0u8; (unpadded_bytes_per_row * height) as usize];

        // Remove padding
        for y in 0..height {
            let padded_offset = (y * padded_bytes_per_row) as usize;
            let unpadded_offset = (y * unpadded_bytes_per_row) as usize;
            image_data[unpadded_offset..unpadded_offset + unpadded_bytes_per_row as usize]
                .copy_from_slice(
                    &data[padded_offset..padded_offset + unpadded_bytes_per_row as usize],
                );
        }

        drop(data);
        buffer.unmap();

        Ok((width, height, image_data))
    }
}

impl Renderer for RenderSystem {
    fn submit(&mut self, frame: &Frame<'_>) {
        self.set_overlay(frame.overlay);

        if frame.frozen != self.frozen {
            info!("Display {}", if frame.frozen { "frozen" } else { "resumed" });
        }
        self.frozen = frame.frozen;
        if frame.frozen {
            return;
        }

        if frame.display_mode != self.display_mode {
            info!("Display mode: {}", display_mode_label(frame.display_mode));
            self.display_mode = frame.display_mode;
        }

        polyline_vertices(frame.curve, frame.color, &mut self.scratch);
        self.curve.upload(&self.device, &self.queue, &self.scratch);

        let [r, g, b] = self.render_config.wave_color;
        polyline_vertices(
            frame.wave,
            [r, g, b, self.render_config.line_alpha],
            &mut self.scratch,
        );
        self.wave.upload(&self.device, &self.queue, &self.scratch);

        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_shader() {
        // vec2<f32> position + vec4<f32> color
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
    }

    #[test]
    fn test_polyline_vertices_carry_color() {
        let mut out = vec![Vertex::zeroed(); 3];
        polyline_vertices(&[[1.0, 2.0], [3.0, 4.0]], [0.1, 0.2, 0.3, 0.8], &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].position, [3.0, 4.0]);
        assert!(out.iter().all(|v| v.color == [0.1, 0.2, 0.3, 0.8]));
    }

    #[test]
    fn test_fade_quad_covers_viewport() {
        let quad = fade_quad(600.0, 400.0, 0.1);
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();

        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 600.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 400.0);
        assert!(quad.iter().all(|v| v.color == [0.0, 0.0, 0.0, 0.1]));
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(None), "Hilbertscope");
        assert_eq!(window_title(Some("Scale: 0.042")), "Hilbertscope - Scale: 0.042");
    }
}
