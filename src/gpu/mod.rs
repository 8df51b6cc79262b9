//! wgpu renderer for [`Frame`] draw-call lists.
//!
//! Each tick the frame's commands are flattened, in emission order, into
//! three instance streams (radial gradients, discs, stroke segments) plus a
//! batch list recording which contiguous run of instances belongs to which
//! pipeline. Replaying the batches in order preserves the painter's
//! layering of the simulation.

mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::frame::{DrawCmd, Frame, GradientStop, Rgba};

pub use shaders::{DISC_SHADER, GRADIENT_SHADER, SEGMENT_SHADER};

/// Segments used to tessellate a stroked circle outline.
const CIRCLE_SEGMENTS: usize = 48;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    time: f32,
    delta_time: f32,
    _padding: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DiscInstance {
    center: [f32; 2],
    /// x = fill radius, y = glow extent past the rim, both in pixels.
    radii: [f32; 2],
    fill: [f32; 4],
    glow: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SegmentInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    /// x = thickness in pixels, y unused.
    width: [f32; 2],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GradientInstance {
    center: [f32; 2],
    /// x = inner radius, y = outer radius.
    radii: [f32; 2],
    offsets: [f32; 4],
    colors: [[f32; 4]; 4],
}

const DISC_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x2, 1 => Float32x2, 2 => Float32x4, 3 => Float32x4
];
const SEGMENT_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x2, 1 => Float32x2, 2 => Float32x2, 3 => Float32x4
];
const GRADIENT_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    0 => Float32x2, 1 => Float32x2, 2 => Float32x4,
    3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Gradient,
    Disc,
    Segment,
}

/// A contiguous instance range drawn with one pipeline.
#[derive(Debug, Clone, Copy)]
struct Batch {
    kind: BatchKind,
    start: u32,
    end: u32,
}

/// Instance buffer that grows when a frame outgrows it.
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    label: &'static str,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        let capacity = 16 * 1024;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            label,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if bytes.len() as u64 > self.capacity {
            self.capacity = (bytes.len() as u64).next_power_of_two();
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: self.capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

/// GPU surface, pipelines and per-frame instance streams.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    gradient_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,
    segment_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    gradients: Vec<GradientInstance>,
    discs: Vec<DiscInstance>,
    segments: Vec<SegmentInstance>,
    gradient_buffer: InstanceBuffer,
    disc_buffer: InstanceBuffer,
    segment_buffer: InstanceBuffer,
    batches: Vec<Batch>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gravwell device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                time: 0.0,
                delta_time: 0.0,
                _padding: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let gradient_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            config.format,
            "Gradient Pipeline",
            GRADIENT_SHADER,
            std::mem::size_of::<GradientInstance>(),
            &GRADIENT_ATTRS,
        );
        let disc_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            config.format,
            "Disc Pipeline",
            DISC_SHADER,
            std::mem::size_of::<DiscInstance>(),
            &DISC_ATTRS,
        );
        let segment_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            config.format,
            "Segment Pipeline",
            SEGMENT_SHADER,
            std::mem::size_of::<SegmentInstance>(),
            &SEGMENT_ATTRS,
        );

        let gradient_buffer = InstanceBuffer::new(&device, "Gradient Instances");
        let disc_buffer = InstanceBuffer::new(&device, "Disc Instances");
        let segment_buffer = InstanceBuffer::new(&device, "Segment Instances");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            gradient_pipeline,
            disc_pipeline,
            segment_pipeline,
            uniform_buffer,
            uniform_bind_group,
            gradients: Vec::new(),
            discs: Vec::new(),
            segments: Vec::new(),
            gradient_buffer,
            disc_buffer,
            segment_buffer,
            batches: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Flatten a frame's commands into instance streams and upload them.
    pub fn prepare(&mut self, frame: &Frame) {
        self.gradients.clear();
        self.discs.clear();
        self.segments.clear();
        self.batches.clear();

        for cmd in frame.cmds() {
            match cmd {
                DrawCmd::RadialGradient {
                    center,
                    inner_radius,
                    outer_radius,
                    stops,
                } => {
                    if stops.is_empty() {
                        continue;
                    }
                    let (offsets, colors) = pack_stops(stops);
                    let start = self.gradients.len() as u32;
                    self.gradients.push(GradientInstance {
                        center: center.to_array(),
                        radii: [*inner_radius, *outer_radius],
                        offsets,
                        colors,
                    });
                    note_batch(&mut self.batches, BatchKind::Gradient, start, start + 1);
                }
                DrawCmd::Disc {
                    center,
                    radius,
                    color,
                    glow_radius,
                    glow_color,
                } => {
                    let start = self.discs.len() as u32;
                    self.discs.push(DiscInstance {
                        center: center.to_array(),
                        radii: [*radius, *glow_radius],
                        fill: color.to_array(),
                        glow: glow_color.to_array(),
                    });
                    note_batch(&mut self.batches, BatchKind::Disc, start, start + 1);
                }
                DrawCmd::Polyline {
                    points,
                    closed,
                    thickness,
                    color,
                } => {
                    if points.len() < 2 {
                        continue;
                    }
                    let start = self.segments.len() as u32;
                    let rgba = color.to_array();
                    for pair in points.windows(2) {
                        self.segments.push(SegmentInstance {
                            p0: pair[0].to_array(),
                            p1: pair[1].to_array(),
                            width: [*thickness, 0.0],
                            color: rgba,
                        });
                    }
                    if *closed {
                        self.segments.push(SegmentInstance {
                            p0: points[points.len() - 1].to_array(),
                            p1: points[0].to_array(),
                            width: [*thickness, 0.0],
                            color: rgba,
                        });
                    }
                    let end = self.segments.len() as u32;
                    note_batch(&mut self.batches, BatchKind::Segment, start, end);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    thickness,
                    color,
                } => {
                    let start = self.segments.len() as u32;
                    let rgba = color.to_array();
                    let step = std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
                    for i in 0..CIRCLE_SEGMENTS {
                        let a0 = i as f32 * step;
                        let a1 = a0 + step;
                        self.segments.push(SegmentInstance {
                            p0: [center.x + radius * a0.cos(), center.y + radius * a0.sin()],
                            p1: [center.x + radius * a1.cos(), center.y + radius * a1.sin()],
                            width: [*thickness, 0.0],
                            color: rgba,
                        });
                    }
                    let end = self.segments.len() as u32;
                    note_batch(&mut self.batches, BatchKind::Segment, start, end);
                }
            }
        }

        self.gradient_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&self.gradients));
        self.disc_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&self.discs));
        self.segment_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&self.segments));
    }

    fn update_uniforms(&mut self, time: f32, delta_time: f32) {
        let view_proj = Mat4::orthographic_rh(
            0.0,
            self.config.width as f32,
            self.config.height as f32,
            0.0,
            -1.0,
            1.0,
        );
        let uniforms = Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            time,
            delta_time,
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Replay the prepared batches onto the surface.
    pub fn render(&mut self, time: f32, delta_time: f32) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(time, delta_time);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            for batch in &self.batches {
                match batch.kind {
                    BatchKind::Gradient => {
                        render_pass.set_pipeline(&self.gradient_pipeline);
                        render_pass.set_vertex_buffer(0, self.gradient_buffer.buffer.slice(..));
                    }
                    BatchKind::Disc => {
                        render_pass.set_pipeline(&self.disc_pipeline);
                        render_pass.set_vertex_buffer(0, self.disc_buffer.buffer.slice(..));
                    }
                    BatchKind::Segment => {
                        render_pass.set_pipeline(&self.segment_pipeline);
                        render_pass.set_vertex_buffer(0, self.segment_buffer.buffer.slice(..));
                    }
                }
                render_pass.draw(0..6, batch.start..batch.end);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Merge a new instance range into the batch list, extending the previous
/// batch when it used the same pipeline.
fn note_batch(batches: &mut Vec<Batch>, kind: BatchKind, start: u32, end: u32) {
    if start == end {
        return;
    }
    match batches.last_mut() {
        Some(last) if last.kind == kind && last.end == start => last.end = end,
        _ => batches.push(Batch { kind, start, end }),
    }
}

/// Pad gradient stops out to the fixed four the shader expects.
fn pack_stops(stops: &[GradientStop]) -> ([f32; 4], [[f32; 4]; 4]) {
    let mut offsets = [1.0; 4];
    let mut colors = [Rgba::TRANSPARENT.to_array(); 4];
    let last = stops.len().min(4) - 1;
    for slot in 0..4 {
        let stop = &stops[slot.min(last)];
        offsets[slot] = if slot <= last { stop.offset } else { 1.0 };
        colors[slot] = stop.color.to_array();
    }
    (offsets, colors)
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    label: &str,
    shader_src: &str,
    stride: usize,
    attributes: &[wgpu::VertexAttribute],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: stride as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_stops_pads_with_last_color() {
        let stops = [
            GradientStop::new(0.0, Rgba::rgb(1.0, 0.0, 0.0)),
            GradientStop::new(0.5, Rgba::rgb(0.0, 1.0, 0.0)),
            GradientStop::new(1.0, Rgba::rgb(0.0, 0.0, 1.0)),
        ];
        let (offsets, colors) = pack_stops(&stops);
        assert_eq!(offsets, [0.0, 0.5, 1.0, 1.0]);
        assert_eq!(colors[3], colors[2]);
    }

    #[test]
    fn test_note_batch_merges_adjacent_same_kind() {
        let mut batches = Vec::new();
        note_batch(&mut batches, BatchKind::Disc, 0, 3);
        note_batch(&mut batches, BatchKind::Disc, 3, 5);
        note_batch(&mut batches, BatchKind::Segment, 0, 24);
        note_batch(&mut batches, BatchKind::Disc, 5, 6);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].end, 5);
        assert_eq!(batches[2].start, 5);
    }

    #[test]
    fn test_empty_range_is_dropped() {
        let mut batches = Vec::new();
        note_batch(&mut batches, BatchKind::Segment, 4, 4);
        assert!(batches.is_empty());
    }
}
