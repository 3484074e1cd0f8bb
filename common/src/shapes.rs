//! Shared shape rendering for all simulations
//!
//! Simulations accumulate primitives into a [`DrawList`] each frame; the
//! [`ShapeRenderer`] uploads the list into fixed-capacity GPU buffers and
//! draws it in four passes: solid triangles, lines, instanced circles, and
//! finally lines that must appear above the circles (drag guides).

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::{Camera2D, CameraUniform, GraphicsContext};

/// Instance data for a filled circle
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x2,
        3 => Float32,
        4 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad corner vertex for instanced circle rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Vertex for line and triangle primitives
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad corners
const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

fn vertex(position: Vec2, color: [f32; 4]) -> ColorVertex {
    ColorVertex {
        position: [position.x, position.y],
        color,
    }
}

/// CPU-side accumulation of one frame's shapes
#[derive(Default)]
pub struct DrawList {
    pub circles: Vec<CircleInstance>,
    pub lines: Vec<ColorVertex>,
    pub triangles: Vec<ColorVertex>,
    pub top_lines: Vec<ColorVertex>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.circles.clear();
        self.lines.clear();
        self.triangles.clear();
        self.top_lines.clear();
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.circles.push(CircleInstance {
            center: [center.x, center.y],
            radius,
            color,
        });
    }

    pub fn line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]) {
        self.lines.push(vertex(a, color));
        self.lines.push(vertex(b, color));
    }

    /// Line with per-endpoint colors, used for fading trails
    pub fn line_gradient(&mut self, a: Vec2, color_a: [f32; 4], b: Vec2, color_b: [f32; 4]) {
        self.lines.push(vertex(a, color_a));
        self.lines.push(vertex(b, color_b));
    }

    /// Line drawn above the circle pass
    pub fn top_line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]) {
        self.top_lines.push(vertex(a, color));
        self.top_lines.push(vertex(b, color));
    }

    pub fn rect_outline(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        let corners = [
            pos,
            pos + Vec2::new(size.x, 0.0),
            pos + size,
            pos + Vec2::new(0.0, size.y),
        ];
        for i in 0..4 {
            self.line(corners[i], corners[(i + 1) % 4], color);
        }
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.triangles.push(vertex(a, color));
        self.triangles.push(vertex(b, color));
        self.triangles.push(vertex(c, color));
    }

    /// Triangle with per-vertex colors, used for shaded fluid bands
    pub fn triangle_gradient(
        &mut self,
        a: (Vec2, [f32; 4]),
        b: (Vec2, [f32; 4]),
        c: (Vec2, [f32; 4]),
    ) {
        self.triangles.push(vertex(a.0, a.1));
        self.triangles.push(vertex(b.0, b.1));
        self.triangles.push(vertex(c.0, c.1));
    }

    pub fn solid_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        let a = pos;
        let b = pos + Vec2::new(size.x, 0.0);
        let c = pos + size;
        let d = pos + Vec2::new(0.0, size.y);
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }

    /// Rectangle rotated by `angle` around `origin` (in local rect space),
    /// placed with that origin at `pos`. Used for the cannon barrel.
    pub fn solid_rect_rotated(
        &mut self,
        pos: Vec2,
        size: Vec2,
        origin: Vec2,
        angle: f32,
        color: [f32; 4],
    ) {
        let (sin, cos) = angle.sin_cos();
        let rotate = |local: Vec2| {
            let p = local - origin;
            pos + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
        };
        let a = rotate(Vec2::ZERO);
        let b = rotate(Vec2::new(size.x, 0.0));
        let c = rotate(size);
        let d = rotate(Vec2::new(0.0, size.y));
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }
}

/// Draw counts for one uploaded frame
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawCounts {
    pub circles: u32,
    pub line_vertices: u32,
    pub triangle_vertices: u32,
    pub top_line_vertices: u32,
}

/// Renders a [`DrawList`] with one shader and three pipelines
pub struct ShapeRenderer {
    circle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    circle_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    triangle_buffer: wgpu::Buffer,
    top_line_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_circles: usize,
    max_flat_vertices: usize,
}

impl ShapeRenderer {
    /// `max_circles` and `max_flat_vertices` cap the per-frame primitive
    /// counts; anything past a cap is dropped, never a panic.
    pub fn new(ctx: &GraphicsContext, max_circles: usize, max_flat_vertices: usize) -> Self {
        let device = &ctx.device;

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shapes Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shapes.wgsl").into()),
        });

        // Camera uniform buffer
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shapes Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let color_target = [Some(wgpu::ColorTargetState {
            format: ctx.config.format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        // Circle render pipeline (instanced quads, coverage in the fragment)
        let circle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Circle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_circle",
                buffers: &[QuadVertex::layout(), CircleInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_circle",
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Line render pipeline
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_flat",
                buffers: &[ColorVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_flat",
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Solid triangle render pipeline
        let triangle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Triangle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_flat",
                buffers: &[ColorVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_flat",
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Quad vertex buffer
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let flat_size = (std::mem::size_of::<ColorVertex>() * max_flat_vertices) as u64;
        let make_flat_buffer = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: flat_size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        let circle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Circle Buffer"),
            size: (std::mem::size_of::<CircleInstance>() * max_circles) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let line_buffer = make_flat_buffer("Line Buffer");
        let triangle_buffer = make_flat_buffer("Triangle Buffer");
        let top_line_buffer = make_flat_buffer("Top Line Buffer");

        Self {
            circle_pipeline,
            line_pipeline,
            triangle_pipeline,
            quad_buffer,
            circle_buffer,
            line_buffer,
            triangle_buffer,
            top_line_buffer,
            camera_buffer,
            camera_bind_group,
            max_circles,
            max_flat_vertices,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload a draw list, truncating at the buffer capacities
    pub fn upload(&self, queue: &wgpu::Queue, list: &DrawList) -> DrawCounts {
        let circles = list.circles.len().min(self.max_circles);
        if circles > 0 {
            queue.write_buffer(
                &self.circle_buffer,
                0,
                bytemuck::cast_slice(&list.circles[..circles]),
            );
        }

        let upload_flat = |buffer: &wgpu::Buffer, vertices: &[ColorVertex]| {
            let count = vertices.len().min(self.max_flat_vertices);
            if count > 0 {
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(&vertices[..count]));
            }
            count as u32
        };

        DrawCounts {
            circles: circles as u32,
            line_vertices: upload_flat(&self.line_buffer, &list.lines),
            triangle_vertices: upload_flat(&self.triangle_buffer, &list.triangles),
            top_line_vertices: upload_flat(&self.top_line_buffer, &list.top_lines),
        }
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        counts: &DrawCounts,
        clear_color: wgpu::Color,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shapes Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        // Backgrounds first, then trails/outlines, bodies, and guides on top
        if counts.triangle_vertices > 0 {
            render_pass.set_pipeline(&self.triangle_pipeline);
            render_pass.set_vertex_buffer(0, self.triangle_buffer.slice(..));
            render_pass.draw(0..counts.triangle_vertices, 0..1);
        }

        if counts.line_vertices > 0 {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(0..counts.line_vertices, 0..1);
        }

        if counts.circles > 0 {
            render_pass.set_pipeline(&self.circle_pipeline);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.circle_buffer.slice(..));
            render_pass.draw(0..6, 0..counts.circles);
        }

        if counts.top_line_vertices > 0 {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.top_line_buffer.slice(..));
            render_pass.draw(0..counts.top_line_vertices, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_outline_closes_the_loop() {
        let mut list = DrawList::default();
        list.rect_outline(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0), [1.0; 4]);

        assert_eq!(list.lines.len(), 8);
        // Last segment ends where the first began
        assert_eq!(list.lines[7].position, list.lines[0].position);
    }

    #[test]
    fn solid_rect_emits_two_triangles() {
        let mut list = DrawList::default();
        list.solid_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), [1.0; 4]);
        assert_eq!(list.triangles.len(), 6);
    }

    #[test]
    fn rotated_rect_keeps_its_origin_fixed() {
        let mut list = DrawList::default();
        let pos = Vec2::new(50.0, 580.0);
        let origin = Vec2::new(0.0, 10.0);
        list.solid_rect_rotated(pos, Vec2::new(50.0, 20.0), origin, 0.7, [1.0; 4]);

        // The corner at the rotation origin's x row: local (0,0) is at
        // distance |origin| from pos regardless of angle.
        let first = Vec2::new(list.triangles[0].position[0], list.triangles[0].position[1]);
        assert!((first.distance(pos) - origin.length()).abs() < 1e-3);
    }
}
