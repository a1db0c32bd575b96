use wgpu::{BindGroupLayout, Device, Queue, RenderPass, RenderPipeline, TextureFormat};

use crate::scene::LineSegment;
use crate::types::LineVertex;

use super::buffer::StreamBuffer;
use super::DEPTH_FORMAT;

const LINE_SHADER: &str = include_str!("../shaders/line.wgsl");

/// Two vertices per segment, in the order given.
pub fn line_vertices<'a>(lines: impl Iterator<Item = &'a LineSegment>) -> Vec<LineVertex> {
    lines
        .flat_map(|line| {
            let color = line.color();
            [
                LineVertex {
                    position: line.start.to_array(),
                    color,
                },
                LineVertex {
                    position: line.end.to_array(),
                    color,
                },
            ]
        })
        .collect()
}

/// Line-list pipeline; all live segments go out in one draw.
pub struct LinePipeline {
    pipeline: RenderPipeline,
    vertices: StreamBuffer,
    vertex_count: u32,
}

impl LinePipeline {
    pub fn new(device: &Device, format: TextureFormat, globals_layout: &BindGroupLayout) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pipeline_layout"),
            bind_group_layouts: &[globals_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[LineVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            vertices: StreamBuffer::new(device, "line_vertices", wgpu::BufferUsages::VERTEX),
            vertex_count: 0,
        }
    }

    /// Uploads this frame's segments.
    pub fn prepare<'a>(&mut self, device: &Device, queue: &Queue, lines: impl Iterator<Item = &'a LineSegment>) {
        let vertices = line_vertices(lines);
        self.vertices.write(device, queue, bytemuck::cast_slice(&vertices));
        self.vertex_count = vertices.len() as u32;
    }

    pub fn draw(&self, pass: &mut RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SegmentId;
    use glam::Vec3;

    #[test]
    fn two_vertices_per_segment() {
        let lines = [
            LineSegment::new(SegmentId(1), Vec3::ZERO, Vec3::X, [1.0, 0.0, 0.0]),
            LineSegment::new(SegmentId(2), Vec3::Y, Vec3::Z, [0.0, 1.0, 0.0]),
        ];
        let vertices = line_vertices(lines.iter());

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].position, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[3].position, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[3].color, [0.0, 1.0, 0.0]);
    }
}
