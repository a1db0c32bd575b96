use wgpu::util::DeviceExt;
use wgpu::{BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, TextureFormat};

use crate::scene::{Material, Mesh};
use crate::types::{MeshInstance, MeshVertex};

use super::buffer::StreamBuffer;
use super::DEPTH_FORMAT;

const MESH_SHADER: &str = include_str!("../shaders/mesh.wgsl");

/// Default shininess for flat meshes; unused by the shader when unlit.
const UNLIT_SHININESS: f32 = 1.0;

/// Unit cube centered on the origin: 24 vertices (4 per face, so every face
/// keeps its own normal) and 36 indices, counter-clockwise from outside.
pub fn unit_cube() -> (Vec<MeshVertex>, Vec<u16>) {
    // (normal, tangent u, tangent v) per face; u x v == normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [0, 1, 2].map(|i| 0.5 * (normal[i] + su * u[i] + sv * v[i]));
            vertices.push(MeshVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Instance data for one scene mesh.
pub fn instance_for(mesh: &Mesh) -> MeshInstance {
    let model = mesh.transform.matrix() * glam::Mat4::from_scale(mesh.geometry.size());
    match mesh.material {
        Material::Lit { color, shininess } => MeshInstance::new(model, color, true, shininess),
        other => MeshInstance::new(model, other.color(), false, UNLIT_SHININESS),
    }
}

/// Instanced box pipeline covering both flat and lit materials.
pub struct MeshPipeline {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    instances: StreamBuffer,
    instance_count: u32,
}

impl MeshPipeline {
    pub fn new(device: &Device, format: TextureFormat, globals_layout: &BindGroupLayout) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[globals_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc(), MeshInstance::desc()],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
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

        let (vertices, indices) = unit_cube();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instances: StreamBuffer::new(device, "mesh_instances", wgpu::BufferUsages::VERTEX),
            instance_count: 0,
        }
    }

    /// Uploads this frame's mesh instances.
    pub fn prepare<'a>(&mut self, device: &Device, queue: &Queue, meshes: impl Iterator<Item = &'a Mesh>) {
        let instances: Vec<MeshInstance> = meshes.map(instance_for).collect();
        self.instances.write(device, queue, bytemuck::cast_slice(&instances));
        self.instance_count = instances.len() as u32;
    }

    pub fn draw(&self, pass: &mut RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_has_24_vertices_and_12_triangles() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn cube_fits_unit_extent() {
        let (vertices, _) = unit_cube();
        for v in &vertices {
            for c in v.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let (vertices, indices) = unit_cube();
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!(face_normal.dot(normal) > 0.99);
        }
    }

    #[test]
    fn geometry_size_scales_model() {
        use crate::scene::BoxGeometry;
        let mesh = Mesh::new(BoxGeometry::new(2.0, 1.0, 1.0), Material::Basic { color: [1.0; 3] });
        let instance = instance_for(&mesh);
        assert_eq!(instance.model[0][0], 2.0);
        assert_eq!(instance.shading[0], 0.0);
    }
}
