//! wgpu renderer for a [`Scene`] seen through a [`PerspectiveCamera`].
//!
//! One pass draws meshes then lines against a shared depth buffer; the
//! optional egui overlay goes on top in a second pass.

mod buffer;
mod lines;
mod mesh;
mod overlay;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::core::{GpuContext, RenderSurface};
use crate::scene::Scene;
use crate::types::GlobalUniforms;

pub use lines::{line_vertices, LinePipeline};
pub use mesh::{instance_for, unit_cube, MeshPipeline};
pub use overlay::{Overlay, OverlayStats};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub struct Renderer {
    gpu: GpuContext,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    meshes: MeshPipeline,
    lines: LinePipeline,
    overlay: Option<Overlay>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, with_overlay: bool) -> Result<Self> {
        let gpu = GpuContext::new(window.clone()).await?;
        let device = gpu.device();
        let (width, height) = gpu.size();

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::cast_slice(&[GlobalUniforms::new(glam::Mat4::IDENTITY, glam::Vec3::ZERO)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let meshes = MeshPipeline::new(device, gpu.format(), &globals_layout);
        let lines = LinePipeline::new(device, gpu.format(), &globals_layout);
        let depth_view = Self::create_depth_view(device, width, height);
        let overlay = with_overlay.then(|| Overlay::new(device, gpu.format(), &window));

        Ok(Self {
            gpu,
            depth_view,
            globals_buffer,
            globals_bind_group,
            meshes,
            lines,
            overlay,
        })
    }

    /// Forwards a window event to the overlay. Returns true when it was consumed.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match &mut self.overlay {
            Some(overlay) => overlay.handle_event(window, event),
            None => false,
        }
    }

    /// Reapplies the surface configuration after it was lost or became outdated.
    pub fn recover_surface(&self) {
        self.gpu.reconfigure();
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        window: &Window,
        stats: &OverlayStats,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let mut globals = GlobalUniforms::new(camera.view_projection(), camera.position);
        if let Some(light) = scene.light() {
            globals = globals.with_light(light.direction(), light.color, light.intensity);
        }

        let device = self.gpu.device();
        let queue = self.gpu.queue();
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));
        self.meshes.prepare(device, queue, scene.meshes());
        self.lines.prepare(device, queue, scene.lines());

        let output = self.gpu.surface().get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let [r, g, b] = scene.background();
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.meshes.draw(&mut pass);
            self.lines.draw(&mut pass);
        }

        if let Some(overlay) = &mut self.overlay {
            overlay.paint(device, queue, &mut encoder, &view, window, self.gpu.size(), stats);
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

impl RenderSurface for Renderer {
    fn surface_size(&self) -> (u32, u32) {
        self.gpu.size()
    }

    fn set_surface_size(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let (width, height) = self.gpu.size();
        self.depth_view = Self::create_depth_view(self.gpu.device(), width, height);
    }
}
