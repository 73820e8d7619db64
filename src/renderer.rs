use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::config::SceneConfig;
use crate::core::{GpuContext, Viewport};
use crate::mesh::{Material, Renderable};
use crate::scene::Scene;
use crate::traits::FrameRenderer;
use crate::types::TimeUniform;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const FACE_NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const CENTER_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];
const DELAY_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32];

/// One uploaded mesh: its pipeline, parallel vertex buffers and `time` uniform
struct GpuMesh {
    pipeline: wgpu::RenderPipeline,
    vertex_buffers: Vec<wgpu::Buffer>,
    vertex_count: u32,
    time_buffer: wgpu::Buffer,
    time_bind_group: wgpu::BindGroup,
}

/// Draws the scene's meshes to a window surface with wgpu
pub struct SceneRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Upload every mesh of `scene` and configure the surface to its viewport
    pub async fn new(window: Arc<Window>, scene: &Scene, config: &SceneConfig) -> Result<Self> {
        let (gpu, surface) = GpuContext::for_window(window.clone()).await?;

        let surface_config = gpu.surface_config(&surface, scene.viewport());
        surface.configure(gpu.device(), &surface_config);
        info!(
            "Surface configured: {}x{} {:?}",
            surface_config.width, surface_config.height, surface_config.format
        );

        // Clear values are linear; sRGB targets encode them on store
        let [r, g, b, a] = if surface_config.format.is_srgb() {
            config.clear_rgba_linear()
        } else {
            config.clear_rgba()
        };
        let clear_color = wgpu::Color { r, g, b, a };

        let depth_view = Self::create_depth_view(gpu.device(), &surface_config);

        let camera_layout = Self::create_uniform_layout(gpu.device(), "Camera Bind Group Layout");
        let time_layout = Self::create_uniform_layout(gpu.device(), "Time Bind Group Layout");

        let camera_buffer = gpu.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[scene.camera().to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = gpu.device().create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &time_layout],
            push_constant_ranges: &[],
        });

        let meshes = scene
            .meshes()
            .iter()
            .map(|mesh| {
                Self::upload_mesh(
                    gpu.device(),
                    mesh.object(),
                    &pipeline_layout,
                    &time_layout,
                    surface_config.format,
                )
            })
            .collect();

        Ok(Self {
            window,
            gpu,
            surface,
            surface_config,
            depth_view,
            camera_buffer,
            camera_bind_group,
            meshes,
            clear_color,
        })
    }

    fn upload_mesh(
        device: &wgpu::Device,
        object: &Renderable,
        pipeline_layout: &wgpu::PipelineLayout,
        time_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> GpuMesh {
        let label = object.material.shader.label();

        let mut streams: Vec<&[f32]> = vec![object.geometry.positions()];
        if let Some(attributes) = &object.attributes {
            streams.push(&attributes.face_normals);
            streams.push(&attributes.centers);
            streams.push(&attributes.delays);
        }

        let vertex_buffers = streams
            .into_iter()
            .map(|data| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(data),
                    usage: wgpu::BufferUsages::VERTEX,
                })
            })
            .collect();

        let time_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Time Buffer"),
            contents: bytemuck::cast_slice(&[object.material.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let time_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Time Bind Group"),
            layout: time_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: time_buffer.as_entire_binding(),
            }],
        });

        let pipeline = Self::create_pipeline(
            device,
            pipeline_layout,
            &object.material,
            object.attributes.is_some(),
            format,
        );

        debug!("Uploaded {} mesh: {} vertices", label, object.vertex_count());

        GpuMesh {
            pipeline,
            vertex_buffers,
            vertex_count: object.vertex_count(),
            time_buffer,
            time_bind_group,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        material: &Material,
        face_attributes: bool,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let label = material.shader.label();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(material.shader_source()),
        });

        let mut buffers = vec![vec3_layout(&POSITION_ATTRIBUTES)];
        if face_attributes {
            buffers.push(vec3_layout(&FACE_NORMAL_ATTRIBUTES));
            buffers.push(vec3_layout(&CENTER_ATTRIBUTES));
            buffers.push(wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<f32>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &DELAY_ATTRIBUTES,
            });
        }

        let blend = if material.transparent {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: if material.double_sided {
                    None
                } else {
                    Some(wgpu::Face::Back)
                },
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: material.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
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
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
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

    /// Reconfigure the swapchain and depth buffer to `width` x `height`
    fn configure(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), &self.surface_config);
    }

    fn write_uniforms(&self, scene: &Scene) {
        let queue = self.gpu.queue();
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[scene.camera().to_uniform()]),
        );

        for (gpu_mesh, mesh) in self.meshes.iter().zip(scene.meshes()) {
            let uniform: TimeUniform = mesh.object().material.uniform();
            queue.write_buffer(&gpu_mesh.time_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

fn vec3_layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

impl FrameRenderer for SceneRenderer {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // The platform forced a new swapchain before the debounced
                // resize landed; match the window without touching the camera
                let size = self.window.inner_size();
                if size.width > 0 && size.height > 0 {
                    warn!("Surface outdated, reconfiguring to {}x{}", size.width, size.height);
                    self.configure(size.width, size.height);
                }
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => {
                error!("Surface error: {}", e);
                return Err(anyhow!("Surface error: {}", e));
            }
        };

        self.write_uniforms(scene);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for mesh in &self.meshes {
                render_pass.set_pipeline(&mesh.pipeline);
                render_pass.set_bind_group(1, &mesh.time_bind_group, &[]);
                for (slot, buffer) in mesh.vertex_buffers.iter().enumerate() {
                    render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
                }
                render_pass.draw(0..mesh.vertex_count, 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.configure(viewport.width, viewport.height);
    }
}
