use std::iter;

use wgpu::{DepthStencilState, RenderPipeline, TextureFormat};

use crate::{
    error::RenderError,
    gfx::{
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            texture_resource::TextureResource,
        },
        scene::{DrawMesh, Scene, Vertex3D},
    },
    wgpu_utils::binding_types,
};

/// What happened to a frame submitted through [`RenderEngine::render_frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Presented,
    /// Surface was lost or outdated and has been reconfigured; try again next frame.
    Reconfigured,
    /// Transient failure; nothing was drawn.
    Skipped,
    /// The device ran out of memory; the application should exit.
    Fatal,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,

    fill_pipeline: RenderPipeline,
    // None when the adapter cannot rasterize lines
    wireframe_pipeline: Option<RenderPipeline>,
    wireframe: bool,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    model_layout: wgpu::BindGroupLayout,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 4],
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "using adapter {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if wireframe_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            log::warn!("adapter lacks POLYGON_MODE_LINE, wireframe mode disabled");
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features,
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // GLOBAL UNIFORMS - CAMERA, GROUP 0
        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        // PER-MESH MODEL MATRIX, GROUP 1
        let model_layout = binding_types::vertex_uniform_layout(&device, "Model Bind Group Layout");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[global_bindings.bind_group_layout(), &model_layout],
            push_constant_ranges: &[],
        });

        let fill_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PolygonMode::Fill,
        );
        let wireframe_pipeline = wireframe_supported.then(|| {
            create_mesh_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                wgpu::PolygonMode::Line,
            )
        });

        let [r, g, b, a] = clear_color;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            clear_color: wgpu::Color { r, g, b, a },
            fill_pipeline,
            wireframe_pipeline,
            wireframe: false,
            global_ubo,
            global_bindings,
            model_layout,
        })
    }

    pub fn render_frame(&mut self, scene: &Scene) -> FrameStatus {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return FrameStatus::Reconfigured;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                return FrameStatus::Fatal;
            }
            Err(err) => {
                log::warn!("skipping frame: {}", err);
                return FrameStatus::Skipped;
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(self.active_pipeline());
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for mesh in scene.meshes() {
                render_pass.draw_mesh(mesh);
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        FrameStatus::Presented
    }

    /// Upload this frame's camera matrices and every mesh's model matrix
    pub fn update(&mut self, scene: &mut Scene) {
        update_global_ubo(&mut self.global_ubo, &self.queue, scene.camera().uniform());
        scene.sync_transforms(&self.queue);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Flip between filled and wireframe rasterization. Returns the new mode,
    /// `false` when wireframe is unsupported.
    pub fn toggle_wireframe(&mut self) -> bool {
        if self.wireframe_pipeline.is_none() {
            log::warn!("wireframe mode is not supported by this adapter");
            return false;
        }
        self.wireframe = !self.wireframe;
        log::info!(
            "polygon mode: {}",
            if self.wireframe { "line" } else { "fill" }
        );
        self.wireframe
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Layout every mesh's model bind group must be created with
    pub fn model_layout(&self) -> &wgpu::BindGroupLayout {
        &self.model_layout
    }

    fn active_pipeline(&self) -> &RenderPipeline {
        match (&self.wireframe_pipeline, self.wireframe) {
            (Some(pipeline), true) => pipeline,
            _ => &self.fill_pipeline,
        }
    }
}

fn create_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: TextureFormat,
    polygon_mode: wgpu::PolygonMode,
) -> RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(match polygon_mode {
            wgpu::PolygonMode::Fill => "Mesh Pipeline (fill)",
            _ => "Mesh Pipeline (line)",
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Generated windings are not uniformly outward
            cull_mode: None,
            polygon_mode,
            conservative: false,
            unclipped_depth: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
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
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}
