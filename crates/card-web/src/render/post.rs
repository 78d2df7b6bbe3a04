//! Bloom post-processing chain: bright-pass into the half-res target,
//! separable blur ping-pong, then composite + tonemap onto the swapchain.

use card_core::{BLOOM_STRENGTH, BLOOM_THRESHOLD};

use super::targets::{RenderTargets, HDR_FORMAT};

const EXPOSURE: f32 = 1.15;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
    exposure: f32,
    _pad: f32,
}

impl PostUniforms {
    fn with_dir(width: u32, height: u32, blur_dir: [f32; 2]) -> Self {
        Self {
            resolution: [width as f32 / 2.0, height as f32 / 2.0],
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            exposure: EXPOSURE,
            _pad: 0.0,
        }
    }
}

/// Queue writes land before the whole submit, so each pass that needs its
/// own blur direction gets its own uniform buffer instead of rewriting one
/// buffer between encoded passes.
pub struct PostResources {
    bgl0: wgpu::BindGroupLayout, // source texture + sampler + uniforms
    bgl1: wgpu::BindGroupLayout, // second texture + sampler for the composite
    uniforms_plain: wgpu::Buffer,
    uniforms_blur_h: wgpu::Buffer,
    uniforms_blur_v: wgpu::Buffer,
    linear_sampler: wgpu::Sampler,

    bg_hdr: wgpu::BindGroup,
    bg_from_bloom_a: wgpu::BindGroup,
    bg_from_bloom_b: wgpu::BindGroup,
    bg_bloom_a_only: wgpu::BindGroup,

    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
}

impl PostResources {
    pub fn new(
        device: &wgpu::Device,
        targets: &RenderTargets,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(card_core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let make_uniforms = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let uniforms_plain = make_uniforms("post_uniforms_plain");
        let uniforms_blur_h = make_uniforms("post_uniforms_blur_h");
        let uniforms_blur_v = make_uniforms("post_uniforms_blur_v");

        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl_single"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl_composite"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str,
                             layout: &wgpu::PipelineLayout,
                             entry: &str,
                             format: wgpu::TextureFormat| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_fullscreen"),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let bright_pipeline = make_pipeline("bright_pipeline", &pl_single, "fs_bright", HDR_FORMAT);
        let blur_pipeline = make_pipeline("blur_pipeline", &pl_single, "fs_blur", HDR_FORMAT);
        let composite_pipeline = make_pipeline(
            "composite_pipeline",
            &pl_composite,
            "fs_composite",
            surface_format,
        );

        let (bg_hdr, bg_from_bloom_a, bg_from_bloom_b, bg_bloom_a_only) = build_bind_groups(
            device,
            &bgl0,
            &bgl1,
            (&uniforms_plain, &uniforms_blur_h, &uniforms_blur_v),
            &linear_sampler,
            targets,
        );

        Self {
            bgl0,
            bgl1,
            uniforms_plain,
            uniforms_blur_h,
            uniforms_blur_v,
            linear_sampler,
            bg_hdr,
            bg_from_bloom_a,
            bg_from_bloom_b,
            bg_bloom_a_only,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
        }
    }

    /// Rebind to freshly created targets after a resize.
    pub fn rebind(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        let (bg_hdr, bg_from_bloom_a, bg_from_bloom_b, bg_bloom_a_only) = build_bind_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            (
                &self.uniforms_plain,
                &self.uniforms_blur_h,
                &self.uniforms_blur_v,
            ),
            &self.linear_sampler,
            targets,
        );
        self.bg_hdr = bg_hdr;
        self.bg_from_bloom_a = bg_from_bloom_a;
        self.bg_from_bloom_b = bg_from_bloom_b;
        self.bg_bloom_a_only = bg_bloom_a_only;
    }

    /// Run the full chain: bright -> blur H -> blur V -> composite.
    pub fn run(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        swapchain_view: &wgpu::TextureView,
        width: u32,
        height: u32,
    ) {
        queue.write_buffer(
            &self.uniforms_plain,
            0,
            bytemuck::bytes_of(&PostUniforms::with_dir(width, height, [0.0, 0.0])),
        );
        queue.write_buffer(
            &self.uniforms_blur_h,
            0,
            bytemuck::bytes_of(&PostUniforms::with_dir(width, height, [1.0, 0.0])),
        );
        queue.write_buffer(
            &self.uniforms_blur_v,
            0,
            bytemuck::bytes_of(&PostUniforms::with_dir(width, height, [0.0, 1.0])),
        );

        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            &self.bright_pipeline,
            &self.bg_hdr,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            &self.blur_pipeline,
            &self.bg_from_bloom_a,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            &self.blur_pipeline,
            &self.bg_from_bloom_b,
            None,
        );
        blit(
            encoder,
            "composite",
            swapchain_view,
            &self.composite_pipeline,
            &self.bg_hdr,
            Some(&self.bg_bloom_a_only),
        );
    }
}

fn build_bind_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    (plain, blur_h, blur_v): (&wgpu::Buffer, &wgpu::Buffer, &wgpu::Buffer),
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> (
    wgpu::BindGroup,
    wgpu::BindGroup,
    wgpu::BindGroup,
    wgpu::BindGroup,
) {
    let make0 = |label: &str, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    };
    let bg_hdr = make0("bg_hdr", &targets.hdr_view, plain);
    let bg_from_bloom_a = make0("bg_from_bloom_a", &targets.bloom_a_view, blur_h);
    let bg_from_bloom_b = make0("bg_from_bloom_b", &targets.bloom_b_view, blur_v);
    let bg_bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_a_only"),
        layout: bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    (bg_hdr, bg_from_bloom_a, bg_from_bloom_b, bg_bloom_a_only)
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
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
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
