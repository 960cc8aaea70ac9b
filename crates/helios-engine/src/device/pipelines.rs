//! Program library + pipeline construction.
//!
//! The WGSL module `shaders/program.wgsl` plays the role of a default shader
//! library: it exposes the three entry points the loop binds by name
//! (`vMain`, `fMain`, `cMain`). Pipeline creation is wrapped in validation
//! error scopes so an unresolved entry point or malformed module surfaces as
//! a typed [`SetupError`] instead of an uncaptured device error.

use std::num::NonZeroU64;

use crate::render::uniforms::{FrameUniforms, QuadVertex};

use super::SetupError;

/// Vertex stage entry point in the program library.
pub const VERTEX_ENTRY: &str = "vMain";
/// Fragment stage entry point in the program library.
pub const FRAGMENT_ENTRY: &str = "fMain";
/// Compute stage entry point in the program library.
pub const COMPUTE_ENTRY: &str = "cMain";

/// Texel format of the off-screen image store (32-bit float per channel
/// RGBA). Written by the compute pass, read by the fragment stage.
pub const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

/// Compiles the WGSL program library.
pub fn create_program_library(device: &wgpu::Device) -> Result<wgpu::ShaderModule, SetupError> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("helios program library"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/program.wgsl").into()),
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(SetupError::ProgramCompileFailed {
            entry: "program library".to_string(),
            reason: err.to_string(),
        });
    }
    Ok(module)
}

/// Bind group layout for the display pass: frame uniforms + the image store
/// slot being read. `Rgba32Float` is not filterable without extra device
/// features, so the texture binding is non-filterable and the fragment stage
/// reads texels directly.
pub fn display_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("helios display bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(uniform_binding_size()),
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
        ],
    })
}

/// Bind group layout for the compute pass: the image store slot being
/// written + frame uniforms.
pub fn compute_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("helios compute bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::StorageTexture {
                    access: wgpu::StorageTextureAccess::WriteOnly,
                    format: IMAGE_FORMAT,
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(uniform_binding_size()),
                },
                count: None,
            },
        ],
    })
}

/// Builds the render pipeline for the fullscreen blit (`vMain` + `fMain`).
pub fn build_render_pipeline(
    device: &wgpu::Device,
    module: &wgpu::ShaderModule,
    bind_group_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, SetupError> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("helios display pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("helios display pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
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
        multiview_mask: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(SetupError::ProgramCompileFailed {
            entry: format!("{VERTEX_ENTRY}/{FRAGMENT_ENTRY}"),
            reason: err.to_string(),
        });
    }
    Ok(pipeline)
}

/// Builds the compute pipeline for the trace kernel (`cMain`).
pub fn build_compute_pipeline(
    device: &wgpu::Device,
    module: &wgpu::ShaderModule,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> Result<wgpu::ComputePipeline, SetupError> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("helios compute pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("helios compute pipeline"),
        layout: Some(&layout),
        module,
        entry_point: Some(COMPUTE_ENTRY),
        compilation_options: Default::default(),
        cache: None,
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(SetupError::ProgramCompileFailed {
            entry: COMPUTE_ENTRY.to_string(),
            reason: err.to_string(),
        });
    }
    Ok(pipeline)
}

/// Minimum binding size for the frame uniform buffer.
///
/// `FrameUniforms` is 16 bytes, so the size is always non-zero; centralising
/// this avoids `.unwrap()` at each pipeline-creation site.
pub(crate) fn uniform_binding_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<FrameUniforms>() as u64)
        .expect("FrameUniforms has non-zero size by construction")
}
