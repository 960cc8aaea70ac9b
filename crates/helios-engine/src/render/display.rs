use bytemuck::bytes_of;
use wgpu::util::DeviceExt;

use crate::device::{pipelines, SetupError};
use crate::image::{ImageStore, SLOT_COUNT};

use super::uniforms::{FrameUniforms, FULLSCREEN_QUAD};

/// Display stage: draws one image store slot onto the surface.
///
/// Owns the render pipeline, a static fullscreen-quad vertex buffer (built
/// once at construction and reused every frame), the uniform buffer, and one
/// bind group per store slot so no binding objects are created on the frame
/// path.
pub struct DisplayStage {
    pipeline: wgpu::RenderPipeline,
    quad_vbo: wgpu::Buffer,
    bind_groups: [wgpu::BindGroup; SLOT_COUNT],
    uniforms: FrameUniforms,
}

impl DisplayStage {
    /// Builds the render pipeline and static resources.
    ///
    /// Any failure is a fatal setup failure, propagated to the caller.
    pub fn new(
        device: &wgpu::Device,
        module: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        store: &ImageStore,
        uniforms: FrameUniforms,
    ) -> Result<Self, SetupError> {
        let bind_group_layout = pipelines::display_bind_group_layout(device);
        let pipeline =
            pipelines::build_render_pipeline(device, module, &bind_group_layout, surface_format)?;

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("helios quad vbo"),
            contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Uniforms are immutable after construction; no COPY_DST needed.
        // The bind groups keep the buffer alive.
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("helios display ubo"),
            contents: bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_groups = std::array::from_fn(|slot| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("helios display bind group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: uniform_buf.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(store.view(slot)),
                    },
                ],
            })
        });

        Ok(Self {
            pipeline,
            quad_vbo,
            bind_groups,
            uniforms,
        })
    }

    /// The creation-time uniforms; never updated afterwards.
    pub fn uniforms(&self) -> FrameUniforms {
        self.uniforms
    }

    /// Records the display pass: clear to transparent black, then one draw of
    /// the 6-vertex quad sampling `read_slot`.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        read_slot: usize,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("helios display pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_groups[read_slot], &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
    }
}
