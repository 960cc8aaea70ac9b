use bytemuck::bytes_of;
use wgpu::util::DeviceExt;

use crate::device::{pipelines, SetupError};
use crate::image::{CompletionSignal, ImageStore, SLOT_COUNT};
use crate::render::uniforms::FrameUniforms;

use super::grid::dispatch_extent;

/// Compute stage: overwrites one image store slot with a freshly traced
/// frame.
///
/// Owns the compute pipeline, its uniform buffer, one bind group per store
/// slot, and the dispatch grid (fixed at construction from the store
/// extent).
pub struct ComputeStage {
    pipeline: wgpu::ComputePipeline,
    bind_groups: [wgpu::BindGroup; SLOT_COUNT],
    extent: (u32, u32, u32),
}

impl ComputeStage {
    /// Builds the compute pipeline and per-slot bindings.
    ///
    /// Any failure is a fatal setup failure, propagated to the caller.
    pub fn new(
        device: &wgpu::Device,
        module: &wgpu::ShaderModule,
        store: &ImageStore,
        uniforms: FrameUniforms,
    ) -> Result<Self, SetupError> {
        let bind_group_layout = pipelines::compute_bind_group_layout(device);
        let pipeline = pipelines::build_compute_pipeline(device, module, &bind_group_layout)?;

        // The bind groups keep the buffer alive.
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("helios compute ubo"),
            contents: bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_groups = std::array::from_fn(|slot| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("helios compute bind group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(store.view(slot)),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: uniform_buf.as_entire_binding(),
                    },
                ],
            })
        });

        Ok(Self {
            pipeline,
            bind_groups,
            extent: dispatch_extent(store.width(), store.height()),
        })
    }

    /// Workgroup counts for one full-frame dispatch.
    pub fn extent(&self) -> (u32, u32, u32) {
        self.extent
    }

    /// Records and submits one compute pass into `write_slot` on its own
    /// command buffer.
    ///
    /// Fire-and-forget: no completion wait. The signal is armed before submit
    /// and flipped by the queue's submitted-work-done callback; the
    /// orchestrator consults it before displaying the written slot.
    pub fn dispatch(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        write_slot: usize,
        signal: &CompletionSignal,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("helios compute encoder"),
        });

        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("helios trace pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.pipeline);
            cpass.set_bind_group(0, &self.bind_groups[write_slot], &[]);
            let (gx, gy, gz) = self.extent;
            cpass.dispatch_workgroups(gx, gy, gz);
        }

        signal.arm();
        queue.submit(std::iter::once(encoder.finish()));
        queue.on_submitted_work_done(signal.notifier());
    }
}
