use crate::device::pipelines::IMAGE_FORMAT;
use crate::device::SetupError;

use super::SLOT_COUNT;

const SLOT_LABELS: [&str; SLOT_COUNT] = ["helios image slot 0", "helios image slot 1"];

/// Double-buffered off-screen image store.
///
/// Each slot is a GPU-private `Rgba32Float` texture, written by the compute
/// stage (storage binding) and read by the display stage (texture binding).
/// Dimensions are fixed at creation to the initial surface size and never
/// change for the life of the process; wgpu zero-initializes the textures, so
/// the first displayed frame is transparent black.
pub struct ImageStore {
    views: [wgpu::TextureView; SLOT_COUNT],
    width: u32,
    height: u32,
}

impl ImageStore {
    /// Allocates both slots at `width x height`.
    ///
    /// Allocation failures (and a zero extent) are fatal setup failures.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::ResourceAllocationFailed(
                "image store extent is zero".to_string(),
            ));
        }

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let textures: [wgpu::Texture; SLOT_COUNT] = std::array::from_fn(|slot| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(SLOT_LABELS[slot]),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: IMAGE_FORMAT,
                usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(SetupError::ResourceAllocationFailed(err.to_string()));
        }

        // The views keep the textures alive.
        let views = std::array::from_fn(|slot| {
            textures[slot].create_view(&wgpu::TextureViewDescriptor::default())
        });

        Ok(Self {
            views,
            width,
            height,
        })
    }

    /// Image width in pixels (fixed).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels (fixed).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// View over one slot; serves both the storage and the sampled binding.
    pub fn view(&self, slot: usize) -> &wgpu::TextureView {
        &self.views[slot]
    }
}
