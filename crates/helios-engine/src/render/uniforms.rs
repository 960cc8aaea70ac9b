//! Host↔GPU parameter types shared by both pipelines.

use bytemuck::{Pod, Zeroable};

/// Per-frame parameters passed to the GPU program.
///
/// `window_size` is set once from the surface's initial pixel dimensions and
/// there is deliberately no API to update it afterwards: the image store is
/// sized from the same extent, which keeps the compute dispatch grid and the
/// store in lockstep. A window resize reconfigures the swapchain only.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub window_size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl FrameUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: [width as f32, height as f32],
            _pad: [0.0; 2],
        }
    }
}

/// Vertex of the fullscreen quad, in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles spanning the full normalized coordinate range, wound CCW.
pub const FULLSCREEN_QUAD: [QuadVertex; 6] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_exactly_six_vertices() {
        assert_eq!(FULLSCREEN_QUAD.len(), 6);
    }

    #[test]
    fn quad_spans_the_full_ndc_range() {
        for v in FULLSCREEN_QUAD {
            assert!(v.pos[0] == -1.0 || v.pos[0] == 1.0);
            assert!(v.pos[1] == -1.0 || v.pos[1] == 1.0);
        }
        // All four corners are present.
        for corner in [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]] {
            assert!(FULLSCREEN_QUAD.iter().any(|v| v.pos == corner));
        }
    }

    #[test]
    fn quad_triangles_are_non_degenerate() {
        fn area2(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
            (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
        }
        for tri in FULLSCREEN_QUAD.chunks(3) {
            assert!(area2(tri[0].pos, tri[1].pos, tri[2].pos).abs() > 0.0);
        }
    }

    #[test]
    fn uniforms_are_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
    }

    #[test]
    fn window_size_is_fixed_at_construction() {
        // Regression: a surface resize reconfigures the swapchain but never
        // touches the uniforms; the type exposes no mutation path.
        let u = FrameUniforms::new(1300, 1300);
        assert_eq!(u.window_size, [1300.0, 1300.0]);
        assert_eq!(u, FrameUniforms::new(1300, 1300));
    }
}
