use glam::Mat4;
use glyphgrid_camera::ViewProjection;

/// Per-draw constant buffer.
///
/// Shader side:
///   world : float4x4   64 bytes
///   view  : float4x4   64 bytes
///   proj  : float4x4   64 bytes
///
/// Matrices are stored as column arrays, which is what a row-vector shader
/// reading transposed matrices expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

const _: () = assert!(std::mem::size_of::<FrameUniform>() == 192);

impl FrameUniform {
    pub fn new(world: Mat4, matrices: &ViewProjection) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: matrices.view.to_cols_array_2d(),
            proj: matrices.projection.to_cols_array_2d(),
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
