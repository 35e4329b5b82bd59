/// Surface texture, its view and the encoder for one frame.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) before acquiring the
/// next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the runtime should do after a failed acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; try again next frame.
    Reconfigured,
    /// Drop this frame only.
    SkipFrame,
    /// Device is unusable; stop rendering.
    Fatal,
}
