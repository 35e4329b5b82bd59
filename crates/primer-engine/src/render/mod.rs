//! GPU rendering subsystem.
//!
//! wgpu implementations of the backend-agnostic collaborators:
//! - [`WgpuBackend`] implements `geometry::RenderBackend`; draws are recorded
//!   during the frame and encoded into one render pass at the end
//! - [`WgpuProgram`] implements `shader::ShaderProgram` over a single uniform
//!   block at `@group(0) @binding(0)`

mod backend;
mod ctx;
mod program;

pub use backend::WgpuBackend;
pub use ctx::{RenderCtx, RenderTarget};
pub use program::WgpuProgram;
