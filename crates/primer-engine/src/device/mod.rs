//! Window surface, depth target and the wgpu device behind them.
//!
//! [`Gpu`] is created once per window and handed to the app for shader and
//! buffer creation; the runtime uses it to acquire and present frames.

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::{GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
