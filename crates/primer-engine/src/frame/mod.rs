//! Per-frame transform, upload and draw sequence.
//!
//! [`FrameOrchestrator`] owns the mesh buffers and walks the
//! `Uninitialized → Running → Terminated` lifecycle; [`run`] drives it from a
//! pull-style [`FrameHost`].

mod host;
mod orchestrator;
mod transforms;

pub use host::{run, FrameHost};
pub use orchestrator::{FrameOrchestrator, FrameState, OrchestratorError};
pub use transforms::{FrameTransforms, TransformParams};
