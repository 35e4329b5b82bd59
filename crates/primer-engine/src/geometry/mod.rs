//! Geometry buffer management.
//!
//! GPU state is reached only through an explicit [`RenderBackend`]; the
//! [`GeometryBuffers`] manager validates input, uploads through the backend and
//! owns the resulting ids until `release_all`.

mod backend;
mod buffers;
mod error;

pub use backend::{BufferId, Dimensionality, LayoutId, RenderBackend, VertexAttribute};
pub use buffers::{GeometryBuffers, Released};
pub use error::BufferError;
