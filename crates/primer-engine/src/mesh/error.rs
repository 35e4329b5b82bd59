use thiserror::Error;

use crate::geometry::BufferError;

/// Errors raised while generating or uploading a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("sphere tessellation {requested} is below the minimum of {minimum}")]
    TessellationTooLow { requested: u32, minimum: u32 },

    #[error("sphere tessellation {requested} exceeds the maximum of {maximum}")]
    TessellationTooHigh { requested: u32, maximum: u32 },

    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("mesh has no vertices or no triangles")]
    Empty,

    #[error("position array length {0} is not a multiple of 3")]
    MisalignedPositions(usize),

    #[error("color array has {colors} floats but position array has {positions}")]
    AttributeLengthMismatch { positions: usize, colors: usize },

    #[error("index count {0} is not a multiple of 3")]
    MisalignedIndices(usize),

    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
