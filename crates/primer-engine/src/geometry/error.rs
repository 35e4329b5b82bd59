use thiserror::Error;

/// Errors raised while creating geometry buffers.
///
/// Input validation errors are reported before anything is uploaded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BufferError {
    #[error("graphics context is not valid")]
    ContextInvalid,

    #[error("no vertex layout is bound")]
    NoActiveLayout,

    #[error("unsupported dimensionality {0} (expected 2 or 3)")]
    InvalidDimensionality(usize),

    #[error("vertex data length {len} is not a multiple of dimensionality {dimensionality}")]
    MisalignedVertexData { len: usize, dimensionality: usize },

    #[error("index count {0} is not a multiple of 3")]
    MisalignedIndices(usize),

    #[error("buffer data is empty")]
    Empty,

    #[error("unknown vertex layout {0}")]
    UnknownLayout(u32),

    #[error("buffer of {0} bytes exceeds the device limit")]
    TooLarge(u64),
}
