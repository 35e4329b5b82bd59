//! Small value types shared by the render backend and the runtime.
//!
//! Sizes are physical pixels; the depth range handed to the GPU is always
//! `0.0..=1.0`.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
