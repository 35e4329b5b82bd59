//! Primer engine crate.
//!
//! A minimal real-time renderer: column-major 4x4 transforms, explicit GPU
//! buffer ownership, a procedural UV-sphere and the per-frame orchestration
//! that animates it. `geometry::RenderBackend` and `shader::ShaderProgram`
//! keep the core independent of the GPU API; `render` implements both on
//! wgpu and `window` drives them from winit.

pub mod coords;
pub mod core;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
