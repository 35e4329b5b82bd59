//! Shader parameter plumbing.
//!
//! The [`ShaderProgram`] trait the frame pipeline writes through, the
//! uniform block layout that gives parameter slots their names, and WGSL
//! source loading. Layouts are read from the sources themselves, so a
//! parameter the shader does not declare has no slot.

mod program;
mod reflect;
mod source;
mod uniforms;

pub use program::{ShaderProgram, SlotId};
pub use source::{ShaderSources, MODEL, MODELVIEW, ROTATION, TIME};
pub use uniforms::{ParamKind, UniformBlock, UniformField, UniformLayout};
