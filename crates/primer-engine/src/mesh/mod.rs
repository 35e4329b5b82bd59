//! Procedural meshes.
//!
//! [`MeshData`] is generated on the CPU (sphere, cube, triangle) and validated;
//! [`Mesh`] is its uploaded, renderable form.

mod data;
mod error;
#[allow(clippy::module_inception)]
mod mesh;

pub use data::{sphere_triangle_count, sphere_vertex_count, MeshData, MAX_TESSELLATION, MIN_TESSELLATION};
pub use error::MeshError;
pub use mesh::{Mesh, COLOR_LOCATION, POSITION_LOCATION};
