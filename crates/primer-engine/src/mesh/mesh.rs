use crate::geometry::{BufferId, GeometryBuffers, LayoutId, RenderBackend};

use super::{MeshData, MeshError};

/// Shader input location of vertex positions.
pub const POSITION_LOCATION: u32 = 0;
/// Shader input location of vertex colors.
pub const COLOR_LOCATION: u32 = 1;

/// GPU-resident indexed triangle mesh.
///
/// Holds ids only; the buffers themselves belong to the [`GeometryBuffers`]
/// that created them and are freed by its `release_all`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    layout: LayoutId,
    positions: BufferId,
    colors: BufferId,
    indices: BufferId,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Validates `data` and uploads it into a fresh vertex layout.
    ///
    /// The layout is unbound again afterwards. On failure, whatever was
    /// already created stays tracked by `buffers` and goes with its next
    /// `release_all`.
    pub fn upload<B: RenderBackend>(
        data: &MeshData,
        buffers: &mut GeometryBuffers,
        backend: &mut B,
    ) -> Result<Self, MeshError> {
        data.validate()?;

        let layout = buffers.create_vertex_layout(backend)?;
        let positions = buffers.create_vertex_buffer(backend, POSITION_LOCATION, 3, &data.positions)?;
        let colors = buffers.create_vertex_buffer(backend, COLOR_LOCATION, 3, &data.colors)?;
        let indices = buffers.create_index_buffer(backend, &data.indices)?;
        buffers.bind_vertex_layout(None);

        Ok(Self {
            layout,
            positions,
            colors,
            indices,
            vertex_count: data.vertex_count() as u32,
            index_count: data.indices.len() as u32,
        })
    }

    /// Generates a UV-sphere (see [`MeshData::sphere`]) and uploads it.
    pub fn create_sphere<B: RenderBackend>(
        radius: f32,
        tessellation: u32,
        buffers: &mut GeometryBuffers,
        backend: &mut B,
    ) -> Result<Self, MeshError> {
        let data = MeshData::sphere(radius, tessellation)?;
        Self::upload(&data, buffers, backend)
    }

    /// Issues one indexed draw over every triangle.
    ///
    /// The caller is responsible for having activated the shader program.
    pub fn render<B: RenderBackend>(&self, backend: &mut B) {
        backend.draw_indexed(self.layout, self.index_count);
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    /// `(positions, colors, indices)` buffer ids.
    pub fn buffers(&self) -> (BufferId, BufferId, BufferId) {
        (self.positions, self.colors, self.indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}
