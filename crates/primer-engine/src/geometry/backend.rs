use super::BufferError;
use crate::coords::Viewport;

/// Opaque handle to a GPU buffer created through a [`RenderBackend`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u32);

impl BufferId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to a vertex layout object (attribute bindings + index buffer).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(u32);

impl LayoutId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Number of float components per vertex for an attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    /// Accepts 2 or 3; anything else is rejected.
    pub const fn from_components(n: usize) -> Option<Self> {
        match n {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Binding of one float attribute stream to a shader input location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub dimensionality: Dimensionality,
}

/// Explicit render state used in place of ambient graphics-context bindings.
///
/// Every call that would touch "the currently bound" object in a stateful API
/// receives the object it applies to. Implementations:
/// - `render::WgpuBackend` records into real GPU buffers
/// - test doubles record the calls
///
/// Uploads are write-once; there is no update or resize.
pub trait RenderBackend {
    /// `false` once the underlying device/context is gone.
    fn is_context_valid(&self) -> bool;

    fn create_vertex_layout(&mut self) -> Result<LayoutId, BufferError>;

    /// Uploads `data` and binds it to `attribute.location` in `layout`.
    fn upload_vertex_buffer(
        &mut self,
        layout: LayoutId,
        attribute: VertexAttribute,
        data: &[f32],
    ) -> Result<BufferId, BufferError>;

    /// Uploads `indices` as the index buffer of `layout`.
    fn upload_index_buffer(&mut self, layout: LayoutId, indices: &[u32]) -> Result<BufferId, BufferError>;

    fn set_viewport(&mut self, viewport: Viewport);

    /// Draws `index_count` indices of `layout` as a triangle list.
    fn draw_indexed(&mut self, layout: LayoutId, index_count: u32);

    fn delete_buffer(&mut self, id: BufferId);

    fn delete_vertex_layout(&mut self, id: LayoutId);
}
