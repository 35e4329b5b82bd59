use super::backend::{BufferId, Dimensionality, LayoutId, RenderBackend, VertexAttribute};
use super::BufferError;

/// Owns every buffer and vertex layout created during a session.
///
/// Calls take the backend explicitly; the manager only remembers which ids it
/// handed out and which layout is currently bound for new uploads.
///
/// Release is explicit (`release_all`) because freeing needs the backend.
/// Dropping a manager that still owns ids is a leak, reported with a warning.
#[derive(Debug, Default)]
pub struct GeometryBuffers {
    layouts: Vec<LayoutId>,
    vertex_buffers: Vec<BufferId>,
    index_buffers: Vec<BufferId>,
    active_layout: Option<LayoutId>,
}

/// Counts of objects freed by one `release_all` call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Released {
    pub vertex_buffers: usize,
    pub index_buffers: usize,
    pub layouts: usize,
}

impl Released {
    pub fn total(&self) -> usize {
        self.vertex_buffers + self.index_buffers + self.layouts
    }
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vertex layout and binds it for subsequent uploads.
    pub fn create_vertex_layout<B: RenderBackend>(&mut self, backend: &mut B) -> Result<LayoutId, BufferError> {
        if !backend.is_context_valid() {
            return Err(BufferError::ContextInvalid);
        }

        let id = backend.create_vertex_layout()?;
        self.layouts.push(id);
        self.active_layout = Some(id);
        Ok(id)
    }

    /// Binds `layout` for subsequent uploads; `None` unbinds.
    pub fn bind_vertex_layout(&mut self, layout: Option<LayoutId>) {
        self.active_layout = layout;
    }

    pub fn active_layout(&self) -> Option<LayoutId> {
        self.active_layout
    }

    /// Uploads `data` as a static vertex attribute buffer bound to `location`
    /// in the active layout.
    ///
    /// `dimensionality` must be 2 or 3 and divide `data.len()`.
    pub fn create_vertex_buffer<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        location: u32,
        dimensionality: usize,
        data: &[f32],
    ) -> Result<BufferId, BufferError> {
        let dims = Dimensionality::from_components(dimensionality)
            .ok_or(BufferError::InvalidDimensionality(dimensionality))?;
        if data.is_empty() {
            return Err(BufferError::Empty);
        }
        if data.len() % dims.components() != 0 {
            return Err(BufferError::MisalignedVertexData {
                len: data.len(),
                dimensionality,
            });
        }

        let layout = self.ready_layout(backend)?;
        let attribute = VertexAttribute {
            location,
            dimensionality: dims,
        };

        let id = backend.upload_vertex_buffer(layout, attribute, data)?;
        self.vertex_buffers.push(id);

        log::debug!(
            "vertex buffer {} uploaded: location {location}, {} vertices",
            id.raw(),
            data.len() / dims.components()
        );
        Ok(id)
    }

    /// Uploads `indices` (three per triangle) as the active layout's index buffer.
    pub fn create_index_buffer<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        indices: &[u32],
    ) -> Result<BufferId, BufferError> {
        if indices.is_empty() {
            return Err(BufferError::Empty);
        }
        if indices.len() % 3 != 0 {
            return Err(BufferError::MisalignedIndices(indices.len()));
        }

        let layout = self.ready_layout(backend)?;
        let id = backend.upload_index_buffer(layout, indices)?;
        self.index_buffers.push(id);

        log::debug!("index buffer {} uploaded: {} triangles", id.raw(), indices.len() / 3);
        Ok(id)
    }

    /// Frees every buffer and layout created so far.
    ///
    /// Ids are drained as they are freed, so a second call releases nothing.
    pub fn release_all<B: RenderBackend>(&mut self, backend: &mut B) -> Released {
        let released = Released {
            vertex_buffers: self.vertex_buffers.len(),
            index_buffers: self.index_buffers.len(),
            layouts: self.layouts.len(),
        };

        for id in self.vertex_buffers.drain(..).chain(self.index_buffers.drain(..)) {
            backend.delete_buffer(id);
        }
        for id in self.layouts.drain(..) {
            backend.delete_vertex_layout(id);
        }
        self.active_layout = None;

        if released.total() > 0 {
            log::debug!(
                "released {} vertex buffers, {} index buffers, {} layouts",
                released.vertex_buffers,
                released.index_buffers,
                released.layouts
            );
        }
        released
    }

    /// Number of ids still owned.
    pub fn live_count(&self) -> usize {
        self.layouts.len() + self.vertex_buffers.len() + self.index_buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    fn ready_layout<B: RenderBackend>(&self, backend: &B) -> Result<LayoutId, BufferError> {
        if !backend.is_context_valid() {
            return Err(BufferError::ContextInvalid);
        }
        self.active_layout.ok_or(BufferError::NoActiveLayout)
    }
}

impl Drop for GeometryBuffers {
    fn drop(&mut self) {
        if !self.is_empty() {
            log::warn!(
                "geometry buffers dropped without release: {} objects leaked",
                self.live_count()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;

    #[derive(Default)]
    struct Recorder {
        invalid: bool,
        next: u32,
        uploads: usize,
        deleted_buffers: Vec<BufferId>,
        deleted_layouts: Vec<LayoutId>,
    }

    impl Recorder {
        fn next_id(&mut self) -> u32 {
            self.next += 1;
            self.next
        }
    }

    impl RenderBackend for Recorder {
        fn is_context_valid(&self) -> bool {
            !self.invalid
        }

        fn create_vertex_layout(&mut self) -> Result<LayoutId, BufferError> {
            Ok(LayoutId::new(self.next_id()))
        }

        fn upload_vertex_buffer(
            &mut self,
            _layout: LayoutId,
            _attribute: VertexAttribute,
            _data: &[f32],
        ) -> Result<BufferId, BufferError> {
            self.uploads += 1;
            Ok(BufferId::new(self.next_id()))
        }

        fn upload_index_buffer(&mut self, _layout: LayoutId, _indices: &[u32]) -> Result<BufferId, BufferError> {
            self.uploads += 1;
            Ok(BufferId::new(self.next_id()))
        }

        fn set_viewport(&mut self, _viewport: Viewport) {}

        fn draw_indexed(&mut self, _layout: LayoutId, _index_count: u32) {}

        fn delete_buffer(&mut self, id: BufferId) {
            self.deleted_buffers.push(id);
        }

        fn delete_vertex_layout(&mut self, id: LayoutId) {
            self.deleted_layouts.push(id);
        }
    }

    const TRI: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_unsupported_dimensionality() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        buffers.create_vertex_layout(&mut backend).unwrap();

        let err = buffers.create_vertex_buffer(&mut backend, 0, 4, &TRI).unwrap_err();
        assert_eq!(err, BufferError::InvalidDimensionality(4));
        assert_eq!(backend.uploads, 0);
        buffers.release_all(&mut backend);
    }

    #[test]
    fn rejects_length_not_multiple_of_dimensionality() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        buffers.create_vertex_layout(&mut backend).unwrap();

        let err = buffers.create_vertex_buffer(&mut backend, 0, 2, &TRI).unwrap_err();
        assert_eq!(err, BufferError::MisalignedVertexData { len: 9, dimensionality: 2 });
        assert_eq!(backend.uploads, 0);
        buffers.release_all(&mut backend);
    }

    #[test]
    fn rejects_index_count_not_multiple_of_three() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        buffers.create_vertex_layout(&mut backend).unwrap();

        let err = buffers.create_index_buffer(&mut backend, &[0, 1]).unwrap_err();
        assert_eq!(err, BufferError::MisalignedIndices(2));
        assert!(matches!(buffers.create_index_buffer(&mut backend, &[]), Err(BufferError::Empty)));
        buffers.release_all(&mut backend);
    }

    #[test]
    fn invalid_context_is_an_error_not_a_panic() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        buffers.create_vertex_layout(&mut backend).unwrap();

        backend.invalid = true;
        let err = buffers.create_vertex_buffer(&mut backend, 0, 3, &TRI).unwrap_err();
        assert_eq!(err, BufferError::ContextInvalid);

        backend.invalid = false;
        buffers.release_all(&mut backend);
    }

    #[test]
    fn upload_without_layout_fails() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        let err = buffers.create_vertex_buffer(&mut backend, 0, 3, &TRI).unwrap_err();
        assert_eq!(err, BufferError::NoActiveLayout);
    }

    // ── release ───────────────────────────────────────────────────────────

    #[test]
    fn release_all_frees_everything_once() {
        let mut backend = Recorder::default();
        let mut buffers = GeometryBuffers::new();
        let layout = buffers.create_vertex_layout(&mut backend).unwrap();
        let pos = buffers.create_vertex_buffer(&mut backend, 0, 3, &TRI).unwrap();
        let col = buffers.create_vertex_buffer(&mut backend, 1, 3, &TRI).unwrap();
        let idx = buffers.create_index_buffer(&mut backend, &[0, 1, 2]).unwrap();
        assert_eq!(buffers.live_count(), 4);

        let released = buffers.release_all(&mut backend);
        assert_eq!(released, Released { vertex_buffers: 2, index_buffers: 1, layouts: 1 });
        assert_eq!(backend.deleted_buffers, vec![pos, col, idx]);
        assert_eq!(backend.deleted_layouts, vec![layout]);
        assert!(buffers.active_layout().is_none());

        let again = buffers.release_all(&mut backend);
        assert_eq!(again.total(), 0);
        assert_eq!(backend.deleted_buffers.len(), 3);
        assert_eq!(backend.deleted_layouts.len(), 1);
    }
}
