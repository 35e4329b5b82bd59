use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::geometry::{BufferError, BufferId, Dimensionality, LayoutId, RenderBackend, VertexAttribute};

use super::program::WgpuProgram;
use super::RenderTarget;

/// Attribute streams and index buffer grouped under one layout id.
#[derive(Debug, Default)]
struct LayoutSlots {
    attributes: Vec<(VertexAttribute, BufferId)>,
    index: Option<BufferId>,
}

#[derive(Debug, Copy, Clone)]
struct DrawCall {
    layout: LayoutId,
    index_count: u32,
    viewport: Option<Viewport>,
}

/// [`RenderBackend`] over a wgpu device.
///
/// Buffers are created immediately; draws are recorded and turned into GPU
/// commands by [`encode`](Self::encode) once the frame's target is available.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    next_id: u32,
    buffers: HashMap<BufferId, wgpu::Buffer>,
    layouts: HashMap<LayoutId, LayoutSlots>,
    draws: Vec<DrawCall>,
    viewport: Option<Viewport>,
    lost: bool,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            next_id: 1,
            buffers: HashMap::new(),
            layouts: HashMap::new(),
            draws: Vec::new(),
            viewport: None,
            lost: false,
        }
    }

    /// Marks the device unusable. Later uploads fail with `ContextInvalid`.
    pub fn mark_lost(&mut self) {
        if !self.lost {
            log::warn!("render backend marked lost");
        }
        self.lost = true;
        self.draws.clear();
    }

    /// Encodes every draw recorded since the last call into one pass on
    /// `target`, using `program` for pipelines and uniforms.
    ///
    /// Uniform values are uploaded once per call, so all draws of a frame see
    /// the values written last.
    pub fn encode(&mut self, target: &mut RenderTarget<'_>, program: &mut WgpuProgram) {
        program.flush(&self.queue);

        let draws = std::mem::take(&mut self.draws);
        if draws.is_empty() || self.lost {
            return;
        }
        if !program.is_active() {
            log::warn!("encoding {} draws with an inactive program", draws.len());
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("primer mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: target.depth_view.map(|view| {
                wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, program.bind_group(), &[]);

        for draw in draws {
            let Some(slots) = self.layouts.get(&draw.layout) else {
                log::warn!("draw references deleted layout {}", draw.layout.raw());
                continue;
            };
            let Some(index) = slots.index.and_then(|id| self.buffers.get(&id)) else {
                log::warn!("layout {} has no index buffer; draw skipped", draw.layout.raw());
                continue;
            };

            let mut attributes = slots.attributes.clone();
            attributes.sort_by_key(|(a, _)| a.location);
            let layout: Vec<VertexAttribute> = attributes.iter().map(|(a, _)| *a).collect();

            let full = Viewport::from_size(target.size);
            let Some(vp) = draw.viewport.unwrap_or(full).clipped_to(target.size) else {
                continue;
            };

            rpass.set_pipeline(program.pipeline_for(&self.device, &layout));
            rpass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

            for (slot, (_, id)) in attributes.iter().enumerate() {
                if let Some(buffer) = self.buffers.get(id) {
                    rpass.set_vertex_buffer(slot as u32, buffer.slice(..));
                }
            }
            rpass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_upload(&self, layout: LayoutId, bytes: usize) -> Result<(), BufferError> {
        if self.lost {
            return Err(BufferError::ContextInvalid);
        }
        if !self.layouts.contains_key(&layout) {
            return Err(BufferError::UnknownLayout(layout.raw()));
        }
        let max = self.device.limits().max_buffer_size;
        if bytes as u64 > max {
            return Err(BufferError::TooLarge(bytes as u64));
        }
        Ok(())
    }
}

impl RenderBackend for WgpuBackend {
    fn is_context_valid(&self) -> bool {
        !self.lost
    }

    fn create_vertex_layout(&mut self) -> Result<LayoutId, BufferError> {
        if self.lost {
            return Err(BufferError::ContextInvalid);
        }
        let id = LayoutId::new(self.alloc_id());
        self.layouts.insert(id, LayoutSlots::default());
        Ok(id)
    }

    fn upload_vertex_buffer(
        &mut self,
        layout: LayoutId,
        attribute: VertexAttribute,
        data: &[f32],
    ) -> Result<BufferId, BufferError> {
        self.check_upload(layout, std::mem::size_of_val(data))?;

        let id = BufferId::new(self.alloc_id());
        let label = format!("primer vbo {} @{}", id.raw(), attribute.location);
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.buffers.insert(id, buffer);

        if let Some(slots) = self.layouts.get_mut(&layout) {
            // Rebinding a location replaces the stream; the old buffer stays
            // owned by whoever created it.
            slots.attributes.retain(|(a, _)| a.location != attribute.location);
            slots.attributes.push((attribute, id));
        }
        Ok(id)
    }

    fn upload_index_buffer(&mut self, layout: LayoutId, indices: &[u32]) -> Result<BufferId, BufferError> {
        self.check_upload(layout, std::mem::size_of_val(indices))?;

        let id = BufferId::new(self.alloc_id());
        let label = format!("primer ibo {}", id.raw());
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.buffers.insert(id, buffer);

        if let Some(slots) = self.layouts.get_mut(&layout) {
            slots.index = Some(id);
        }
        Ok(id)
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport.is_valid().then_some(viewport);
    }

    fn draw_indexed(&mut self, layout: LayoutId, index_count: u32) {
        if self.lost || index_count == 0 {
            return;
        }
        self.draws.push(DrawCall {
            layout,
            index_count,
            viewport: self.viewport,
        });
    }

    fn delete_buffer(&mut self, id: BufferId) {
        if let Some(buffer) = self.buffers.remove(&id) {
            buffer.destroy();
        }
        for slots in self.layouts.values_mut() {
            slots.attributes.retain(|(_, b)| *b != id);
            if slots.index == Some(id) {
                slots.index = None;
            }
        }
    }

    fn delete_vertex_layout(&mut self, id: LayoutId) {
        self.layouts.remove(&id);
        self.draws.retain(|d| d.layout != id);
    }
}

/// Vertex format for one tightly packed float stream.
pub(super) fn vertex_format(dim: Dimensionality) -> wgpu::VertexFormat {
    match dim {
        Dimensionality::Two => wgpu::VertexFormat::Float32x2,
        Dimensionality::Three => wgpu::VertexFormat::Float32x3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_match_component_count() {
        assert_eq!(vertex_format(Dimensionality::Two).size(), 8);
        assert_eq!(vertex_format(Dimensionality::Three).size(), 12);
    }
}
