use std::collections::HashSet;

use crate::math::Mat4;

use super::SlotId;

/// Type of a named shader parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// `mat4x4<f32>`: 64 bytes, 16-byte aligned.
    Mat4,
    /// `f32`: 4 bytes, 4-byte aligned.
    Float,
}

impl ParamKind {
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Mat4 => 64,
            Self::Float => 4,
        }
    }

    #[inline]
    pub const fn align(self) -> usize {
        match self {
            Self::Mat4 => 16,
            Self::Float => 4,
        }
    }
}

/// One named field of a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformField {
    pub name: String,
    pub kind: ParamKind,
    pub offset: usize,
}

/// Byte layout of a uniform block, in declaration order.
///
/// Offsets follow WGSL uniform address-space rules for the supported kinds,
/// and the total size is rounded up to 16 bytes. The field order must match
/// the struct declared in the shader source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
    end: usize,
}

impl UniformLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.push(name, kind);
        self
    }

    /// Appends a field and returns its slot.
    ///
    /// Re-declaring a name returns the existing slot and leaves the layout
    /// unchanged.
    pub fn push(&mut self, name: impl Into<String>, kind: ParamKind) -> SlotId {
        let name = name.into();
        if let Some(slot) = self.find(&name) {
            log::warn!("uniform field `{name}` declared twice; keeping the first declaration");
            return slot;
        }

        let offset = self.end.next_multiple_of(kind.align());
        self.end = offset + kind.size();
        self.fields.push(UniformField { name, kind, offset });
        SlotId::new((self.fields.len() - 1) as u32)
    }

    pub fn find(&self, name: &str) -> Option<SlotId> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| SlotId::new(i as u32))
    }

    pub fn field(&self, slot: SlotId) -> Option<&UniformField> {
        self.fields.get(slot.raw() as usize)
    }

    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    /// Block size in bytes (at least 16, multiple of 16).
    pub fn size(&self) -> usize {
        self.end.next_multiple_of(16).max(16)
    }
}

/// CPU staging copy of a uniform block.
///
/// Writes mark the block dirty; the owner uploads `bytes()` when
/// `take_dirty()` reports a change.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    layout: UniformLayout,
    bytes: Vec<u8>,
    dirty: bool,
    warned: HashSet<SlotId>,
}

impl UniformBlock {
    pub fn new(layout: UniformLayout) -> Self {
        let bytes = vec![0u8; layout.size()];
        Self {
            layout,
            bytes,
            dirty: true,
            warned: HashSet::new(),
        }
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn find(&self, name: &str) -> Option<SlotId> {
        self.layout.find(name)
    }

    /// Returns `false` (and warns once per slot) if `slot` is not a matrix.
    pub fn write_mat4(&mut self, slot: SlotId, value: &Mat4) -> bool {
        self.write(slot, ParamKind::Mat4, bytemuck::bytes_of(value))
    }

    /// Returns `false` (and warns once per slot) if `slot` is not a float.
    pub fn write_f32(&mut self, slot: SlotId, value: f32) -> bool {
        self.write(slot, ParamKind::Float, bytemuck::bytes_of(&value))
    }

    /// Current contents, laid out per [`UniformLayout`].
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns whether anything was written since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn write(&mut self, slot: SlotId, kind: ParamKind, src: &[u8]) -> bool {
        let field = match self.layout.field(slot) {
            Some(f) if f.kind == kind => f,
            other => {
                if self.warned.insert(slot) {
                    match other {
                        Some(f) => log::warn!(
                            "uniform `{}` is {:?}, ignoring {:?} write",
                            f.name,
                            f.kind,
                            kind
                        ),
                        None => log::warn!("no uniform field for slot {}", slot.raw()),
                    }
                }
                return false;
            }
        };

        let start = field.offset;
        self.bytes[start..start + src.len()].copy_from_slice(src);
        self.dirty = true;
        true
    }
}
