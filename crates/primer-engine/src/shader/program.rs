use crate::math::Mat4;

/// Handle to a named parameter slot inside a shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Shader collaborator as seen by the frame pipeline.
///
/// The program's lifecycle (compile, link, destroy) belongs to whoever created
/// it; the frame pipeline only looks slots up and writes values into them.
pub trait ShaderProgram {
    /// Returns `None` when the program has no parameter called `name`.
    fn find_parameter_slot(&self, name: &str) -> Option<SlotId>;

    /// Makes this the program used by subsequent draws.
    fn activate(&mut self);

    fn set_matrix4(&mut self, slot: SlotId, value: &Mat4);

    fn set_float(&mut self, slot: SlotId, value: f32);
}
