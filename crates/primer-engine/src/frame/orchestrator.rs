use thiserror::Error;

use crate::coords::Viewport;
use crate::geometry::{GeometryBuffers, Released, RenderBackend};
use crate::math::Mat4;
use crate::mesh::{Mesh, MeshData, MeshError};
use crate::shader::{ShaderProgram, SlotId, MODEL, MODELVIEW, ROTATION, TIME};

use super::{FrameTransforms, TransformParams};

/// Lifecycle of a [`FrameOrchestrator`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameState {
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("frame orchestrator is {actual:?}, expected {expected:?}")]
    InvalidState { expected: FrameState, actual: FrameState },

    #[error("mesh setup failed: {0}")]
    Mesh(#[from] MeshError),
}

/// Parameter slots resolved once at start. `None` means the program lacks it.
#[derive(Debug, Default, Clone, Copy)]
struct Slots {
    modelview: Option<SlotId>,
    model: Option<SlotId>,
    rotation: Option<SlotId>,
    time: Option<SlotId>,
}

impl Slots {
    fn resolve<S: ShaderProgram>(program: &S) -> Self {
        let lookup = |name: &str| {
            let slot = program.find_parameter_slot(name);
            if slot.is_none() {
                log::warn!("shader parameter `{name}` not found; writes to it are skipped");
            }
            slot
        };

        Self {
            modelview: lookup(MODELVIEW),
            model: lookup(MODEL),
            rotation: lookup(ROTATION),
            time: lookup(TIME),
        }
    }
}

/// Drives the per-frame transform/upload/draw sequence for one mesh.
///
/// `Uninitialized → Running → Terminated`. Buffers are released exactly once,
/// on the transition into `Terminated`; `Drop` performs that transition if
/// nothing else did.
pub struct FrameOrchestrator<B: RenderBackend, S: ShaderProgram> {
    state: FrameState,
    backend: B,
    program: S,
    buffers: GeometryBuffers,
    mesh: Option<Mesh>,
    params: TransformParams,
    slots: Slots,
    frames: u64,
}

impl<B: RenderBackend, S: ShaderProgram> FrameOrchestrator<B, S> {
    pub fn new(backend: B, program: S, params: TransformParams) -> Self {
        Self {
            state: FrameState::Uninitialized,
            backend,
            program,
            buffers: GeometryBuffers::new(),
            mesh: None,
            params,
            slots: Slots::default(),
            frames: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Uploads `data`, resolves parameter slots and enters `Running`.
    ///
    /// Each missing slot is reported with one warning here and then skipped
    /// silently every frame. On failure, anything already uploaded is
    /// released and the orchestrator is `Terminated`.
    pub fn start(&mut self, data: &MeshData) -> Result<(), OrchestratorError> {
        self.expect_state(FrameState::Uninitialized)?;

        let mesh = match Mesh::upload(data, &mut self.buffers, &mut self.backend) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::error!("mesh upload failed: {e}");
                self.buffers.release_all(&mut self.backend);
                self.state = FrameState::Terminated;
                return Err(e.into());
            }
        };

        log::info!(
            "frame loop starting: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.slots = Slots::resolve(&self.program);
        self.mesh = Some(mesh);
        self.state = FrameState::Running;
        Ok(())
    }

    /// Runs one frame at `time` seconds since start.
    ///
    /// Order: build transforms, activate the program, write `modelview`,
    /// `model`, `rotation` and `time`, set the viewport, draw the mesh.
    /// Presenting the frame is left to the caller.
    pub fn frame(&mut self, time: f64, viewport: Viewport) -> Result<FrameTransforms, OrchestratorError> {
        self.expect_state(FrameState::Running)?;
        let Some(mesh) = self.mesh.as_ref() else {
            return Err(OrchestratorError::InvalidState {
                expected: FrameState::Running,
                actual: self.state,
            });
        };

        let t = time as f32;
        let xf = FrameTransforms::at(t, &self.params);

        self.program.activate();
        write_matrix(&mut self.program, self.slots.modelview, &xf.modelview);
        write_matrix(&mut self.program, self.slots.model, &xf.model);
        write_matrix(&mut self.program, self.slots.rotation, &xf.rotation);
        if let Some(slot) = self.slots.time {
            self.program.set_float(slot, t);
        }

        self.backend.set_viewport(viewport);
        mesh.render(&mut self.backend);

        self.frames += 1;
        Ok(xf)
    }

    /// Enters `Terminated`, releasing buffers if leaving `Running`.
    ///
    /// Returns what was released, or `None` if this call changed nothing
    /// that needed cleanup. Safe to call any number of times.
    pub fn terminate(&mut self) -> Option<Released> {
        match self.state {
            FrameState::Running => {
                self.mesh = None;
                let released = self.buffers.release_all(&mut self.backend);
                self.state = FrameState::Terminated;
                log::info!(
                    "frame loop terminated after {} frames; released {} GPU objects",
                    self.frames,
                    released.total()
                );
                Some(released)
            }
            FrameState::Uninitialized => {
                self.state = FrameState::Terminated;
                None
            }
            FrameState::Terminated => None,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn params(&self) -> &TransformParams {
        &self.params
    }

    pub fn set_params(&mut self, params: TransformParams) {
        self.params = params;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn program(&self) -> &S {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut S {
        &mut self.program
    }

    /// Backend and program borrowed together, for encoding recorded work.
    pub fn parts_mut(&mut self) -> (&mut B, &mut S) {
        (&mut self.backend, &mut self.program)
    }

    fn expect_state(&self, expected: FrameState) -> Result<(), OrchestratorError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(OrchestratorError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}

impl<B: RenderBackend, S: ShaderProgram> Drop for FrameOrchestrator<B, S> {
    fn drop(&mut self) {
        if self.state == FrameState::Running {
            log::debug!("frame orchestrator dropped while running");
            self.terminate();
        }
    }
}

fn write_matrix<S: ShaderProgram>(program: &mut S, slot: Option<SlotId>, value: &Mat4) {
    if let Some(slot) = slot {
        program.set_matrix4(slot, value);
    }
}
