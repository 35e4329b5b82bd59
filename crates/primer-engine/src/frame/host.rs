use crate::coords::Viewport;
use crate::geometry::RenderBackend;
use crate::input::Key;
use crate::mesh::MeshData;
use crate::shader::ShaderProgram;

use super::{FrameOrchestrator, OrchestratorError};

/// Window/context provider for a pull-style frame loop.
///
/// The winit runtime is push-style and drives `core::App` instead; this seam
/// exists for hosts that own their loop, headless ones included.
pub trait FrameHost {
    /// External close signal (window closed, cancel requested).
    fn should_close(&self) -> bool;

    fn request_close(&mut self);

    /// Wall-clock seconds since the host started.
    fn elapsed_seconds(&self) -> f64;

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    fn is_key_pressed(&self, key: Key) -> bool;

    fn present(&mut self);

    fn poll_events(&mut self);
}

/// Runs `orchestrator` on `host` until the host asks to close.
///
/// Each iteration reads the elapsed time, runs one frame, presents, then
/// polls input; Escape requests a close. The orchestrator is terminated on
/// every exit path. Returns the number of frames rendered.
pub fn run<H, B, S>(
    host: &mut H,
    orchestrator: &mut FrameOrchestrator<B, S>,
    mesh: &MeshData,
) -> Result<u64, OrchestratorError>
where
    H: FrameHost,
    B: RenderBackend,
    S: ShaderProgram,
{
    orchestrator.start(mesh)?;

    let result = loop {
        if host.should_close() {
            break Ok(());
        }

        let time = host.elapsed_seconds();
        let viewport = Viewport::from_size(host.size());
        if let Err(e) = orchestrator.frame(time, viewport) {
            log::error!("frame failed: {e}");
            break Err(e);
        }

        host.present();
        host.poll_events();

        if host.is_key_pressed(Key::Escape) {
            log::info!("escape pressed, closing");
            host.request_close();
        }
    };

    orchestrator.terminate();
    result.map(|()| orchestrator.frames_rendered())
}
