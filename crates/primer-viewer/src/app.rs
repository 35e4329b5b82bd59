use anyhow::{Context, Result};

use primer_engine::coords::ColorRgba;
use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::device::Gpu;
use primer_engine::frame::FrameOrchestrator;
use primer_engine::input::Key;
use primer_engine::mesh::MeshData;
use primer_engine::render::{WgpuBackend, WgpuProgram};
use primer_engine::time::FpsCounter;

use crate::config::SceneConfig;

type Orchestrator = FrameOrchestrator<WgpuBackend, WgpuProgram>;

/// Animation time with pause and restart.
#[derive(Debug, Default, Clone, Copy)]
struct Playback {
    paused_at: Option<f64>,
    offset: f64,
}

impl Playback {
    fn time(&self, elapsed: f64) -> f64 {
        self.paused_at.unwrap_or(elapsed) - self.offset
    }

    fn toggle_pause(&mut self, elapsed: f64) {
        match self.paused_at.take() {
            Some(at) => self.offset += elapsed - at,
            None => self.paused_at = Some(elapsed),
        }
    }

    fn restart(&mut self, elapsed: f64) {
        self.offset = elapsed;
        if self.paused_at.is_some() {
            self.paused_at = Some(elapsed);
        }
    }
}

/// Spinning sphere: Escape quits, P or Space pauses, R restarts.
pub struct SphereApp {
    scene: SceneConfig,
    mesh: MeshData,
    orchestrator: Option<Orchestrator>,
    playback: Playback,
    fps: FpsCounter,
}

impl SphereApp {
    pub fn new(scene: SceneConfig) -> Result<Self> {
        let mesh = MeshData::sphere(scene.radius, scene.tessellation)
            .context("invalid sphere parameters")?;
        log::info!(
            "sphere r={} n={}: {} vertices, {} triangles",
            scene.radius,
            scene.tessellation,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            scene,
            mesh,
            orchestrator: None,
            playback: Playback::default(),
            fps: FpsCounter::new(),
        })
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_, '_>) -> AppControl {
        let elapsed = ctx.time.elapsed;

        if ctx.input.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }
        if ctx.input.key_pressed(Key::P) || ctx.input.key_pressed(Key::Space) {
            self.playback.toggle_pause(elapsed);
        }
        if ctx.input.key_pressed(Key::R) {
            self.playback.restart(elapsed);
        }
        AppControl::Continue
    }
}

impl App for SphereApp {
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let program = WgpuProgram::compile(
            gpu.device(),
            &self.scene.shaders,
            gpu.surface_format(),
            gpu.depth_format(),
        )
        .context("failed to build shader program")?;

        let backend = WgpuBackend::new(gpu.device(), gpu.queue());
        let mut orchestrator = Orchestrator::new(backend, program, self.scene.params);
        orchestrator
            .start(&self.mesh)
            .context("failed to upload sphere")?;

        self.orchestrator = Some(orchestrator);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_keys(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        let Some(orchestrator) = self.orchestrator.as_mut() else {
            return AppControl::Exit;
        };

        let time = self.playback.time(ctx.time.elapsed);
        let mut failure = None;

        let control = ctx.render(ColorRgba::slate(), |rctx, target| {
            match orchestrator.frame(time, rctx.viewport) {
                Ok(_) => {
                    let (backend, program) = orchestrator.parts_mut();
                    backend.encode(target, program);
                }
                Err(e) => failure = Some(e),
            }
        });

        if let Some(e) = failure {
            log::error!("frame failed: {e}");
            return AppControl::Exit;
        }
        if control == AppControl::Exit {
            orchestrator.backend_mut().mark_lost();
            return AppControl::Exit;
        }

        if self.fps.frame().is_some() {
            ctx.runtime.set_title(self.fps.title(&self.scene.title));
        }
        AppControl::Continue
    }

    fn on_exit(&mut self) {
        if let Some(mut orchestrator) = self.orchestrator.take() {
            let frames = orchestrator.frames_rendered();
            if let Some(released) = orchestrator.terminate() {
                log::info!(
                    "released {} buffers and {} layouts after {frames} frames",
                    released.vertex_buffers + released.index_buffers,
                    released.layouts
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut p = Playback::default();
        assert_eq!(p.time(2.0), 2.0);

        p.toggle_pause(2.0);
        assert_eq!(p.time(5.0), 2.0);

        p.toggle_pause(5.0);
        assert_eq!(p.time(6.0), 3.0);
    }

    #[test]
    fn restart_zeroes_time_even_when_paused() {
        let mut p = Playback::default();
        p.restart(4.0);
        assert_eq!(p.time(4.5), 0.5);

        p.toggle_pause(5.0);
        p.restart(7.0);
        assert_eq!(p.time(9.0), 0.0);
        p.toggle_pause(9.0);
        assert_eq!(p.time(10.0), 1.0);
    }

    #[test]
    fn bad_tessellation_fails_before_any_window() {
        let args = <crate::config::Args as clap::Parser>::parse_from(["primer", "--tessellation", "1"]);
        let scene = SceneConfig::from_args(&args).unwrap();
        assert!(SphereApp::new(scene).is_err());
    }
}
