use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Call order: `on_start` once, then any number of `on_window_event` /
/// `on_frame`, then `on_exit` exactly once. `on_exit` also runs when
/// `on_start` fails or the window is closed.
pub trait App {
    /// Called once the window and GPU exist, before the first frame.
    /// An error here is fatal: no frame is rendered.
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()>;

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    fn on_exit(&mut self) {}
}
