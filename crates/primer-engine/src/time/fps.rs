use std::time::{Duration, Instant};

/// Counts presented frames and reports the rate once per interval.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    interval: Duration,
    last_fps: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            interval,
            last_fps: None,
        }
    }

    /// Records one frame. Returns the frame rate when an interval has closed.
    pub fn frame(&mut self) -> Option<f64> {
        self.frame_at(Instant::now())
    }

    /// Most recent rate, if an interval has closed yet.
    pub fn fps(&self) -> Option<f64> {
        self.last_fps
    }

    /// Window title decorated with the current rate, e.g. `"primer (60 fps)"`.
    pub fn title(&self, base: &str) -> String {
        match self.last_fps {
            Some(fps) => format!("{base} ({fps:.0} fps)"),
            None => base.to_owned(),
        }
    }

    fn frame_at(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;

        let span = now.saturating_duration_since(self.window_start);
        if span < self.interval {
            return None;
        }

        let fps = f64::from(self.frames) / span.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        self.last_fps = Some(fps);
        Some(fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
