/// Drawable area in physical pixels, origin top-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Full-surface viewport for a `(width, height)` framebuffer size.
    #[inline]
    pub fn from_size((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Clips the viewport to a `(width, height)` target.
    ///
    /// Returns `None` when nothing of it lies inside the target.
    pub fn clipped_to(self, (tw, th): (u32, u32)) -> Option<Self> {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = (self.x + self.width).min(tw as f32);
        let y1 = (self.y + self.height).min(th as f32);

        let clipped = Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        };
        clipped.is_valid().then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_shrinks_to_target() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.clipped_to((640, 480)), Some(Viewport::new(640.0, 480.0)));
        assert_eq!(vp.clipped_to((1024, 768)), Some(vp));
    }

    #[test]
    fn empty_viewport_is_rejected() {
        assert_eq!(Viewport::new(0.0, 600.0).clipped_to((640, 480)), None);
        assert!(!Viewport::default().is_valid());
    }
}
