/// Viewport - pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create new viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a zero height yields infinity, callers skip those sizes
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Minimized windows report a zero dimension
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
