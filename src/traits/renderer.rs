use crate::core::Viewport;
use crate::scene::Scene;

/// Draws a scene to some render target
pub trait FrameRenderer {
    /// Draw one frame of `scene`
    ///
    /// Recoverable target errors are handled internally by skipping the
    /// frame; an `Err` means rendering cannot continue.
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()>;

    /// Match the render target to new surface dimensions
    fn resize(&mut self, viewport: Viewport);
}
