//! Drawing surface abstraction
//!
//! Entities draw themselves onto a [`Surface`]. The browser build backs it
//! with a 2D canvas; tests and the native demo use [`RecordingSurface`].

pub mod color;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::Color;
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

/// A viewport-sized 2D drawing target
pub trait Surface {
    /// Match the backing store to the viewport
    fn resize(&mut self, width: f32, height: f32);

    /// Paint the whole surface with `color` at `alpha` (trail fade)
    fn fade(&mut self, color: Color, alpha: f32);

    /// Draw a filled circle using the current global alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Push draw state (global alpha)
    fn save(&mut self);

    /// Pop draw state pushed by [`Surface::save`]
    fn restore(&mut self);

    /// Global alpha for subsequent draws until the next restore
    fn set_global_alpha(&mut self, alpha: f32);

    /// Run `draw` with `alpha` applied, restoring the previous opacity after
    fn with_alpha<F>(&mut self, alpha: f32, draw: F)
    where
        F: FnOnce(&mut Self),
        Self: Sized,
    {
        self.save();
        self.set_global_alpha(alpha.clamp(0.0, 1.0));
        draw(self);
        self.restore();
    }
}
