//! Drawable surfaces.
//!
//! The renderer paints through the [`Surface`] trait in logical pixels and
//! never touches pixels directly. Backends:
//! - [`RasterSurface`]: CPU RGBA buffer drawn with imageproc
//! - [`DisplayList`]: records draw commands for replay, inspection or JSON export

pub mod display_list;
pub mod raster;

pub use display_list::{DisplayList, DrawCommand};
pub use raster::RasterSurface;

use crate::field::Hsla;

/// A 2D drawing target sized to the viewport.
///
/// All coordinates are logical pixels; the backend multiplies them by the
/// scale set through [`Surface::set_scale`].
pub trait Surface {
    /// Whether the surface can provide a 2D drawing context at all.
    ///
    /// A renderer mounted on a surface returning `false` stays inert.
    fn has_context_2d(&self) -> bool {
        true
    }

    /// Reallocate the backing buffer and set the displayed (logical) size.
    fn resize(&mut self, backing: (u32, u32), display: (f32, f32));

    /// Set the uniform logical-to-backing scale transform.
    fn set_scale(&mut self, scale: f32);

    /// Clear the logical rectangle `(0, 0, width, height)` to transparent.
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a disc.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Hsla);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn has_context_2d(&self) -> bool {
        (**self).has_context_2d()
    }

    fn resize(&mut self, backing: (u32, u32), display: (f32, f32)) {
        (**self).resize(backing, display)
    }

    fn set_scale(&mut self, scale: f32) {
        (**self).set_scale(scale)
    }

    fn clear(&mut self, width: f32, height: f32) {
        (**self).clear(width, height)
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        (**self).fill_circle(x, y, radius, color)
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Hsla) {
        (**self).stroke_line(from, to, width, color)
    }
}
