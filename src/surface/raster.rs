//! CPU raster surface.
//!
//! Backed by an RGBA [`image::RgbaImage`] sized in device pixels. Shapes are
//! drawn with imageproc through its alpha-blending canvas so overlapping
//! discs and links composite like a 2D canvas would.

use super::Surface;
use crate::field::Hsla;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, Blend};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Surface rendering into an in-memory RGBA buffer.
pub struct RasterSurface {
    canvas: Blend<RgbaImage>,
    display: (f32, f32),
    scale: f32,
}

impl RasterSurface {
    /// Create an empty surface. The renderer sizes it on mount.
    pub fn new() -> Self {
        Self {
            canvas: Blend(RgbaImage::new(0, 0)),
            display: (0.0, 0.0),
            scale: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas.0
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas.0
    }

    /// Backing buffer size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.canvas.0.dimensions()
    }

    /// Displayed size in logical pixels.
    pub fn display_size(&self) -> (f32, f32) {
        self.display
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Count of pixels with any coverage, a cheap "did anything draw" check.
    pub fn painted_pixels(&self) -> usize {
        self.canvas.0.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[inline]
    fn to_device(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale, y * self.scale)
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RasterSurface {
    fn resize(&mut self, backing: (u32, u32), display: (f32, f32)) {
        // Reallocating also clears, as resizing a canvas element does.
        self.canvas = Blend(RgbaImage::new(backing.0, backing.1));
        self.display = display;
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn clear(&mut self, width: f32, height: f32) {
        let (buf_w, buf_h) = self.canvas.0.dimensions();
        let (w, h) = self.to_device(width, height);
        let max_x = (w.ceil().max(0.0) as u32).min(buf_w);
        let max_y = (h.ceil().max(0.0) as u32).min(buf_h);

        let image = &mut self.canvas.0;
        for y in 0..max_y {
            for x in 0..max_x {
                image.put_pixel(x, y, TRANSPARENT);
            }
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        let (cx, cy) = self.to_device(x, y);
        let r = (radius * self.scale).round().max(0.0) as i32;
        draw_filled_circle_mut(
            &mut self.canvas,
            (cx.round() as i32, cy.round() as i32),
            r,
            Rgba(color.to_rgba8()),
        );
    }

    // Segments are rasterised one device pixel wide. Thinner strokes keep
    // that footprint and give up opacity in proportion to their coverage.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Hsla) {
        let coverage = (width * self.scale).clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }
        let color = Hsla {
            alpha: color.alpha * coverage,
            ..color
        };
        let start = self.to_device(from.0, from.1);
        let end = self.to_device(to.0, to.1);
        draw_line_segment_mut(&mut self.canvas, start, end, Rgba(color.to_rgba8()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_white() -> Hsla {
        Hsla::new(0.0, 0.0, 100.0, 1.0)
    }

    #[test]
    fn test_resize_allocates_backing_buffer() {
        let mut surface = RasterSurface::new();
        surface.resize((1600, 1200), (800.0, 600.0));
        surface.set_scale(2.0);
        assert_eq!(surface.backing_size(), (1600, 1200));
        assert_eq!(surface.display_size(), (800.0, 600.0));
        assert_eq!(surface.scale(), 2.0);
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_circle_is_scaled_to_device_pixels() {
        let mut surface = RasterSurface::new();
        surface.resize((200, 200), (100.0, 100.0));
        surface.set_scale(2.0);
        surface.fill_circle(50.0, 50.0, 2.0, opaque_white());

        let image = surface.image();
        assert_eq!(image.get_pixel(100, 100).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(50, 50).0[3], 0);
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut surface = RasterSurface::new();
        surface.resize((64, 64), (64.0, 64.0));
        surface.fill_circle(32.0, 32.0, 5.0, opaque_white());
        surface.stroke_line((0.0, 0.0), (63.0, 63.0), 0.8, opaque_white());
        assert!(surface.painted_pixels() > 0);

        surface.clear(64.0, 64.0);
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_translucent_shapes_blend() {
        let mut surface = RasterSurface::new();
        surface.resize((16, 16), (16.0, 16.0));
        let half = Hsla::new(0.0, 0.0, 100.0, 0.5);
        surface.fill_circle(8.0, 8.0, 3.0, half);
        let once = surface.image().get_pixel(8, 8).0[3];
        surface.fill_circle(8.0, 8.0, 3.0, half);
        let twice = surface.image().get_pixel(8, 8).0[3];
        assert!(twice > once);
    }

    #[test]
    fn test_thin_line_alpha_follows_coverage() {
        let mut surface = RasterSurface::new();
        surface.resize((16, 16), (16.0, 16.0));
        surface.stroke_line((0.0, 8.0), (15.0, 8.0), 0.5, opaque_white());
        let alpha = surface.image().get_pixel(4, 8).0[3];
        assert!((120..=135).contains(&alpha), "alpha {}", alpha);

        surface.clear(16.0, 16.0);
        surface.stroke_line((0.0, 8.0), (15.0, 8.0), 0.0, opaque_white());
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_full_width_line_at_ratio_two_is_opaque() {
        let mut surface = RasterSurface::new();
        surface.resize((32, 32), (16.0, 16.0));
        surface.set_scale(2.0);
        surface.stroke_line((0.0, 8.0), (15.0, 8.0), 0.8, opaque_white());
        assert_eq!(surface.image().get_pixel(8, 16).0[3], 255);
    }

    #[test]
    fn test_drawing_outside_buffer_is_clipped() {
        let mut surface = RasterSurface::new();
        surface.resize((10, 10), (10.0, 10.0));
        surface.fill_circle(-20.0, -20.0, 2.0, opaque_white());
        surface.stroke_line((-30.0, -30.0), (-25.0, -25.0), 0.8, opaque_white());
        assert_eq!(surface.painted_pixels(), 0);
    }
}
