//! The drawing capability effects render against.

use crate::{PixelBuffer, Point, Rgb, Rgba, Size};

/// A 2D pixel surface owned by the host.
///
/// Effects never own a surface; the manager lends one for the duration of a
/// frame. Implementations clip anything drawn outside `size()`.
pub trait Surface {
    /// Current pixel dimensions. May change between frames on resize.
    fn size(&self) -> Size;

    /// Composite a (possibly translucent) rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// Draw a single glyph with its top-left corner at `(x, y)`.
    ///
    /// `glow` requests a soft halo in the given color.
    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb, glow: Option<Rgb>);

    /// Stroke a line segment.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    /// Stretch `buffer` over a `dest`-sized region at the origin using
    /// nearest-neighbor sampling.
    fn blit_scaled(&mut self, buffer: &PixelBuffer, dest: Size);

    /// Composite `color` over the whole surface.
    fn fill(&mut self, color: Rgba) {
        let size = self.size();
        self.fill_rect(0.0, 0.0, size.width as f32, size.height as f32, color);
    }
}
