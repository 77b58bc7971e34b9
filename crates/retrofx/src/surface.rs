//! Terminal-backed drawing surface.
//!
//! Each terminal cell covers `CELL_WIDTH x CELL_HEIGHT` virtual pixels and is
//! split into two square dots rendered with an upper half block, giving the
//! pixel effects twice the vertical resolution of the text grid. Glyphs live
//! in a separate layer and fade out under translucent fills.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use retrofx_core::{PixelBuffer, Point, Rgb, Rgba, Size, Surface};
use retrofx_effects::BACKDROP;

/// Virtual pixels per terminal cell.
pub const CELL_WIDTH: u32 = 7;
pub const CELL_HEIGHT: u32 = 14;

/// Virtual pixels per half-block dot along each axis.
const DOT: u32 = CELL_WIDTH;

/// Glyphs whose color is within this distance of the background vanish.
const GLYPH_FLOOR: u8 = 12;

/// Strength of the halo tint behind glowing glyphs.
const GLOW_ALPHA: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    color: Rgb,
    glow: bool,
}

/// A [`Surface`] drawn into a ratatui buffer.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    /// Row-major dots, `cols` wide and `rows * 2` tall.
    dots: Vec<Rgb>,
    /// Row-major glyph layer, one slot per cell.
    glyphs: Vec<Option<Glyph>>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut surface = Self::default();
        surface.resize(cols, rows);
        surface
    }

    /// Match a new terminal size. Contents are reset to the backdrop.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.dots = vec![BACKDROP; cols as usize * rows as usize * 2];
        self.glyphs = vec![None; cols as usize * rows as usize];
    }

    /// Wipe to the backdrop.
    pub fn clear(&mut self) {
        self.dots.fill(BACKDROP);
        self.glyphs.fill(None);
    }

    fn dot_width(&self) -> usize {
        self.cols as usize
    }

    fn dot_height(&self) -> usize {
        self.rows as usize * 2
    }

    pub fn dot(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.dot_width() || y >= self.dot_height() {
            return None;
        }
        Some(self.dots[y * self.dot_width() + x])
    }

    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols as usize || row >= self.rows as usize {
            return None;
        }
        self.glyphs[row * self.cols as usize + col].map(|g| g.ch)
    }

    fn blend_dot(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.dot_width() && y < self.dot_height() {
            let i = y * self.dot_width() + x;
            self.dots[i] = self.dots[i].blend(color);
        }
    }
}

fn near(a: Rgb, b: Rgb) -> bool {
    a.r.abs_diff(b.r) <= GLYPH_FLOOR
        && a.g.abs_diff(b.g) <= GLYPH_FLOOR
        && a.b.abs_diff(b.b) <= GLYPH_FLOOR
}

/// Dot range covered by `[start, start + len)` virtual pixels, clamped to
/// `limit` dots.
fn dot_span(start: f32, len: f32, limit: usize) -> (usize, usize) {
    let dot = DOT as f32;
    let lo = (start / dot).floor().max(0.0) as usize;
    let hi = ((start + len) / dot).ceil().clamp(0.0, limit as f32) as usize;
    (lo.min(limit), hi)
}

/// Clip a segment to `[0, w] x [0, h]` (Liang-Barsky).
fn clip_line(from: Point, to: Point, w: f32, h: f32) -> Option<(Point, Point)> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [(-dx, from.x), (dx, w - from.x), (-dy, from.y), (dy, h - from.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(from.x + t0 * dx, from.y + t0 * dy),
        Point::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}

impl Surface for TerminalSurface {
    fn size(&self) -> Size {
        Size::new(
            self.cols as u32 * CELL_WIDTH,
            self.rows as u32 * CELL_HEIGHT,
        )
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        if color.a <= 0.0 || !(width > 0.0 && height > 0.0) {
            return;
        }
        let w = self.dot_width();
        let (x0, x1) = dot_span(x, width, w);
        let (y0, y1) = dot_span(y, height, self.dot_height());

        for dy in y0..y1 {
            for dx in x0..x1 {
                let i = dy * w + dx;
                self.dots[i] = self.dots[i].blend(color);
            }
        }

        let cols = self.cols as usize;
        for row in y0 / 2..y1.div_ceil(2) {
            for col in x0..x1 {
                let bg = self.dots[row * 2 * w + col];
                let faded = match &mut self.glyphs[row * cols + col] {
                    Some(glyph) => {
                        glyph.color = glyph.color.blend(color);
                        near(glyph.color, bg)
                    }
                    None => false,
                };
                if faded {
                    self.glyphs[row * cols + col] = None;
                }
            }
        }
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb, glow: Option<Rgb>) {
        if !(x >= 0.0 && y >= 0.0) {
            return;
        }
        let col = (x / CELL_WIDTH as f32) as usize;
        let row = (y / CELL_HEIGHT as f32) as usize;
        if col >= self.cols as usize || row >= self.rows as usize {
            return;
        }
        self.glyphs[row * self.cols as usize + col] = Some(Glyph {
            ch,
            color,
            glow: glow.is_some(),
        });
        if let Some(halo) = glow {
            self.blend_dot(col, row * 2, halo.with_alpha(GLOW_ALPHA));
            self.blend_dot(col, row * 2 + 1, halo.with_alpha(GLOW_ALPHA));
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        if color.a <= 0.0 || self.dots.is_empty() {
            return;
        }
        let dot = DOT as f32;
        let from = Point::new(from.x / dot, from.y / dot);
        let to = Point::new(to.x / dot, to.y / dot);
        let Some((a, b)) = clip_line(
            from,
            to,
            self.dot_width() as f32,
            self.dot_height() as f32,
        ) else {
            return;
        };

        // Sub-dot widths can only be shown as coverage.
        let coverage = (0.4 + width.max(0.0) / 5.0).min(1.0);
        let ink = Rgba::new(color.r, color.g, color.b, color.a * coverage);

        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let px = a.x + (b.x - a.x) * t;
            let py = a.y + (b.y - a.y) * t;
            self.blend_dot(px as usize, py as usize, ink);
        }
    }

    fn blit_scaled(&mut self, buffer: &PixelBuffer, dest: Size) {
        let w = self.dot_width();
        for dy in 0..self.dot_height() {
            for dx in 0..w {
                let vx = dx as u32 * DOT + DOT / 2;
                let vy = dy as u32 * DOT + DOT / 2;
                if vx >= dest.width || vy >= dest.height {
                    continue;
                }
                if let Some(color) = buffer.sample_scaled(dest, vx, vy) {
                    self.dots[dy * w + dx] = color;
                }
            }
        }
        self.glyphs.fill(None);
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Widget for &TerminalSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let w = self.dot_width();
        for row in 0..self.rows.min(area.height) {
            for col in 0..self.cols.min(area.width) {
                let (c, r) = (col as usize, row as usize);
                let upper = self.dots[r * 2 * w + c];
                let lower = self.dots[(r * 2 + 1) * w + c];
                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };
                match self.glyphs[r * self.cols as usize + c] {
                    Some(glyph) => {
                        cell.set_char(glyph.ch)
                            .set_fg(to_color(glyph.color))
                            .set_bg(to_color(upper.blend(lower.with_alpha(0.5))));
                        if glyph.glow {
                            cell.set_style(Style::new().add_modifier(Modifier::BOLD));
                        }
                    }
                    None => {
                        cell.set_char('▀')
                            .set_fg(to_color(upper))
                            .set_bg(to_color(lower));
                    }
                }
            }
        }
    }
}
