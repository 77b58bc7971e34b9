//! Surface double that records draw calls.

use retrofx_core::{PixelBuffer, Point, Rgb, Rgba, Size, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect { x: f32, y: f32, width: f32, height: f32, color: Rgba },
    Glyph { ch: char, x: f32, y: f32, color: Rgb, glow: Option<Rgb> },
    Line { from: Point, to: Point, color: Rgba, width: f32 },
    Blit { source: Size, dest: Size, data: Vec<u8> },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Glyph { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn last_blit(&self) -> Option<&DrawCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, DrawCall::Blit { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb, glow: Option<Rgb>) {
        self.calls.push(DrawCall::Glyph {
            ch,
            x,
            y,
            color,
            glow,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn blit_scaled(&mut self, buffer: &PixelBuffer, dest: Size) {
        self.calls.push(DrawCall::Blit {
            source: buffer.size(),
            dest,
            data: buffer.data().to_vec(),
        });
    }
}
