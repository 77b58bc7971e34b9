//! Off-screen RGBA pixel buffer.

use crate::{Rgb, Size};

/// A tightly packed RGBA8 buffer, `width * height * 4` bytes long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer of transparent black pixels.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            data: vec![0; size.area() * 4],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Raw RGBA bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Write an opaque pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Read a pixel as `(color, alpha)`.
    pub fn get(&self, x: u32, y: u32) -> Option<(Rgb, u8)> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some((Rgb::new(px[0], px[1], px[2]), px[3]))
    }

    /// Nearest-neighbor lookup for a destination pixel when this buffer is
    /// stretched over `dest`.
    pub fn sample_scaled(&self, dest: Size, x: u32, y: u32) -> Option<Rgb> {
        if self.size.is_empty() || dest.is_empty() {
            return None;
        }
        let sx = (x as u64 * self.size.width as u64 / dest.width as u64) as u32;
        let sy = (y as u64 * self.size.height as u64 / dest.height as u64) as u32;
        self.get(sx, sy).map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_len_matches_size() {
        let buf = PixelBuffer::new(Size::new(7, 5));
        assert_eq!(buf.data().len(), 7 * 5 * 4);
        assert!(PixelBuffer::new(Size::ZERO).data().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut buf = PixelBuffer::new(Size::new(2, 2));
        buf.set(1, 1, Rgb::new(1, 2, 3));
        buf.set(5, 5, Rgb::new(9, 9, 9));
        assert_eq!(buf.get(1, 1), Some((Rgb::new(1, 2, 3), 255)));
        assert_eq!(buf.get(0, 0), Some((Rgb::BLACK, 0)));
        assert_eq!(buf.get(2, 0), None);
    }

    #[test]
    fn test_sample_scaled_nearest() {
        let mut buf = PixelBuffer::new(Size::new(2, 1));
        buf.set(0, 0, Rgb::new(255, 0, 0));
        buf.set(1, 0, Rgb::new(0, 0, 255));
        let dest = Size::new(8, 4);
        assert_eq!(buf.sample_scaled(dest, 3, 3), Some(Rgb::new(255, 0, 0)));
        assert_eq!(buf.sample_scaled(dest, 4, 0), Some(Rgb::new(0, 0, 255)));
        assert_eq!(buf.sample_scaled(Size::ZERO, 0, 0), None);
    }
}
