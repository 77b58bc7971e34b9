//! Surface dimensions and points.

/// Pixel dimensions of a drawing surface or simulation grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (e.g. a minimized window).
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells in a grid of this size.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Integer-divide both dimensions by `factor`.
    ///
    /// A non-empty surface always yields at least one cell per axis, so
    /// coarse grids never collapse on small windows.
    pub fn downsample(self, factor: u32) -> Size {
        if self.is_empty() {
            return Size::ZERO;
        }
        let factor = factor.max(1);
        Size::new((self.width / factor).max(1), (self.height / factor).max(1))
    }
}

/// A point in surface pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample() {
        assert_eq!(Size::new(800, 600).downsample(4), Size::new(200, 150));
        assert_eq!(Size::new(361, 241).downsample(6), Size::new(60, 40));
        assert_eq!(Size::new(3, 3).downsample(4), Size::new(1, 1));
        assert_eq!(Size::new(0, 600).downsample(4), Size::ZERO);
    }

    #[test]
    fn test_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
