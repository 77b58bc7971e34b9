//! Fluid color field animation (stateless per frame, driven by elapsed time).

use std::f32::consts::PI;

use retrofx_core::{AnimationSpeed, EffectKind, PixelBuffer, Rgb, Size, Surface};

use crate::effect::{Effect, EffectSettings};

/// Surface pixels per field cell along each axis.
const DOWNSAMPLE: u32 = 4;
/// Spatial frequency of the base sinusoids.
const FREQUENCY: f32 = 0.05;
/// Elapsed-time increment per frame.
const TIME_STEP: f32 = 0.02;

/// Scalar field value in `-1.0..=1.0` at a grid cell.
///
/// Average of a horizontal wave, a half-frequency vertical wave, a
/// half-frequency diagonal wave and a radial wave around the grid center.
pub fn field_value(x: f32, y: f32, grid: Size, time: f32) -> f32 {
    let cx = grid.width as f32 / 2.0;
    let cy = grid.height as f32 / 2.0;

    let v1 = (x * FREQUENCY + time).sin();
    let v2 = ((y * FREQUENCY + time) * 0.5).sin();
    let v3 = ((x * FREQUENCY + y * FREQUENCY + time) * 0.5).sin();
    let v4 = (((x - cx).powi(2) + (y - cy).powi(2)).sqrt() * FREQUENCY + time).sin();

    (v1 + v2 + v3 + v4) / 4.0
}

/// Map a field value to the cyan/magenta palette.
pub fn field_color(value: f32, time: f32) -> Rgb {
    let phase = value * PI;
    let r = ((phase + time).sin() + 1.0) * 60.0;
    let g = ((phase + time * 1.5).sin() + 1.0) * 80.0 + 50.0;
    let b = ((phase + time * 0.5).sin() + 1.0) * 127.0;
    Rgb::new(r as u8, g as u8, b as u8)
}

/// Fill `buffer` with the field at `time`.
pub fn render_field(buffer: &mut PixelBuffer, time: f32) {
    let grid = buffer.size();
    for y in 0..grid.height {
        for x in 0..grid.width {
            let v = field_value(x as f32, y as f32, grid, time);
            buffer.set(x, y, field_color(v, time));
        }
    }
}

/// Smoothly shifting color field computed on a coarse grid.
#[derive(Debug)]
pub struct FluidFieldEffect {
    size: Size,
    buffer: PixelBuffer,
    time: f32,
    speed: AnimationSpeed,
}

impl FluidFieldEffect {
    pub fn new(size: Size, settings: &EffectSettings, _seed: u64) -> Self {
        let mut effect = Self {
            size,
            buffer: PixelBuffer::default(),
            time: 0.0,
            speed: settings.speed,
        };
        effect.resize(size);
        effect
    }

    pub fn grid(&self) -> Size {
        self.buffer.size()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl Effect for FluidFieldEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Plasma
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.buffer = PixelBuffer::new(size.downsample(DOWNSAMPLE));
    }

    fn advance(&mut self, surface: &mut dyn Surface) {
        if self.size.is_empty() {
            return;
        }
        render_field(&mut self.buffer, self.time);
        surface.blit_scaled(&self.buffer, self.size);
        self.time += TIME_STEP * self.speed.factor();
    }

    fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingSurface};

    #[test]
    fn test_grid_is_quarter_resolution() {
        let effect = FluidFieldEffect::new(Size::new(800, 600), &EffectSettings::default(), 0);
        assert_eq!(effect.grid(), Size::new(200, 150));
        assert_eq!(effect.buffer().data().len(), 200 * 150 * 4);
    }

    #[test]
    fn test_field_is_deterministic() {
        let grid = Size::new(40, 30);
        let mut a = PixelBuffer::new(grid);
        let mut b = PixelBuffer::new(grid);
        render_field(&mut a, 2.5);
        render_field(&mut b, 2.5);
        assert_eq!(a, b);

        let mut c = PixelBuffer::new(grid);
        render_field(&mut c, 2.52);
        assert_ne!(a, c);
    }

    #[test]
    fn test_field_value_bounds() {
        let grid = Size::new(50, 50);
        for y in 0..50 {
            for x in 0..50 {
                let v = field_value(x as f32, y as f32, grid, 1.7);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_field_color_channel_ranges() {
        for i in -10..=10 {
            let c = field_color(i as f32 / 10.0, 0.8);
            assert!(c.r <= 120);
            assert!((50..=210).contains(&c.g));
        }
    }

    #[test]
    fn test_frame_blits_opaque_buffer_and_advances_time() {
        let mut effect = FluidFieldEffect::new(Size::new(64, 48), &EffectSettings::default(), 0);
        let mut surface = RecordingSurface::new(64, 48);
        effect.advance(&mut surface);
        effect.advance(&mut surface);

        assert!((effect.time() - 2.0 * TIME_STEP).abs() < 1e-6);
        match surface.last_blit() {
            Some(DrawCall::Blit { source, dest, data }) => {
                assert_eq!(*source, Size::new(16, 12));
                assert_eq!(*dest, Size::new(64, 48));
                assert!(data.chunks(4).all(|px| px[3] == 255));
            }
            other => panic!("expected blit, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_size_is_skipped() {
        let mut effect = FluidFieldEffect::new(Size::ZERO, &EffectSettings::default(), 0);
        let mut surface = RecordingSurface::new(0, 0);
        effect.advance(&mut surface);
        assert!(surface.calls.is_empty());
        assert_eq!(effect.time(), 0.0);
    }
}
