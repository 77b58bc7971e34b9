//! Bottom-up fire animation (stateful).

use rand::{Rng, SeedableRng, rngs::StdRng};
use retrofx_core::{AnimationSpeed, EffectKind, PixelBuffer, Size, Surface};

use crate::color::{FIRE_MAX, fire_color};
use crate::effect::{Effect, EffectSettings};

/// Surface pixels per fire cell along each axis.
const DOWNSAMPLE: u32 = 6;

/// Heat lost when moving along a drift roll.
///
/// Roll 0 drifts right, 1 goes straight up and 2 drifts left. An odd drift
/// magnitude costs one step; going straight up is free.
fn drift_cost(roll: u8) -> u8 {
    ((1 - i32::from(roll)).unsigned_abs() & 1) as u8
}

/// Classic heat-spreading fire on a coarse intensity grid.
///
/// The bottom row is the heat source and is held at [`FIRE_MAX`]. Every
/// frame heat climbs one row with a random sideways drift; the destination
/// column is clamped at the grid edges so drift never spills into a
/// neighboring row.
#[derive(Debug)]
pub struct FireEffect {
    size: Size,
    grid: Size,
    intensity: Vec<u8>,
    buffer: PixelBuffer,
    rng: StdRng,
}

impl FireEffect {
    pub fn new(size: Size, _settings: &EffectSettings, seed: u64) -> Self {
        let mut effect = Self {
            size,
            grid: Size::ZERO,
            intensity: Vec::new(),
            buffer: PixelBuffer::default(),
            rng: StdRng::seed_from_u64(seed),
        };
        effect.resize(size);
        effect
    }

    pub fn grid(&self) -> Size {
        self.grid
    }

    /// Row-major intensity indices into the fire palette.
    pub fn intensity(&self) -> &[u8] {
        &self.intensity
    }

    fn ignite(&mut self) {
        let w = self.grid.width as usize;
        if let Some(start) = self.intensity.len().checked_sub(w) {
            self.intensity[start..].fill(FIRE_MAX);
        }
    }

    /// Move heat up one row across the whole grid.
    pub fn spread(&mut self) {
        let w = self.grid.width as usize;
        let h = self.grid.height as usize;

        for x in 0..w {
            for y in 1..h {
                let heat = self.intensity[y * w + x];
                let above = (y - 1) * w;
                if heat == 0 {
                    self.intensity[above + x] = 0;
                    continue;
                }
                let roll = self.rng.random_range(0..3u8);
                let dst_x = (x + 1).saturating_sub(roll as usize).min(w - 1);
                self.intensity[above + dst_x] = heat - drift_cost(roll);
            }
        }

        self.ignite();
    }

    fn paint(&mut self) {
        let w = self.grid.width as usize;
        for (i, &heat) in self.intensity.iter().enumerate() {
            self.buffer
                .set((i % w) as u32, (i / w) as u32, fire_color(heat));
        }
    }
}

impl Effect for FireEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Fire
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.grid = size.downsample(DOWNSAMPLE);
        self.intensity = vec![0; self.grid.area()];
        self.buffer = PixelBuffer::new(self.grid);
        self.ignite();
    }

    fn advance(&mut self, surface: &mut dyn Surface) {
        if self.grid.is_empty() {
            return;
        }
        self.spread();
        self.paint();
        surface.blit_scaled(&self.buffer, self.size);
    }

    // Heat moves one row per frame regardless of speed.
    fn set_speed(&mut self, _speed: AnimationSpeed) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FIRE_PALETTE;
    use crate::testing::{DrawCall, RecordingSurface};

    fn fire(width: u32, height: u32, seed: u64) -> FireEffect {
        FireEffect::new(Size::new(width, height), &EffectSettings::default(), seed)
    }

    fn bottom_row(effect: &FireEffect) -> &[u8] {
        let w = effect.grid().width as usize;
        &effect.intensity()[effect.intensity().len() - w..]
    }

    #[test]
    fn test_initial_state() {
        let effect = fire(360, 240, 1);
        assert_eq!(effect.grid(), Size::new(60, 40));
        assert_eq!(effect.intensity().len(), 60 * 40);
        assert!(bottom_row(&effect).iter().all(|&v| v == FIRE_MAX));
        let interior = &effect.intensity()[..60 * 39];
        assert!(interior.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_hundred_frames_stay_in_palette() {
        let mut effect = fire(360, 240, 2024);
        let mut surface = RecordingSurface::new(360, 240);
        for _ in 0..100 {
            effect.advance(&mut surface);
            surface.calls.clear();
            assert!(effect.intensity().iter().all(|&v| v <= FIRE_MAX));
            assert!(bottom_row(&effect).iter().all(|&v| v == 36));
        }
    }

    #[test]
    fn test_heat_rises_and_cools() {
        let mut effect = fire(360, 240, 8);
        for _ in 0..80 {
            effect.spread();
        }
        let w = 60;
        // Row just above the source is hot, the top rows have cooled off.
        let near_source = &effect.intensity()[38 * w..39 * w];
        assert!(near_source.iter().any(|&v| v >= FIRE_MAX - 2));
        let top = &effect.intensity()[..w];
        assert!(top.iter().all(|&v| v < FIRE_MAX));
    }

    #[test]
    fn test_single_column_grid_clamps_drift() {
        // One column: every drift lands back in column 0.
        let mut effect = fire(6, 60, 3);
        assert_eq!(effect.grid(), Size::new(1, 10));
        for _ in 0..50 {
            effect.spread();
            assert_eq!(*effect.intensity().last().unwrap_or(&0), FIRE_MAX);
            assert!(effect.intensity().iter().all(|&v| v <= FIRE_MAX));
        }
    }

    #[test]
    fn test_drift_costs_one_step_and_straight_is_free() {
        assert_eq!(drift_cost(0), 1);
        assert_eq!(drift_cost(1), 0);
        assert_eq!(drift_cost(2), 1);

        // A 1x2 grid draws exactly one roll per spread, so a parallel rng
        // with the same seed replays every jitter.
        let mut effect = fire(6, 12, 77);
        assert_eq!(effect.grid(), Size::new(1, 2));
        let mut rolls = StdRng::seed_from_u64(77);
        let (mut straight, mut drifted) = (0, 0);
        for _ in 0..300 {
            effect.spread();
            let roll = rolls.random_range(0..3u8);
            let top = effect.intensity()[0];
            if roll == 1 {
                assert_eq!(top, FIRE_MAX);
                straight += 1;
            } else {
                assert_eq!(top, FIRE_MAX - 1);
                drifted += 1;
            }
        }
        assert!(straight > 0 && drifted > 0);
    }

    #[test]
    fn test_renders_palette_colors() {
        let mut effect = fire(60, 60, 4);
        let mut surface = RecordingSurface::new(60, 60);
        effect.advance(&mut surface);
        match surface.last_blit() {
            Some(DrawCall::Blit { source, dest, data }) => {
                assert_eq!(*source, Size::new(10, 10));
                assert_eq!(*dest, Size::new(60, 60));
                for px in data.chunks(4) {
                    assert_eq!(px[3], 255);
                    assert!(
                        FIRE_PALETTE
                            .iter()
                            .any(|c| [c.r, c.g, c.b] == [px[0], px[1], px[2]])
                    );
                }
                let last = &data[data.len() - 4..];
                assert_eq!(last, &[255, 255, 255, 255]);
            }
            other => panic!("expected blit, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_surface() {
        let mut effect = fire(0, 240, 1);
        let mut surface = RecordingSurface::new(0, 240);
        effect.advance(&mut surface);
        assert!(effect.intensity().is_empty());
        assert!(surface.calls.is_empty());
    }
}
