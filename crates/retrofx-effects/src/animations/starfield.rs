//! Perspective starfield animation (stateful).

use rand::{Rng, SeedableRng, rngs::StdRng};
use retrofx_core::{AnimationSpeed, EffectKind, Point, Size, Surface};

use crate::color::{BACKDROP, STAR_COLOR};
use crate::effect::{Effect, EffectSettings};

/// Opacity of the per-frame over-paint that leaves motion blur.
const FADE_ALPHA: f32 = 0.2;
/// Depth travelled per frame.
const DEPTH_STEP: f32 = 8.0;
/// Stars at or below this depth have passed the viewer.
pub const NEAR_PLANE: f32 = 1.0;
/// Focal length of the perspective projection.
const PROJECTION: f32 = 200.0;
/// Line width of a star at the near plane.
const MAX_LINE_WIDTH: f32 = 3.0;

/// A single star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal offset from the surface center.
    pub x: f32,
    /// Vertical offset from the surface center.
    pub y: f32,
    /// Current depth.
    pub z: f32,
    /// Depth on the previous frame.
    pub pz: f32,
}

/// Stars streaking toward the viewer.
#[derive(Debug)]
pub struct StarfieldEffect {
    stars: Vec<Star>,
    star_count: usize,
    size: Size,
    center: Point,
    speed: AnimationSpeed,
    rng: StdRng,
}

impl StarfieldEffect {
    pub fn new(size: Size, settings: &EffectSettings, seed: u64) -> Self {
        let mut effect = Self {
            stars: Vec::new(),
            star_count: settings.star_count,
            size,
            center: Point::default(),
            speed: settings.speed,
            rng: StdRng::seed_from_u64(seed),
        };
        effect.resize(size);
        effect
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Depth a star is reset to; the surface width.
    pub fn max_depth(&self) -> f32 {
        self.size.width as f32
    }

    fn random_offset(&mut self) -> (f32, f32) {
        let x = self.rng.random_range(0.0..self.size.width as f32) - self.center.x;
        let y = self.rng.random_range(0.0..self.size.height as f32) - self.center.y;
        (x, y)
    }

    fn project(&self, x: f32, y: f32, z: f32) -> Point {
        Point::new(
            x / z * PROJECTION + self.center.x,
            y / z * PROJECTION + self.center.y,
        )
    }
}

impl Effect for StarfieldEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Starfield
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.stars.clear();
        if size.is_empty() {
            return;
        }
        self.center = Point::new(size.width as f32 / 2.0, size.height as f32 / 2.0);
        let max_depth = self.max_depth();
        for _ in 0..self.star_count {
            let (x, y) = self.random_offset();
            // (0, max_depth] keeps the first projection finite
            let z = max_depth - self.rng.random_range(0.0..max_depth);
            self.stars.push(Star { x, y, z, pz: z });
        }
    }

    fn advance(&mut self, surface: &mut dyn Surface) {
        if self.size.is_empty() || self.stars.is_empty() {
            return;
        }

        surface.fill(BACKDROP.with_alpha(FADE_ALPHA));

        let max_depth = self.max_depth();
        let step = DEPTH_STEP * self.speed.factor();

        for i in 0..self.stars.len() {
            let mut star = self.stars[i];
            star.pz = star.z;
            star.z -= step;

            if star.z <= NEAR_PLANE {
                let (x, y) = self.random_offset();
                star = Star {
                    x,
                    y,
                    z: max_depth,
                    pz: max_depth,
                };
            }
            self.stars[i] = star;

            let from = self.project(star.x, star.y, star.pz);
            let to = self.project(star.x, star.y, star.z);
            let closeness = (1.0 - star.z / max_depth).clamp(0.0, 1.0);

            surface.draw_line(
                from,
                to,
                STAR_COLOR.with_alpha(closeness),
                closeness * MAX_LINE_WIDTH,
            );
        }
    }

    fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingSurface};

    fn starfield(width: u32, height: u32, seed: u64) -> StarfieldEffect {
        StarfieldEffect::new(Size::new(width, height), &EffectSettings::default(), seed)
    }

    #[test]
    fn test_initial_stars() {
        let effect = starfield(800, 600, 1);
        assert_eq!(effect.stars().len(), 200);
        for star in effect.stars() {
            assert!(star.z > 0.0 && star.z <= 800.0);
            assert!(star.x >= -400.0 && star.x < 400.0);
            assert!(star.y >= -300.0 && star.y < 300.0);
        }
    }

    #[test]
    fn test_depth_decreases_until_reset() {
        let mut effect = starfield(800, 600, 99);
        let mut surface = RecordingSurface::new(800, 600);
        let mut resets = 0;
        for _ in 0..300 {
            let before: Vec<Star> = effect.stars().to_vec();
            effect.advance(&mut surface);
            surface.calls.clear();
            for (prev, star) in before.iter().zip(effect.stars()) {
                if prev.z - DEPTH_STEP <= NEAR_PLANE {
                    assert_eq!(star.z, 800.0);
                    assert_eq!(star.pz, 800.0);
                    resets += 1;
                } else {
                    assert_eq!(star.z, prev.z - DEPTH_STEP);
                    assert_eq!(star.pz, prev.z);
                    assert!(star.z > NEAR_PLANE);
                }
            }
        }
        assert!(resets > 0);
    }

    #[test]
    fn test_closer_stars_draw_brighter_and_thicker() {
        let mut effect = starfield(800, 600, 5);
        let mut surface = RecordingSurface::new(800, 600);
        effect.advance(&mut surface);

        assert!(matches!(
            surface.calls.first(),
            Some(DrawCall::FillRect { color, .. }) if (color.a - FADE_ALPHA).abs() < f32::EPSILON
        ));

        let lines: Vec<(f32, f32)> = surface
            .lines()
            .filter_map(|c| match c {
                DrawCall::Line { color, width, .. } => Some((color.a, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 200);

        for ((alpha, width), star) in lines.iter().zip(effect.stars()) {
            let expected = 1.0 - star.z / 800.0;
            assert!((alpha - expected).abs() < 1e-5);
            assert!((width - expected * MAX_LINE_WIDTH).abs() < 1e-4);
        }
    }

    #[test]
    fn test_resize_recenters() {
        let mut effect = starfield(800, 600, 3);
        effect.resize(Size::new(200, 100));
        assert_eq!(effect.stars().len(), 200);
        assert_eq!(effect.max_depth(), 200.0);
        for star in effect.stars() {
            assert!(star.z <= 200.0);
            assert!(star.x >= -100.0 && star.x < 100.0);
        }
    }

    #[test]
    fn test_empty_surface() {
        let mut effect = starfield(0, 0, 1);
        let mut surface = RecordingSurface::new(0, 0);
        effect.advance(&mut surface);
        assert!(effect.stars().is_empty());
        assert!(surface.calls.is_empty());
    }
}
