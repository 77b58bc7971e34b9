//! Glyph rain animation (stateful).

use rand::{Rng, SeedableRng, rngs::StdRng};
use retrofx_core::{AnimationSpeed, EffectKind, Size, Surface};

use crate::chars::RAIN_GLYPHS;
use crate::color::{BACKDROP, RAIN_GLOW, RAIN_HEAD, rain_trail_color};
use crate::effect::{Effect, EffectSettings};

/// Opacity of the per-frame over-paint that fades old glyphs.
const FADE_ALPHA: f32 = 0.05;
/// Chance per column per frame that one glyph is swapped.
const GLITCH_CHANCE: f64 = 0.02;
/// Fall speed range, in glyph rows per frame.
const MIN_SPEED: f32 = 0.5;
const MAX_SPEED: f32 = 2.0;
/// Streak length range, in glyphs.
const MIN_STREAK: usize = 10;
const MAX_STREAK: usize = 30;
/// How far above the top a column may start, in rows.
const INITIAL_OFFSET: f32 = 100.0;
const RESPAWN_OFFSET: f32 = 20.0;

/// State for a single rain column.
#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Row of the leading glyph; negative while still above the top edge.
    pub y: f32,
    /// Rows advanced per frame.
    pub speed: f32,
    /// Streak glyphs, head first.
    pub glyphs: Vec<char>,
}

impl RainColumn {
    fn spawn(rng: &mut StdRng, max_offset: f32) -> Self {
        Self {
            y: -rng.random_range(0.0..max_offset),
            speed: rng.random_range(MIN_SPEED..MAX_SPEED),
            glyphs: random_streak(rng),
        }
    }
}

fn random_glyph(rng: &mut StdRng) -> char {
    RAIN_GLYPHS[rng.random_range(0..RAIN_GLYPHS.len())]
}

fn random_streak(rng: &mut StdRng) -> Vec<char> {
    let len = rng.random_range(MIN_STREAK..MAX_STREAK);
    (0..len).map(|_| random_glyph(rng)).collect()
}

/// Columns of falling glyphs with fading trails.
#[derive(Debug)]
pub struct RainEffect {
    columns: Vec<RainColumn>,
    size: Size,
    glyph_size: u32,
    speed: AnimationSpeed,
    rng: StdRng,
}

impl RainEffect {
    pub fn new(size: Size, settings: &EffectSettings, seed: u64) -> Self {
        let mut effect = Self {
            columns: Vec::new(),
            size,
            glyph_size: settings.glyph_size.max(1),
            speed: settings.speed,
            rng: StdRng::seed_from_u64(seed),
        };
        effect.resize(size);
        effect
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    pub fn glyph_size(&self) -> u32 {
        self.glyph_size
    }
}

impl Effect for RainEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Matrix
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        let count = if size.is_empty() {
            0
        } else {
            (size.width / self.glyph_size) as usize
        };
        let rng = &mut self.rng;
        self.columns = (0..count)
            .map(|_| RainColumn::spawn(rng, INITIAL_OFFSET))
            .collect();
    }

    fn advance(&mut self, surface: &mut dyn Surface) {
        if self.size.is_empty() || self.columns.is_empty() {
            return;
        }

        surface.fill(BACKDROP.with_alpha(FADE_ALPHA));

        let cell = self.glyph_size as f32;
        let height = self.size.height as f32;
        let step = self.speed.factor();

        for (i, col) in self.columns.iter_mut().enumerate() {
            let x = i as f32 * cell;
            let len = col.glyphs.len();

            for (j, &ch) in col.glyphs.iter().enumerate() {
                let y = (col.y - j as f32) * cell;
                if y < 0.0 || y > height {
                    continue;
                }
                if j == 0 {
                    surface.draw_glyph(ch, x, y, RAIN_HEAD, Some(RAIN_GLOW));
                } else {
                    surface.draw_glyph(ch, x, y, rain_trail_color(j, len), None);
                }
            }

            col.y += col.speed * step;

            if self.rng.random_bool(GLITCH_CHANCE) {
                let idx = self.rng.random_range(0..len);
                col.glyphs[idx] = random_glyph(&mut self.rng);
            }

            // Tail has left the bottom edge
            if (col.y - len as f32) * cell > height {
                *col = RainColumn::spawn(&mut self.rng, RESPAWN_OFFSET);
            }
        }
    }

    fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }
}
