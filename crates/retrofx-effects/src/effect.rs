//! The capability set shared by every effect.

use std::fmt;

use retrofx_core::{AnimationSpeed, EffectKind, Size, Surface};

/// A procedural animation bound to a drawing surface.
///
/// The host calls [`Effect::advance`] once per display frame. Effects keep no
/// reference to the surface between frames; the surface is lent for the
/// duration of each call.
pub trait Effect: fmt::Debug {
    /// Which effect this is.
    fn kind(&self) -> EffectKind;

    /// Rebuild simulation state for a surface of `size`.
    ///
    /// Must be called before the next `advance` whenever the surface changes
    /// size, so no grid is indexed past its new bounds.
    fn resize(&mut self, size: Size);

    /// Simulate one frame and draw it.
    fn advance(&mut self, surface: &mut dyn Surface);

    /// Change the per-frame step multiplier.
    fn set_speed(&mut self, speed: AnimationSpeed);
}

/// Tunables handed to every effect at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSettings {
    /// Rain column width and glyph line height, in pixels.
    pub glyph_size: u32,
    /// Number of simulated stars.
    pub star_count: usize,
    /// Per-frame step multiplier.
    pub speed: AnimationSpeed,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            glyph_size: 14,
            star_count: 200,
            speed: AnimationSpeed::Medium,
        }
    }
}

/// Builds an effect for a surface of the given size from a seed.
pub type EffectConstructor = fn(Size, &EffectSettings, u64) -> Box<dyn Effect>;
