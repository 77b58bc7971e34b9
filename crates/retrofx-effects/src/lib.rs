//! Procedural full-screen effects for retrofx.
//!
//! This crate provides the four animated effects (glyph rain, fluid color
//! field, fire, starfield) and the [`EffectManager`] that keeps exactly one
//! of them running against a host-provided [`retrofx_core::Surface`].

mod animations;
mod chars;
mod color;
mod effect;
mod manager;
#[cfg(test)]
mod testing;

pub use animations::fire::FireEffect;
pub use animations::fluid::{FluidFieldEffect, field_color, field_value, render_field};
pub use animations::rain::{RainColumn, RainEffect};
pub use animations::starfield::{NEAR_PLANE, Star, StarfieldEffect};
pub use chars::RAIN_GLYPHS;
pub use color::{BACKDROP, FIRE_MAX, FIRE_PALETTE};
pub use effect::{Effect, EffectConstructor, EffectSettings};
pub use manager::{EffectManager, ManagerState};
