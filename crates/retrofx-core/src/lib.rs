//! Core types shared by the retrofx crates.
//!
//! Holds the drawing-surface capability that effects render against, the
//! pixel buffer used for coarse-grid effects, and the small enums (effect
//! kind, animation speed) that the host and the effects agree on.

mod color;
mod geometry;
mod kind;
mod pixels;
mod speed;
mod surface;

pub use color::{Rgb, Rgba};
pub use geometry::{Point, Size};
pub use kind::{EffectKind, UnknownEffect};
pub use pixels::PixelBuffer;
pub use speed::AnimationSpeed;
pub use surface::Surface;
