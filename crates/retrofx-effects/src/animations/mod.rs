//! Effect implementations, one module per effect.

pub mod fire;
pub mod fluid;
pub mod rain;
pub mod starfield;
