//! Effect identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The procedural effects that can be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Falling glyph rain.
    #[default]
    Matrix,
    /// Sinusoidal fluid color field.
    Plasma,
    /// Bottom-up propagating fire.
    Fire,
    /// Perspective starfield.
    Starfield,
}

impl EffectKind {
    /// All effects in registration order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Matrix,
        EffectKind::Plasma,
        EffectKind::Fire,
        EffectKind::Starfield,
    ];

    /// Name used by the host UI and in configuration.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Matrix => "matrix",
            EffectKind::Plasma => "plasma",
            EffectKind::Fire => "fire",
            EffectKind::Starfield => "starfield",
        }
    }

    /// Human-readable label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Matrix => "Matrix",
            EffectKind::Plasma => "Plasma",
            EffectKind::Fire => "Fire",
            EffectKind::Starfield => "Starfield",
        }
    }

    /// Cycle to the next effect.
    pub fn next(self) -> Self {
        match self {
            EffectKind::Matrix => EffectKind::Plasma,
            EffectKind::Plasma => EffectKind::Fire,
            EffectKind::Fire => EffectKind::Starfield,
            EffectKind::Starfield => EffectKind::Matrix,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not a known effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEffect(pub String);

impl fmt::Display for UnknownEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown effect `{}`", self.0)
    }
}

impl std::error::Error for UnknownEffect {}

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}
