//! Fixed colors and palettes.

use retrofx_core::Rgb;

/// Page background the translucent fades converge toward.
pub const BACKDROP: Rgb = Rgb::new(10, 14, 20);

/// Leading glyph of a rain streak.
pub const RAIN_HEAD: Rgb = Rgb::new(180, 255, 180);

/// Halo around the leading rain glyph.
pub const RAIN_GLOW: Rgb = Rgb::new(110, 255, 200);

/// Green channel of a full-strength trailing glyph.
pub const RAIN_TRAIL_GREEN: f32 = 180.0;

/// Star streak color; opacity varies with depth.
pub const STAR_COLOR: Rgb = Rgb::new(180, 220, 255);

/// Fire palette from coolest (black) to hottest (white).
pub const FIRE_PALETTE: [Rgb; 37] = [
    Rgb::new(0, 0, 0),
    Rgb::new(31, 7, 7),
    Rgb::new(47, 15, 7),
    Rgb::new(71, 15, 7),
    Rgb::new(87, 23, 7),
    Rgb::new(103, 31, 7),
    Rgb::new(119, 31, 7),
    Rgb::new(143, 39, 7),
    Rgb::new(159, 47, 7),
    Rgb::new(175, 63, 7),
    Rgb::new(191, 71, 7),
    Rgb::new(199, 71, 7),
    Rgb::new(223, 79, 7),
    Rgb::new(223, 87, 7),
    Rgb::new(223, 87, 7),
    Rgb::new(215, 95, 7),
    Rgb::new(215, 95, 7),
    Rgb::new(215, 103, 15),
    Rgb::new(207, 111, 15),
    Rgb::new(207, 119, 15),
    Rgb::new(207, 127, 15),
    Rgb::new(207, 135, 23),
    Rgb::new(199, 135, 23),
    Rgb::new(199, 143, 23),
    Rgb::new(199, 151, 31),
    Rgb::new(191, 159, 31),
    Rgb::new(191, 159, 31),
    Rgb::new(191, 167, 39),
    Rgb::new(191, 167, 39),
    Rgb::new(191, 175, 47),
    Rgb::new(183, 175, 47),
    Rgb::new(183, 183, 47),
    Rgb::new(183, 183, 55),
    Rgb::new(207, 207, 111),
    Rgb::new(223, 223, 159),
    Rgb::new(239, 239, 199),
    Rgb::new(255, 255, 255),
];

/// Hottest palette index; the fire's heat source.
pub const FIRE_MAX: u8 = (FIRE_PALETTE.len() - 1) as u8;

/// Color of a trailing rain glyph `index` positions behind the head.
///
/// Brightness decays linearly along the streak; blue is a quarter of green.
pub fn rain_trail_color(index: usize, streak_len: usize) -> Rgb {
    let alpha = 1.0 - index as f32 / streak_len.max(1) as f32;
    let green = (RAIN_TRAIL_GREEN * alpha).max(0.0) as u8;
    Rgb::new(0, green, green / 4)
}

/// Look up a fire intensity, treating anything out of range as cold.
pub fn fire_color(intensity: u8) -> Rgb {
    FIRE_PALETTE
        .get(intensity as usize)
        .copied()
        .unwrap_or(Rgb::BLACK)
}
