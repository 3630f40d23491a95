//! Conversions between raster colours and terminal colours.

use nocturne_core::Rgb;
use ratatui::style::Color;

use crate::present::ColorDepth;

/// Levels of each axis of the xterm 6x6x6 colour cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The sixteen system colours, as xterm renders them.
const SYSTEM: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Encode a raster colour for the given depth.
pub fn to_terminal(rgb: Rgb, depth: ColorDepth) -> Color {
    let (r, g, b) = rgb.to_u8();
    match depth {
        ColorDepth::TrueColor => Color::Rgb(r, g, b),
        ColorDepth::Ansi256 => Color::Indexed(rgb_to_ansi256(r, g, b)),
    }
}

/// Decode a terminal colour written by [`to_terminal`].
///
/// Named colours and `Reset` have no fixed value and return `None`.
pub fn from_terminal(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb::from_u8(r, g, b)),
        Color::Indexed(index) => {
            let (r, g, b) = ansi256_to_rgb(index);
            Some(Rgb::from_u8(r, g, b))
        }
        _ => None,
    }
}

/// Nearest xterm-256 index, choosing between the cube and the grey ramp.
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (
        CUBE_LEVELS[ri as usize],
        CUBE_LEVELS[gi as usize],
        CUBE_LEVELS[bi as usize],
    );
    let cube_code = 16 + 36 * ri + 6 * gi + bi;

    let mean = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
    let grey_step = if mean < 8 {
        0
    } else {
        ((mean - 8) / 10).min(23) as u8
    };
    let grey_level = 8 + 10 * grey_step;
    let grey_code = 232 + grey_step;

    let target = (r, g, b);
    if distance(target, (grey_level, grey_level, grey_level)) < distance(target, cube) {
        grey_code
    } else {
        cube_code
    }
}

/// The colour an xterm-256 index is displayed as.
pub fn ansi256_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => SYSTEM[index as usize],
        16..=231 => {
            let i = index - 16;
            (
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let level = 8 + 10 * (index - 232);
            (level, level, level)
        }
    }
}

fn cube_index(channel: u8) -> u8 {
    match channel {
        0..48 => 0,
        48..115 => 1,
        _ => (channel - 35) / 40,
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = i32::from(x) - i32::from(y);
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
