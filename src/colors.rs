// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors come in three flavors: RGB, HSV and HSL.  A `Color` carries
//! exactly one of them at a time, and the `to_rgb`, `to_hsv` and
//! `to_hsl` functions move freely between them.  The density shader
//! needs HSL (it swaps out the lightness), while the pixel buffer
//! wants RGB, so every color eventually takes a trip through here.
//!
//! RGB channels are kept as floating point numbers on the 0-255
//! scale so that a trip through the other two representations and
//! back lands on the same numbers; they are only rounded to bytes
//! when they are packed into a pixel.

use std::fmt;

use num::clamp;
use rand::Rng;

use crate::error::IfsError;

/// Red, green and blue, each on the 0-255 scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel, 0-255.
    pub red: f64,
    /// Green channel, 0-255.
    pub green: f64,
    /// Blue channel, 0-255.
    pub blue: f64,
}

/// Hue in degrees (0-360), saturation and value in 0-1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Hue, 0-360.
    pub hue: f64,
    /// Saturation, 0-1.
    pub saturation: f64,
    /// Value, 0-1.
    pub value: f64,
}

/// Hue in degrees (0-360), saturation and lightness in 0-1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsl {
    /// Hue, 0-360.
    pub hue: f64,
    /// Saturation, 0-1.
    pub saturation: f64,
    /// Lightness, 0-1.
    pub lightness: f64,
}

/// A color in one of the three supported representations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Color {
    /// See `Rgb`.
    Rgb(Rgb),
    /// See `Hsv`.
    Hsv(Hsv),
    /// See `Hsl`.
    Hsl(Hsl),
}

impl Rgb {
    /// Builds a color from whole byte values.
    pub fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb {
            red: f64::from(red),
            green: f64::from(green),
            blue: f64::from(blue),
        }
    }

    /// The channels rounded to the nearest byte.
    pub fn to_bytes(self) -> [u8; 3] {
        let byte = |c: f64| clamp(c.round(), 0.0, 255.0) as u8;
        [byte(self.red), byte(self.green), byte(self.blue)]
    }
}

/// Pure red.
pub const RED: Color = Color::Rgb(Rgb {
    red: 255.0,
    green: 0.0,
    blue: 0.0,
});
/// Pure blue.
pub const BLUE: Color = Color::Rgb(Rgb {
    red: 0.0,
    green: 0.0,
    blue: 255.0,
});
/// A dark, leafy green.
pub const GREEN: Color = Color::Rgb(Rgb {
    red: 0.0,
    green: 100.0,
    blue: 0.0,
});
/// Bark brown.
pub const BROWN: Color = Color::Rgb(Rgb {
    red: 150.0,
    green: 100.0,
    blue: 40.0,
});
/// Black.
pub const BLACK: Color = Color::Rgb(Rgb {
    red: 0.0,
    green: 0.0,
    blue: 0.0,
});
/// White.
pub const WHITE: Color = Color::Rgb(Rgb {
    red: 255.0,
    green: 255.0,
    blue: 255.0,
});

// Hue in degrees from the normalized channels.  Achromatic colors get
// hue 0.
fn hue(r: f64, g: f64, b: f64, max: f64, chroma: f64) -> f64 {
    if chroma == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    }
}

fn rgb_to_hsv(c: Rgb) -> Hsv {
    let (r, g, b) = (c.red / 255.0, c.green / 255.0, c.blue / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;
    Hsv {
        hue: hue(r, g, b, max, chroma),
        saturation: if max == 0.0 { 0.0 } else { chroma / max },
        value: max,
    }
}

fn rgb_to_hsl(c: Rgb) -> Hsl {
    let (r, g, b) = (c.red / 255.0, c.green / 255.0, c.blue / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;
    let lightness = (max + min) / 2.0;
    let saturation = if lightness == 0.0 || lightness == 1.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * lightness - 1.0).abs())
    };
    Hsl {
        hue: hue(r, g, b, max, chroma),
        saturation,
        lightness,
    }
}

fn hsv_to_rgb(c: Hsv) -> Rgb {
    let channel = |n: f64| {
        let k = (n + c.hue / 60.0).rem_euclid(6.0);
        let ramp = k.min(4.0 - k).min(1.0).max(0.0);
        255.0 * (c.value - c.value * c.saturation * ramp)
    };
    Rgb {
        red: channel(5.0),
        green: channel(3.0),
        blue: channel(1.0),
    }
}

fn hsl_to_rgb(c: Hsl) -> Rgb {
    let a = c.saturation * c.lightness.min(1.0 - c.lightness);
    let channel = |n: f64| {
        let k = (n + c.hue / 30.0).rem_euclid(12.0);
        let ramp = (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        255.0 * (c.lightness - a * ramp)
    };
    Rgb {
        red: channel(0.0),
        green: channel(8.0),
        blue: channel(4.0),
    }
}

fn hsv_to_hsl(c: Hsv) -> Hsl {
    let lightness = c.value * (1.0 - c.saturation / 2.0);
    let saturation = if lightness == 0.0 || lightness == 1.0 {
        0.0
    } else {
        (c.value - lightness) / lightness.min(1.0 - lightness)
    };
    Hsl {
        hue: c.hue,
        saturation,
        lightness,
    }
}

fn hsl_to_hsv(c: Hsl) -> Hsv {
    let value = c.lightness + c.saturation * c.lightness.min(1.0 - c.lightness);
    let saturation = if value == 0.0 {
        0.0
    } else {
        2.0 * (1.0 - c.lightness / value)
    };
    Hsv {
        hue: c.hue,
        saturation,
        value,
    }
}

/// Any color as RGB.
pub fn to_rgb(color: Color) -> Rgb {
    match color {
        Color::Rgb(c) => c,
        Color::Hsv(c) => hsv_to_rgb(c),
        Color::Hsl(c) => hsl_to_rgb(c),
    }
}

/// Any color as HSV.
pub fn to_hsv(color: Color) -> Hsv {
    match color {
        Color::Rgb(c) => rgb_to_hsv(c),
        Color::Hsv(c) => c,
        Color::Hsl(c) => hsl_to_hsv(c),
    }
}

/// Any color as HSL.
pub fn to_hsl(color: Color) -> Hsl {
    match color {
        Color::Rgb(c) => rgb_to_hsl(c),
        Color::Hsv(c) => hsv_to_hsl(c),
        Color::Hsl(c) => c,
    }
}

impl Color {
    /// Shorthand for `to_rgb(self)`.
    pub fn rgb(self) -> Rgb {
        to_rgb(self)
    }

    /// Shorthand for `to_hsl(self)`.
    pub fn hsl(self) -> Hsl {
        to_hsl(self)
    }

    /// Shorthand for `to_hsv(self)`.
    pub fn hsv(self) -> Hsv {
        to_hsv(self)
    }

    /// The same hue and saturation at a different lightness.
    pub fn with_lightness(self, lightness: f64) -> Color {
        Color::Hsl(Hsl {
            lightness,
            ..to_hsl(self)
        })
    }
}

/// Renders the color as `#rrggbb`, each byte zero-padded.
pub fn to_hex_string(color: Color) -> String {
    let [r, g, b] = to_rgb(color).to_bytes();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Reads `rrggbb` or `#rrggbb`, in either case.  Anything else is
/// `None`.
pub fn hex_to_color(s: &str) -> Option<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(Rgb::new(byte(0)?, byte(2)?, byte(4)?)))
}

/// Any color with whole byte channels; each channel is drawn from
/// 0-254, the same range as the interactive editor's "random" button.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::Rgb(Rgb::new(
        rng.gen_range(0, 255),
        rng.gen_range(0, 255),
        rng.gen_range(0, 255),
    ))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_hex_string(*self))
    }
}

impl std::str::FromStr for Color {
    type Err = IfsError;

    fn from_str(s: &str) -> Result<Color, IfsError> {
        hex_to_color(s).ok_or_else(|| IfsError::InvalidColor(s.to_string()))
    }
}
