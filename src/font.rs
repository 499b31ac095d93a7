// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A 5x7 bitmap font with just enough glyphs to print coordinates:
//! digits, sign, decimal point, brackets and the axis names.

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: usize = 5;
/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: usize = 7;

const DIGITS: [[u8; GLYPH_HEIGHT]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
    [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// The rows of the glyph for `c`, top first, most significant bit on
/// the left.  Characters without a glyph (space among them) are blank.
pub fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    if let Some(d) = c.to_digit(10) {
        return Some(DIGITS[d as usize]);
    }
    match c {
        '-' => Some([0, 0, 0, 0b11111, 0, 0, 0]),
        '.' => Some([0, 0, 0, 0, 0, 0b01100, 0b01100]),
        ',' => Some([0, 0, 0, 0, 0b01100, 0b00100, 0b01000]),
        ':' => Some([0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0]),
        '[' => Some([0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110]),
        ']' => Some([0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110]),
        'x' => Some([0, 0, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001]),
        'y' => Some([0, 0, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110]),
        _ => None,
    }
}

/// Draws one character with its top-left corner at `(x, y)`, each font
/// pixel `scale` canvas pixels square.  Anything off the buffer is
/// clipped.
pub fn draw_char(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    (x, y): (usize, usize),
    scale: usize,
    c: char,
    color: u32,
) {
    let rows = match glyph(c) {
        Some(rows) => rows,
        None => return,
    };
    for (row, &bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x + col * scale + dx;
                    let py = y + row * scale + dy;
                    if px < width && py < height {
                        buffer[py * width + px] = color;
                    }
                }
            }
        }
    }
}

/// Draws a line of text starting at `(x, y)`, one blank font pixel
/// between glyphs.
pub fn draw_text(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    (x, y): (usize, usize),
    scale: usize,
    text: &str,
    color: u32,
) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (i, c) in text.chars().enumerate() {
        draw_char(buffer, width, height, (x + i * advance, y), scale, c, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_coordinate_character_has_a_glyph() {
        for c in "0123456789-.,:[]xy".chars() {
            assert!(glyph(c).is_some(), "no glyph for {:?}", c);
        }
        assert!(glyph(' ').is_none());
    }

    #[test]
    fn draws_a_one() {
        let mut buffer = vec![0u32; 6 * 7];
        draw_char(&mut buffer, 6, 7, (0, 0), 1, '1', 9);
        // Top row of '1' is 0b00100.
        assert_eq!(&buffer[0..5], &[0, 0, 9, 0, 0]);
        // Bottom row is 0b01110.
        assert_eq!(&buffer[36..41], &[0, 9, 9, 9, 0]);
    }

    #[test]
    fn text_is_clipped_and_scaled() {
        let mut buffer = vec![0u32; 10 * 10];
        // Only the top-left 3x3 corner of the first '8' fits.
        draw_text(&mut buffer, 10, 10, (7, 7), 1, "88", 1);
        assert_eq!(buffer.iter().filter(|&&p| p == 1).count(), 4);
        let mut big = vec![0u32; 20 * 20];
        draw_text(&mut big, 20, 20, (0, 0), 2, "-", 1);
        assert_eq!(big.iter().filter(|&&p| p == 1).count(), 5 * 4);
    }
}
