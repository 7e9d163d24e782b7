//! 14-segment display model.
//!
//! The instrument scatters the 14 segment bits of a display cell across a
//! 16-bit bus word in wiring order. [`remap`] collects them into a canonical
//! [`SegmentWord`] (bit 0 = segment A through bit 13 = segment N), and
//! [`render`] draws a segment word as a text glyph so a human can recognise
//! the character.

use crate::{DeviceCode, SegmentWord};

/// Bus bit carrying each canonical segment, indexed by segment position
/// (A = 0 through N = 13). Bus bits 0x0100 and 0x0200 drive no segment.
const SEGMENT_BUS_BITS: [u16; 14] = [
    0x0080, // A
    0x0008, // B
    0x0400, // C
    0x4000, // D
    0x8000, // E
    0x0004, // F
    0x0002, // G
    0x0001, // H
    0x0040, // I
    0x2000, // J
    0x0010, // K
    0x0020, // L
    0x0800, // M
    0x1000, // N
];

/// Glyph template, row-major 7x7. Each cell is 0 (spacer, always blank) or a
/// 1-based segment index; the cell is filled when that segment is lit. The
/// layout follows the physical strokes of the display cell.
const GLYPH_TEMPLATE: [u8; 49] = [
    1, 1, 1, 1, 1, 1, 1, // AAAAAAA
    6, 12, 0, 9, 0, 11, 2, // FL I KB
    6, 0, 12, 9, 11, 0, 2, // F LIK B
    5, 7, 7, 10, 8, 8, 3, // EGGJHHC
    5, 0, 14, 10, 13, 0, 3, // E NJM C
    5, 14, 0, 10, 0, 13, 3, // EN J MC
    4, 4, 4, 4, 4, 4, 4, // DDDDDDD
];

/// Cells per glyph row.
const GLYPH_WIDTH: usize = 7;

/// Collect the segment bits of a raw bus code into canonical order.
///
/// Total over all 16-bit inputs; bus bits with no segment assignment are
/// dropped.
pub fn remap(code: DeviceCode) -> SegmentWord {
    let mut segments = 0;
    for (position, &bus_bit) in SEGMENT_BUS_BITS.iter().enumerate() {
        if code & bus_bit != 0 {
            segments |= 1 << position;
        }
    }
    segments
}

/// Render a segment word as a 7x7 text glyph, one row per line.
///
/// Lit cells print `#`, everything else a space.
pub fn render(segments: SegmentWord) -> String {
    let mut glyph = String::with_capacity(GLYPH_TEMPLATE.len() + GLYPH_WIDTH);
    for (index, &cell) in GLYPH_TEMPLATE.iter().enumerate() {
        if cell != 0 && (segments >> (cell - 1)) & 1 != 0 {
            glyph.push('#');
        } else {
            glyph.push(' ');
        }
        if (index + 1) % GLYPH_WIDTH == 0 {
            glyph.push('\n');
        }
    }
    glyph
}
