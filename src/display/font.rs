//! Glyph bitmaps for scrolling text.
//!
//! Characters are drawn with the embedded-graphics 5x8 ASCII font into a
//! tiny canvas and read back as columns, which is the unit the scroller
//! shifts by.

use super::MATRIX_SIZE;
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_5X8},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use std::convert::Infallible;

const GLYPH_WIDTH: usize = 5;

/// One lit/unlit column, top row first.
pub type Column = [bool; MATRIX_SIZE];

pub const BLANK_COLUMN: Column = [false; MATRIX_SIZE];

#[derive(Default)]
struct GlyphCanvas {
    pixels: [[bool; GLYPH_WIDTH]; MATRIX_SIZE],
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        Size::new(GLYPH_WIDTH as u32, MATRIX_SIZE as u32)
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < GLYPH_WIDTH && y < MATRIX_SIZE {
                    self.pixels[y][x] = color.is_on();
                }
            }
        }
        Ok(())
    }
}

/// Columns of `ch`, with blank columns trimmed from both sides.
///
/// A glyph with no lit pixels (a space) keeps its full width so words stay
/// apart. Characters outside the font render as `?`.
pub fn glyph_columns(ch: char) -> Vec<Column> {
    let mut canvas = GlyphCanvas::default();
    let mut utf8 = [0u8; 4];
    let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    let Ok(_) = Text::with_baseline(ch.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
        .draw(&mut canvas);

    let columns: Vec<Column> = (0..GLYPH_WIDTH)
        .map(|x| {
            let mut column = BLANK_COLUMN;
            for (y, lit) in column.iter_mut().enumerate() {
                *lit = canvas.pixels[y][x];
            }
            column
        })
        .collect();

    let is_lit = |column: &Column| column.iter().any(|&lit| lit);
    match (
        columns.iter().position(is_lit),
        columns.iter().rposition(is_lit),
    ) {
        (Some(first), Some(last)) => columns[first..=last].to_vec(),
        _ => columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_keeps_full_width() {
        let columns = glyph_columns(' ');
        assert_eq!(columns.len(), GLYPH_WIDTH);
        assert!(columns.iter().all(|c| *c == BLANK_COLUMN));
    }

    #[test]
    fn test_glyphs_are_trimmed() {
        let columns = glyph_columns('!');
        assert!(!columns.is_empty());
        assert!(columns.len() < GLYPH_WIDTH);
        assert_ne!(columns[0], BLANK_COLUMN);
        assert_ne!(columns[columns.len() - 1], BLANK_COLUMN);
    }

    #[test]
    fn test_letters_have_pixels() {
        for ch in ['A', 'g', '8', '?'] {
            let columns = glyph_columns(ch);
            assert!(columns.iter().flatten().any(|&lit| lit), "{ch} is blank");
        }
    }
}
