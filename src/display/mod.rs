//! The 8x8 LED matrix.
//!
//! A [`FrameSink`] puts one whole frame on the matrix; [`LedMatrix`] builds
//! scrolling text and clears on top of any sink.

use crate::error::DisplayError;
use crate::palette::{BLACK, Rgb, TextColors};
use std::thread;
use std::time::Duration;

pub mod font;
pub mod framebuffer;
pub mod terminal;

use font::{BLANK_COLUMN, Column, glyph_columns};

pub const MATRIX_SIZE: usize = 8;

/// One full image, row-major, top-left first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub pixels: [[Rgb; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Frame {
    pub fn filled(color: Rgb) -> Self {
        Self {
            pixels: [[color; MATRIX_SIZE]; MATRIX_SIZE],
        }
    }

    /// RGB565, little-endian, in framebuffer order.
    pub fn to_rgb565_bytes(&self) -> [u8; MATRIX_SIZE * MATRIX_SIZE * 2] {
        let mut bytes = [0u8; MATRIX_SIZE * MATRIX_SIZE * 2];
        for (i, pixel) in self.pixels.iter().flatten().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&pixel.to_rgb565().to_le_bytes());
        }
        bytes
    }
}

/// Something that can show a frame: the real framebuffer or a terminal.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

/// Text output as seen by the responder.
pub trait MessageDisplay {
    /// Scroll `text` right to left, pausing `scroll_speed` seconds per column.
    /// Returns once the text has scrolled off.
    fn show_message(
        &mut self,
        text: &str,
        scroll_speed: f64,
        colors: TextColors,
    ) -> Result<(), DisplayError>;

    /// Turn every pixel off.
    fn clear(&mut self) -> Result<(), DisplayError>;
}

pub struct LedMatrix<S> {
    sink: S,
}

impl<S: FrameSink> LedMatrix<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: FrameSink> MessageDisplay for LedMatrix<S> {
    fn show_message(
        &mut self,
        text: &str,
        scroll_speed: f64,
        colors: TextColors,
    ) -> Result<(), DisplayError> {
        let delay = Duration::try_from_secs_f64(scroll_speed)
            .map_err(|_| DisplayError::InvalidScrollSpeed(scroll_speed))?;

        for frame in scroll_frames(text, colors) {
            self.sink.write_frame(&frame)?;
            thread::sleep(delay);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.sink.write_frame(&Frame::filled(BLACK))
    }
}

/// Every column of `text` padded with a blank screen on either side, one
/// blank column after each character.
fn message_columns(text: &str) -> Vec<Column> {
    let mut columns = vec![BLANK_COLUMN; MATRIX_SIZE];
    for ch in text.chars() {
        columns.extend(glyph_columns(ch));
        columns.push(BLANK_COLUMN);
    }
    columns.extend([BLANK_COLUMN; MATRIX_SIZE]);
    columns
}

/// One frame per column offset, from blank to blank.
pub fn scroll_frames(text: &str, colors: TextColors) -> impl Iterator<Item = Frame> {
    let columns = message_columns(text);
    let count = columns.len() - MATRIX_SIZE + 1;

    (0..count).map(move |offset| {
        let mut frame = Frame::filled(colors.background);
        for (x, column) in columns[offset..offset + MATRIX_SIZE].iter().enumerate() {
            for (y, &lit) in column.iter().enumerate() {
                if lit {
                    frame.pixels[y][x] = colors.foreground;
                }
            }
        }
        frame
    })
}

/// Keeps every frame it is given.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
}

#[cfg(test)]
impl FrameSink for RecordingSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.frames.push(*frame);
        Ok(())
    }
}
