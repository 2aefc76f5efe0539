//! LED matrix drawn in the terminal, for running without a Sense HAT.

use super::{Frame, FrameSink};
use crate::error::DisplayError;
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, Write};

const PIXEL: &str = "██";

/// Alternate screen + raw mode for the lifetime of the value.
pub struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
    }
}

pub struct TerminalSink<W: Write> {
    out: W,
    last: Option<Frame>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        for row in &frame.pixels {
            for pixel in row {
                self.out.queue(SetForegroundColor(Color::Rgb {
                    r: pixel.r,
                    g: pixel.g,
                    b: pixel.b,
                }))?;
                self.out.queue(Print(PIXEL))?;
            }
            self.out.queue(ResetColor)?;
            self.out.queue(cursor::MoveToNextLine(1))?;
        }
        self.out.queue(Print("space: shake   q: quit"))?;
        self.out.flush()
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        // the loop clears on every idle poll; only repaint on change
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        self.draw(frame)?;
        self.last = Some(*frame);
        Ok(())
    }
}
