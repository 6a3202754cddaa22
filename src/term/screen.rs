//! Terminal screen: raw-mode setup and framebuffer flushing.
//!
//! Draws are diffed against the previous frame and emitted as per-row
//! runs of changed cells, with style changes coalesced across the run.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TermScreen {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
        }
    }

    /// Switch to the alternate screen and raw mode.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a partial `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Drop the remembered frame so the next present redraws everything.
    /// Needed after a terminal resize.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Flush a frame to the terminal, keeping it for the next diff.
    ///
    /// The caller passes its frame in by value and draws the next one into
    /// a fresh buffer; the screen owns the history.
    pub fn present(&mut self, frame: FrameBuffer) -> Result<()> {
        let full = match &self.prev {
            Some(prev) => prev.width() != frame.width() || prev.height() != frame.height(),
            None => true,
        };

        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<CellStyle> = None;
        for y in 0..frame.height() {
            let mut x = 0;
            while x < frame.width() {
                // Skip cells the previous frame already shows.
                if !full && self.cell_unchanged(&frame, x, y) {
                    x += 1;
                    continue;
                }

                self.stdout.queue(cursor::MoveTo(x, y))?;
                while x < frame.width() && (full || !self.cell_unchanged(&frame, x, y)) {
                    let cell = frame.get(x, y).unwrap_or_default();
                    if style != Some(cell.style) {
                        self.apply_style(cell.style)?;
                        style = Some(cell.style);
                    }
                    self.stdout.queue(Print(cell.ch))?;
                    x += 1;
                }
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.prev = Some(frame);
        Ok(())
    }

    fn cell_unchanged(&self, frame: &FrameBuffer, x: u16, y: u16) -> bool {
        match &self.prev {
            Some(prev) => prev.get(x, y) == frame.get(x, y),
            None => false,
        }
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(to_crossterm(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(to_crossterm(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn to_crossterm(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
