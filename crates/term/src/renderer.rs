//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed row by row against the previously drawn frame; only rows
//! that changed are re-emitted.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Key release events were requested from the terminal
    key_releases: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
            key_releases: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// Also asks for key release events when the terminal supports the
    /// keyboard enhancement protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.key_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.key_releases {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()
    }

    /// Whether `enter` enabled key release events.
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    /// Undo everything `enter` did. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_releases {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.key_releases = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        self.last = None;
        Ok(())
    }

    /// Force the next draw to repaint everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// The caller gets the old buffer back to render the next frame into, so
    /// nothing is cloned per frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_changed_rows_into(prev, fb, &mut self.buf)?;
            }
            _ => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .and_then(|_| self.stdout.flush())
            .context("write frame to terminal")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-screen repaint into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        encode_row(out, y, fb.row(y), &mut style)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only rows that differ between `prev` and `next`.
///
/// Both buffers must have the same dimensions. Returns the number of rows
/// emitted.
pub fn encode_changed_rows_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let mut style = None;
    let mut emitted = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        if prev.row(y) == row {
            continue;
        }
        encode_row(out, y, row, &mut style)?;
        emitted += 1;
    }
    if emitted > 0 {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(emitted)
}

fn encode_row(
    out: &mut Vec<u8>,
    y: u16,
    row: &[Cell],
    current: &mut Option<CellStyle>,
) -> Result<()> {
    out.queue(cursor::MoveTo(0, y))?;
    for cell in row {
        if *current != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
