//! TerminalRenderer: presents framebuffers on a real terminal.
//!
//! Each frame is diffed against the previously presented one and only the
//! changed runs of glyphs are written. A size change (or [`invalidate`]) forces
//! a full repaint.
//!
//! [`invalidate`]: TerminalRenderer::invalidate

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::Color;

/// A horizontal run of changed glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer {
    out: io::Stdout,
    presented: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            presented: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything [`enter`](Self::enter) did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.presented = None;
    }

    /// Present `frame`, then hand the previously presented buffer back in its
    /// place so the caller can draw the next frame without allocating.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.presented.take() {
            Some(mut prev) if same_size(&prev, frame) => {
                encode_diff_into(&prev, frame, &mut self.buf)?;
                std::mem::swap(&mut prev, frame);
                self.presented = Some(prev);
            }
            _ => {
                encode_full_into(frame, &mut self.buf)?;
                self.presented = Some(frame.clone());
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Clear the screen and write every glyph.
pub fn encode_full_into(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_glyphs(out, frame.row(y), &mut style)?;
    }
    reset_into(out)
}

/// Write only the glyphs that differ between `prev` and `next` (same size).
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        let start = run.x as usize;
        let glyphs = &next.row(run.y)[start..start + run.len as usize];
        write_glyphs(out, glyphs, &mut style)?;
    }
    reset_into(out)
}

/// Maximal runs of differing glyphs, row by row. Frames must be the same size.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let (a, b) = (prev.row(y), next.row(y));
        let mut x = 0;
        while x < b.len() {
            if a.get(x) == Some(&b[x]) {
                x += 1;
                continue;
            }
            let start = x;
            while x < b.len() && a.get(x) != Some(&b[x]) {
                x += 1;
            }
            runs.push(Run {
                x: start as u16,
                y,
                len: (x - start) as u16,
            });
        }
    }
    runs
}

fn write_glyphs(out: &mut Vec<u8>, glyphs: &[Glyph], current: &mut Option<Style>) -> Result<()> {
    for glyph in glyphs {
        if *current != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
