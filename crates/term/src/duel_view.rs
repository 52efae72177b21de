//! DuelView: maps a [`MatchSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O). Both grids are drawn side by side, each with a small panel
//! for score, next piece and soft-pause state. While rainbow mode is active
//! locked cells and falling pieces cycle through hues; nothing else changes.

use crate::engine::core::shape_masks;
use crate::engine::{MatchPhase, MatchSnapshot, PlayerSnapshot};
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::{Color, PieceKind, Player, GRID_HEIGHT, GRID_WIDTH};

const BLACK: Color = Color::new(0, 0, 0);
const WELL_BG: Color = Color::new(30, 30, 40);
const PANEL_W: u16 = 14;
const GAP: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DuelView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for DuelView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl DuelView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn well_w(&self) -> u16 {
        GRID_WIDTH as u16 * self.cell_w + 2
    }

    fn well_h(&self) -> u16 {
        GRID_HEIGHT as u16 * self.cell_h + 2
    }

    fn side_w(&self) -> u16 {
        self.well_w() + 1 + PANEL_W
    }

    /// Width and height the full duel needs.
    pub fn required_size(&self) -> (u16, u16) {
        (self.side_w() * 2 + GAP, self.well_h() + 3)
    }

    /// Render into an existing framebuffer (resized to the viewport).
    pub fn render_into(&self, snap: &MatchSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (need_w, need_h) = self.required_size();
        if viewport.width < need_w || viewport.height < need_h {
            let style = Style::default().bold();
            fb.put_str(0, 0, "terminal too small", style);
            return;
        }

        let origin_x = (viewport.width - need_w) / 2;
        let origin_y = (viewport.height - need_h) / 2;

        self.draw_status_line(fb, snap, origin_x, origin_y, need_w);
        for player in Player::ALL {
            let x = origin_x + player.index() as u16 * (self.side_w() + GAP);
            self.draw_side(fb, snap, snap.player(player), x, origin_y + 1);
        }
        self.draw_help_line(fb, origin_x, origin_y + need_h - 1);

        match snap.phase {
            MatchPhase::Paused => {
                self.draw_banner(fb, origin_x, origin_y, need_w, need_h, &["PAUSED", "p: resume"])
            }
            MatchPhase::GameOver => {
                let title = match snap.winner {
                    Some(Player::Human) => "YOU WIN",
                    Some(Player::Agent) => "AGENT WINS",
                    None => "GAME OVER",
                };
                self.draw_banner(
                    fb,
                    origin_x,
                    origin_y,
                    need_w,
                    need_h,
                    &[title, "r: restart  q: quit"],
                );
            }
            MatchPhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MatchSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_status_line(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, x: u16, y: u16, w: u16) {
        let label = Style::default().bold();
        fb.put_str(x, y, "TETRIS DUEL", label);

        let mut status = [0u8; 32];
        let text = if snap.rainbow_active {
            format_secs(&mut status, "RAINBOW ", snap.rainbow_remaining_ms)
        } else {
            format_secs(&mut status, "rainbow in ", snap.next_rainbow_in_ms)
        };
        let style = if snap.rainbow_active {
            Style::default()
                .with_fg(rainbow_color(snap.clock_ms, 0, 0))
                .bold()
        } else {
            Style::default().dim()
        };
        let tx = x + w.saturating_sub(text.chars().count() as u16);
        fb.put_str(tx, y, text, style);
    }

    fn draw_help_line(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        fb.put_str(
            x,
            y,
            "←/→ move  ↑ rotate  ↓ drop  space hard drop  p pause  r restart  q quit",
            Style::default().dim(),
        );
    }

    fn draw_side(
        &self,
        fb: &mut FrameBuffer,
        snap: &MatchSnapshot,
        side: &PlayerSnapshot,
        x: u16,
        y: u16,
    ) {
        let border = Style::new(Color::new(200, 200, 200), BLACK);
        fb.draw_box(x, y, self.well_w(), self.well_h(), border);
        let title = match side.player {
            Player::Human => " YOU ",
            Player::Agent => " AGENT ",
        };
        fb.put_str(x + 2, y, title, border.bold());

        let empty = Style::new(Color::new(90, 90, 100), WELL_BG).dim();
        for (gy, row) in side.grid.iter().enumerate() {
            for (gx, cell) in row.iter().enumerate() {
                let (gx, gy) = (gx as u16, gy as u16);
                match cell {
                    Some(color) => {
                        let color = self.cell_color(snap, *color, gx, gy);
                        self.fill_cell(fb, x, y, gx, gy, '█', Style::new(color, WELL_BG).bold());
                    }
                    None => self.fill_cell(fb, x, y, gx, gy, '·', empty),
                }
            }
        }

        if snap.phase != MatchPhase::GameOver {
            let piece = side.current.to_piece();
            for (px, py) in piece.cells() {
                if px < 0 || py < 0 || px >= GRID_WIDTH as i8 || py >= GRID_HEIGHT as i8 {
                    continue;
                }
                let (gx, gy) = (px as u16, py as u16);
                let color = self.cell_color(snap, piece.color, gx, gy);
                self.fill_cell(fb, x, y, gx, gy, '█', Style::new(color, WELL_BG).bold());
            }
        }

        self.draw_panel(fb, side, x + self.well_w() + 1, y);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, side: &PlayerSnapshot, x: u16, y: u16) {
        let label = Style::default().bold();
        let value = Style::default();

        fb.put_str(x, y, "SCORE", label);
        fb.put_number(x, y + 1, side.score as u64, value);

        fb.put_str(x, y + 3, "NEXT", label);
        fb.put_str(x + 5, y + 3, side.next.as_str(), value.dim());
        self.draw_preview(fb, side.next, x, y + 4);

        let soft_y = y + 10;
        if side.soft_pause_active() {
            let mut buf = [0u8; 32];
            let text = format_secs(&mut buf, "SLOW ", side.soft_pause_remaining_ms);
            fb.put_str(x, soft_y, text, value.with_fg(Color::new(120, 180, 255)).bold());
        }
        fb.put_str(x, soft_y + 1, "TICK", label.dim());
        let end = fb.put_number(x + 5, soft_y + 1, side.tick_interval_ms as u64, value.dim());
        fb.put_str(end, soft_y + 1, "ms", value.dim());
    }

    /// First rotation state of `kind`, one terminal column per mask cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) {
        let Some(mask) = shape_masks(kind).first() else {
            return;
        };
        let style = Style::new(kind.color(), BLACK);
        for (dx, dy) in mask.offsets() {
            let px = x + dx as u16 * 2;
            let py = y + dy as u16;
            fb.put(px, py, '█', style);
            fb.put(px + 1, py, '█', style);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, lines: &[&str]) {
        let style = Style::new(Color::new(255, 255, 255), BLACK).bold();
        let top = y + h / 2 - lines.len() as u16 / 2;
        for (i, line) in lines.iter().enumerate() {
            let lw = line.chars().count() as u16;
            fb.put_str(x + w.saturating_sub(lw) / 2, top + i as u16, line, style);
        }
    }

    fn cell_color(&self, snap: &MatchSnapshot, base: Color, x: u16, y: u16) -> Color {
        if snap.rainbow_active {
            rainbow_color(snap.clock_ms, x, y)
        } else {
            base
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        well_x: u16,
        well_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = well_x + 1 + cell_x * self.cell_w;
        let py = well_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

/// Rainbow-mode color for grid cell `(x, y)` at match time `clock_ms`.
///
/// Hue advances 50 degrees per second and 50 degrees per cell along the
/// diagonal.
pub fn rainbow_color(clock_ms: u64, x: u16, y: u16) -> Color {
    let t = clock_ms as f64 / 1000.0;
    let hue = (t * 50.0 + (x as f64 + y as f64) * 50.0) % 360.0;
    hsv_to_rgb(hue, 0.8, 0.9)
}

/// `h` in degrees, `s` and `v` in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::new(to_u8(r), to_u8(g), to_u8(b))
}

/// `"{prefix}{seconds}s"` into a stack buffer, seconds rounded up.
fn format_secs<'a>(buf: &'a mut [u8; 32], prefix: &str, ms: u64) -> &'a str {
    use std::io::Write;
    let secs = ms.div_ceil(1000);
    let mut cursor = std::io::Cursor::new(&mut buf[..]);
    let _ = write!(cursor, "{}{}s", prefix, secs);
    let len = cursor.position() as usize;
    std::str::from_utf8(&buf[..len]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Agent, Match, MatchConfig};
    use crate::types::MatchCommand;

    fn text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row(y).iter().map(|g| g.ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn test_match() -> Match {
        Match::with_agent(&MatchConfig::default(), 9, Agent::deterministic())
    }

    #[test]
    fn test_renders_both_sides() {
        let view = DuelView::default();
        let (w, h) = view.required_size();
        let fb = view.render(&test_match().snapshot(), Viewport::new(w, h));
        let out = text(&fb);
        assert!(out.contains("YOU"));
        assert!(out.contains("AGENT"));
        assert!(out.contains("SCORE"));
        assert!(out.contains("rainbow in 120s"));
    }

    #[test]
    fn test_paused_banner() {
        let mut m = test_match();
        m.apply(MatchCommand::TogglePause);
        let view = DuelView::default();
        let (w, h) = view.required_size();
        let out = text(&view.render(&m.snapshot(), Viewport::new(w + 10, h + 4)));
        assert!(out.contains("PAUSED"));
    }

    #[test]
    fn test_small_viewport_degrades() {
        let view = DuelView::default();
        let out = text(&view.render(&test_match().snapshot(), Viewport::new(30, 5)));
        assert!(out.contains("too small"));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Color::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Color::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Color::new(0, 0, 255));
    }

    #[test]
    fn test_rainbow_cycles_over_time_and_space() {
        assert_ne!(rainbow_color(0, 0, 0), rainbow_color(1_000, 0, 0));
        assert_ne!(rainbow_color(0, 0, 0), rainbow_color(0, 1, 0));
        // 360 degrees: 7.2 s of match time.
        assert_eq!(rainbow_color(0, 0, 0), rainbow_color(7_200, 0, 0));
    }
}
