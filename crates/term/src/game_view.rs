//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O; everything here is unit-testable.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{Rgb, RunStatus, BOARD_HEIGHT, BOARD_WIDTH};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PREVIEW_SIZE: u16 = 4;

const CONTROLS: [(&str, &str); 7] = [
    ("<- ->", "move"),
    ("Up/X", "rotate"),
    ("Down", "soft drop"),
    ("Space", "hard drop"),
    ("P", "pause"),
    ("R", "restart"),
    ("Esc", "quit"),
];

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

/// Screen-space placement of the well, including its border.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    /// Board cell height in terminal rows
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers keep one framebuffer across frames; it is only resized when the
    /// viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(blank(PANEL_BG));

        let frame = self.frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, frame, border);

        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                match snap.color_at(col, row) {
                    Some(color) => self.draw_block(fb, frame, col as u16, row as u16, color),
                    None => self.draw_empty(fb, frame, col as u16, row as u16),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            RunStatus::Paused => draw_overlay(fb, frame, &["PAUSED", "P to resume"]),
            RunStatus::GameOver => {
                draw_overlay(fb, frame, &["GAME OVER", "R restart", "Esc quit"])
            }
            RunStatus::Playing => {}
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Title screen shown before the first game starts.
    pub fn render_title_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(blank(PANEL_BG));

        let frame = self.frame(viewport);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));
        for row in 0..BOARD_HEIGHT as u16 {
            for col in 0..BOARD_WIDTH as u16 {
                self.draw_empty(fb, frame, col, row);
            }
        }
        draw_overlay(fb, frame, &["BLOCKFALL", "", "press any key"]);

        let legend_y = frame.y.saturating_add(frame.h).saturating_add(1);
        let panel = CellStyle::new(Rgb::new(160, 160, 160), PANEL_BG).dim();
        let mut x = frame.x;
        for (key, action) in CONTROLS.iter().take(4) {
            x = fb.put_str(x, legend_y, key, panel);
            x = fb.put_str(x.saturating_add(1), legend_y, action, panel);
            x = x.saturating_add(2);
        }
    }

    pub fn render_title(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_title_into(viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        Frame {
            x: viewport.width.saturating_sub(w + PANEL_WIDTH) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn cell_origin(&self, frame: Frame, col: u16, row: u16) -> (u16, u16) {
        (
            frame.x + 1 + col * self.cell_w,
            frame.y + 1 + row * self.cell_h,
        )
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, color: Rgb) {
        let (x, y) = self.cell_origin(frame, col, row);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, '█', CellStyle::new(color, WELL_BG));
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16) {
        let (x, y) = self.cell_origin(frame, col, row);
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(x, y, '·', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let well = CellStyle::new(Rgb::new(60, 60, 70), WELL_BG);
        fb.fill_rect(panel_x, y, PREVIEW_SIZE * self.cell_w, PREVIEW_SIZE * self.cell_h, ' ', well);
        let block = CellStyle::new(snap.next.color, WELL_BG);
        for &(dx, dy) in snap.next.mask.iter() {
            if !(0..PREVIEW_SIZE as i8).contains(&dx) || !(0..PREVIEW_SIZE as i8).contains(&dy) {
                continue;
            }
            let px = panel_x + dx as u16 * self.cell_w;
            let py = y + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', block);
        }
        y = y.saturating_add(PREVIEW_SIZE * self.cell_h + 1);

        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        let hint = CellStyle::new(Rgb::new(160, 160, 160), PANEL_BG);
        for (key, action) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 7, y, action, hint);
            y = y.saturating_add(1);
        }
    }
}

/// Columns reserved to the right of the well for the side panel
const PANEL_WIDTH: u16 = 20;

fn blank(bg: Rgb) -> Cell {
    Cell {
        ch: ' ',
        style: CellStyle::new(Rgb::new(220, 220, 220), bg),
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the well; the first line is emphasized.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let top = frame
        .y
        .saturating_add(frame.h / 2)
        .saturating_sub(lines.len() as u16 / 2);
    let heading = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let body = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

    for (i, text) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = if i == 0 { heading } else { body };
        fb.put_str(x, top + i as u16, text, style);
    }
}
