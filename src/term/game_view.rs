//! GameView: projects a [`GameSession`] into a framebuffer.
//!
//! Pure, no I/O. The layout is a centered bordered playfield, the ghost
//! piece rendered dim under the active piece, and a side panel with
//! score, hold, and the next queue.

use crate::core::{pieces, GameSession};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

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

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(28, 28, 36);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board = session.board();
        let board_px_w = board.width() as u16 * self.cell_w;
        let board_px_h = board.height() as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::fg(Rgb::new(80, 80, 90)).on(PLAYFIELD_BG),
        );
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        // Locked stack, with grid dots for empty cells.
        for y in 0..board.height() as i8 {
            for x in 0..board.width() as i8 {
                match board.get(x, y).unwrap_or(None) {
                    Some(kind) => self.draw_mino(&mut fb, start_x, start_y, x, y, kind, false),
                    None => self.draw_grid_dot(&mut fb, start_x, start_y, x, y),
                }
            }
        }

        // Ghost first so the active piece draws over it when they overlap.
        if let Some(cells) = session.ghost_cells() {
            let ghost = CellStyle::fg(Rgb::new(140, 140, 140)).on(PLAYFIELD_BG).dim();
            for (x, y) in cells {
                if y >= 0 {
                    self.fill_cell(&mut fb, start_x, start_y, x, y, '░', ghost);
                }
            }
        }

        if let Some(active) = session.active() {
            for (x, y) in active.cells() {
                if y >= 0 {
                    self.draw_mino(&mut fb, start_x, start_y, x, y, active.kind, true);
                }
            }
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x, start_y, frame_w);

        if session.game_over() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if session.paused() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::fg(Rgb::new(200, 200, 200));

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

    fn draw_grid_dot(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i8, y: i8) {
        let style = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAYFIELD_BG).dim();
        self.fill_cell(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_mino(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        kind: PieceKind,
        bold: bool,
    ) {
        let (r, g, b) = pieces::color(kind);
        let mut style = CellStyle::fg(Rgb::new(r, g, b)).on(PLAYFIELD_BG);
        if bold {
            style = style.bold();
        }
        self.fill_cell(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let px = start_x + 1 + x as u16 * self.cell_w;
        let py = start_y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(190, 190, 190));

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", session.score()),
            ("LEVEL", session.level()),
            ("LINES", session.lines()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &number.to_string(), value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        let hold_text = match session.held() {
            Some(kind) => kind.letter(),
            None => "-",
        };
        let hold_style = if session.can_hold() { value } else { value.dim() };
        fb.put_str(panel_x, y + 1, hold_text, hold_style);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for kind in session.preview() {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, kind.letter(), value);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        for line in [
            "←/→ move   ↓ soft",
            "↑/z rotate  ␣ drop",
            "c hold  p pause",
            "r restart  q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, value.dim());
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
    }
}
