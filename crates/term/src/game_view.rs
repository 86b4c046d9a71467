//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellValue, PieceKind, SessionState};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner and outer size of the bordered board
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square in most fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    ///
    /// Reusing one framebuffer across frames avoids a fresh allocation per draw.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let board_w = to_u16(snap.width()).saturating_mul(self.cell_w);
        let board_h = to_u16(snap.height()).saturating_mul(self.cell_h);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, frame, border);
        self.draw_board(fb, snap, frame);
        self.draw_ghost(fb, snap, frame);
        draw_side_panel(fb, snap, viewport, frame);

        match snap.state {
            SessionState::PreGame => draw_banner(fb, frame, &["TETRIS", "ENTER TO START"]),
            SessionState::Paused => draw_banner(fb, frame, &["PAUSED", "P TO RESUME"]),
            SessionState::GameOver => draw_banner(fb, frame, &["GAME OVER", "ENTER TO RESTART"]),
            SessionState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let active_kind = snap.active.map(|a| a.kind);
        let locked = CellStyle::new(Rgb::new(170, 170, 180), PLAYFIELD_BG);
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (ch, style) = match (cell, active_kind) {
                    (CellValue::Active, Some(kind)) => ('█', piece_style(kind)),
                    (CellValue::Empty, _) => ('·', empty),
                    _ => ('█', locked),
                };
                self.fill_cell(fb, frame, x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) else {
            return;
        };
        if ghost_y == active.y {
            return;
        }

        let style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
        for (x, y) in active.cells_at(ghost_y) {
            if x < 0 || y < 0 {
                continue;
            }
            let cell = snap
                .board
                .get(y as usize)
                .and_then(|row| row.get(x as usize));
            if cell == Some(&CellValue::Empty) {
                self.fill_cell(fb, frame, x as u16, y as u16, '░', style);
            }
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x.saturating_add(1).saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, PLAYFIELD_BG).bold()
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

fn draw_side_panel(fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
    let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
    if panel_x >= viewport.width || viewport.width - panel_x < 8 {
        return;
    }

    let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

    let mut y = frame.y;
    for (name, n) in [
        ("SCORE", snap.score),
        ("LEVEL", snap.level),
        ("LINES", snap.lines),
    ] {
        fb.put_str(panel_x, y, name, label);
        fb.put_u32(panel_x, y + 1, n, value);
        y = y.saturating_add(3);
    }

    fb.put_str(panel_x, y, "HOLD", label);
    match snap.hold {
        Some(kind) => {
            let style = if snap.can_hold {
                piece_style(kind)
            } else {
                piece_style(kind).dim()
            };
            fb.put_char(panel_x, y + 1, kind.as_char(), style);
        }
        None => fb.put_char(panel_x, y + 1, '-', value),
    }
    y = y.saturating_add(3);

    fb.put_str(panel_x, y, "NEXT", label);
    for kind in &snap.next_queue {
        y = y.saturating_add(1);
        if y >= viewport.height {
            break;
        }
        fb.put_char(panel_x, y, kind.as_char(), piece_style(*kind));
    }
}

/// Centered lines over the middle of the board
fn draw_banner(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let top = (frame.y + frame.h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;
        fb.put_str(x, top + i as u16, text, style);
    }
}
