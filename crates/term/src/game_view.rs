//! GameView: draws a [`Snapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{get_shape, Snapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, PieceKind, VisualTag};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
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

/// Board placement inside the viewport, in terminal columns/rows
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as wide.
        Self::new(2, 1)
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

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let cols = snap.width.max(0) as u16;
        let rows = snap.height.max(0) as u16;
        let board_w = cols.saturating_mul(self.cell_w);
        let board_h = rows.saturating_mul(self.cell_h);
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

        let empty = Style::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for y in 0..rows {
            for x in 0..cols {
                self.fill_cell(fb, frame, x, y, '·', empty);
            }
        }
        draw_border(fb, frame, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        for cell in &snap.cells {
            let bold = snap.current_cells.contains(cell);
            self.draw_cell(fb, frame, snap, cell, bold);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, snap: &Snapshot, cell: &Cell, bold: bool) {
        if cell.x < 0 || cell.y < 0 || cell.x >= snap.width || cell.y >= snap.height {
            return;
        }
        let (ch, mut style) = match cell.tag {
            VisualTag::Wall => ('▓', Style::new(Rgb::new(120, 120, 130), PLAY_BG)),
            VisualTag::Piece(kind) => ('█', Style::new(piece_color(kind), PLAY_BG)),
        };
        style.bold = bold;
        self.fill_cell(fb, frame, cell.x as u16, cell.y as u16, ch, style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: Style) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next {
            Some(kind) => {
                let style = Style::new(piece_color(kind), PANEL_BG);
                for offset in get_shape(kind) {
                    let px = panel_x + offset.x as u16 * self.cell_w;
                    let py = y + offset.y as u16;
                    fb.fill_rect(px, py, self.cell_w, 1, '█', style);
                }
                y = y.saturating_add(3);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(2);
            }
        }

        fb.put_str(panel_x, y, "OBJECTS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.objects as u32, value);
        y = y.saturating_add(2);

        let help = Style::new(Rgb::new(140, 140, 150), PANEL_BG).dim();
        for line in ["←→↓ move", "↑ rotate", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: Style) {
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
