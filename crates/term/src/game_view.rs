//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, CellStatus, Phase, PieceKind};

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const KEY_HELP: [&str; 6] = [
    "<- ->  move",
    "down   soft drop",
    "up z   rotate ccw",
    "x k    rotate cw",
    "space  hard drop",
    "q      quit",
];

/// A lightweight terminal view of the stage.
pub struct GameView {
    /// Stage cell width in terminal columns.
    cell_w: u16,
    /// Stage cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
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

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let cols = snap.grid.width() as u16;
        let rows = snap.grid.height() as u16;
        let stage_w = cols.saturating_mul(self.cell_w);
        let stage_h = rows.saturating_mul(self.cell_h);
        let frame_w = stage_w.saturating_add(2);
        let frame_h = stage_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            stage_w,
            stage_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = cell_glyph(*cell);
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.phase {
            Phase::Idle => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "PRESS ENTER");
            }
            Phase::GameOver => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "GAME OVER");
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 2, "ENTER TO RETRY");
            }
            Phase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
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
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines_cleared),
            ("SPEED", snap.drop_interval_ms),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }
        if snap.soft_dropping {
            fb.put_str(panel_x + 5, y.saturating_sub(2), "ms soft", value.dim());
        } else {
            fb.put_str(panel_x + 5, y.saturating_sub(2), "ms", value.dim());
        }

        for line in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, value.dim());
            y = y.saturating_add(1);
        }
    }
}

/// Glyph for one stage cell; ids outside the catalog render grey.
fn cell_glyph(cell: Cell) -> (char, CellStyle) {
    if cell.is_empty() {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        return ('·', style);
    }

    let fg = match PieceKind::from_id(cell.piece) {
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        None => Rgb::new(150, 150, 150),
    };
    let style = CellStyle::new(fg, PLAYFIELD_BG);
    let style = if cell.status == CellStatus::Active {
        style.bold()
    } else {
        style
    };
    ('█', style)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    line: u16,
    text: &str,
) {
    let y = start_y.saturating_add(frame_h / 2).saturating_add(line);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;

    #[test]
    fn test_unknown_piece_id_renders_grey() {
        let (ch, style) = cell_glyph(Cell::locked(8));
        assert_eq!(ch, '█');
        assert_eq!(style.fg, Rgb::new(150, 150, 150));
    }

    #[test]
    fn test_active_cells_are_bold() {
        assert!(cell_glyph(Cell::active(6)).1.bold);
        assert!(!cell_glyph(Cell::locked(6)).1.bold);
    }

    #[test]
    fn test_idle_overlay() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(60, 24));
        assert!(fb.text_rows().iter().any(|r| r.contains("PRESS ENTER")));
    }

    #[test]
    fn test_small_stage_fits_top_left() {
        let snap = GameSnapshot {
            grid: Stage::from_picture(&["..", "1#"]),
            phase: Phase::Running,
            ..GameSnapshot::default()
        };
        let fb = GameView::new(1, 1)
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(4, 4));
        let rows = fb.text_rows();
        assert_eq!(rows[0], "┌──┐");
        assert_eq!(rows[1], "│··│");
        assert_eq!(rows[2], "│██│");
        assert_eq!(rows[3], "└──┘");
    }
}
