//! GameView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//! It also owns the inverse mapping, from a terminal position back to the
//! board coordinate drawn there, so mouse clicks land on the right cell.

use crate::core::BoardSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Color, Coord, Tier};

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

/// Session information shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView<'a> {
    pub moves: u32,
    pub shuffles: u32,
    /// Cells cleared by the most recent click.
    pub last_cleared: u32,
    /// Keyboard cursor position, if it should be drawn.
    pub cursor: Option<Coord>,
    /// One-line message under the board (errors, hints).
    pub message: Option<&'a str>,
}

const PALETTE: [Rgb; 8] = [
    Rgb::new(220, 70, 70),
    Rgb::new(70, 170, 230),
    Rgb::new(90, 200, 100),
    Rgb::new(240, 200, 60),
    Rgb::new(180, 100, 220),
    Rgb::new(250, 140, 50),
    Rgb::new(60, 200, 190),
    Rgb::new(230, 110, 170),
];

/// Display color for a cell color. Palette entries repeat past eight colors.
pub fn color_rgb(color: Color) -> Rgb {
    PALETTE[color.index() as usize % PALETTE.len()]
}

/// Fill character for a tier; bigger groups get denser shading.
pub fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::Default => ' ',
        Tier::First => '░',
        Tier::Second => '▒',
        Tier::Third => '▓',
    }
}

/// Board frame placement inside the viewport (border included).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
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

    fn frame(&self, snap: &BoardSnapshot, viewport: Viewport) -> Frame {
        let w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Top-left terminal position of a board cell.
    fn cell_origin(&self, frame: Frame, snap: &BoardSnapshot, coord: Coord) -> Option<(u16, u16)> {
        if coord.column >= snap.width || coord.row >= snap.height {
            return None;
        }
        let visual_row = snap.height - 1 - coord.row;
        // Cells past the edge of a huge board clamp to u16::MAX and are clipped.
        Some((
            frame
                .x
                .saturating_add(1)
                .saturating_add(coord.column.saturating_mul(self.cell_w)),
            frame
                .y
                .saturating_add(1)
                .saturating_add(visual_row.saturating_mul(self.cell_h)),
        ))
    }

    /// Render the snapshot into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default());

        if snap.is_empty() {
            let text = "NO GAME - press r";
            let x = viewport.width.saturating_sub(text.chars().count() as u16) / 2;
            fb.put_str(x, viewport.height / 2, text, Style::default().bold());
            return;
        }

        let frame = self.frame(snap, viewport);
        let well = Rgb::new(30, 30, 40);
        let border = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            Style::plain(well, well),
        );
        draw_border(fb, frame, border);

        for cell in &snap.cells {
            let Some((px, py)) = self.cell_origin(frame, snap, cell.coord()) else {
                continue;
            };
            let bg = color_rgb(cell.color);
            let style = Style::plain(bg.lighten(150), bg);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, tier_glyph(cell.tier), style);
        }

        if let Some(cursor) = status.cursor {
            self.draw_cursor(fb, frame, snap, cursor);
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);

        if let Some(message) = status.message {
            let y = frame.y.saturating_add(frame.h);
            if y < viewport.height {
                let x = viewport.width.saturating_sub(message.chars().count() as u16) / 2;
                fb.put_str(x, y, message, Style::default());
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &BoardSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    /// The board coordinate of the cell drawn at terminal position (x, y).
    pub fn hit_test(&self, snap: &BoardSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<Coord> {
        if snap.is_empty() {
            return None;
        }
        let frame = self.frame(snap, viewport);
        let px = x.checked_sub(frame.x + 1)?;
        let py = y.checked_sub(frame.y + 1)?;
        let column = px / self.cell_w;
        let visual_row = py / self.cell_h;
        if column >= snap.width || visual_row >= snap.height {
            return None;
        }
        let coord = Coord::new(column, snap.height - 1 - visual_row);
        snap.get(coord).map(|_| coord)
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, frame: Frame, snap: &BoardSnapshot, cursor: Coord) {
        let Some((px, py)) = self.cell_origin(frame, snap, cursor) else {
            return;
        };
        let bg = snap
            .get(cursor)
            .map(|cell| color_rgb(cell.color))
            .unwrap_or(Rgb::new(30, 30, 40));
        let style = Style::plain(Rgb::new(255, 255, 255), bg).bold();
        if self.cell_w >= 2 {
            fb.put_char(px, py, '[', style);
            fb.put_char(px.saturating_add(self.cell_w - 1), py, ']', style);
        } else {
            fb.put_char(px, py, '*', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows: [(&str, u32); 4] = [
            ("MOVES", status.moves),
            ("CLEARED", status.last_cleared),
            ("SHUFFLES", status.shuffles),
            ("COLORS", snap.color_count as u32),
        ];
        let mut y = frame.y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        for help in ["click/enter: clear", "r: new game", "q: quit"] {
            fb.put_str(panel_x, y, help, value.dim());
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
