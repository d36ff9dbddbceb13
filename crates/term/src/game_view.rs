//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, SnakeSnapshot, TetrisSnapshot, Twenty48Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ShapeId, Status, TWENTY48_SIZE};

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

/// Outer rectangle of a bordered play area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Frame {
    fn inner_x(&self) -> u16 {
        self.x + 1
    }

    fn inner_y(&self) -> u16 {
        self.y + 1
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Columns per 2048 tile
const TILE_W: u16 = 7;
/// Rows per 2048 tile
const TILE_H: u16 = 3;

/// A lightweight terminal view for all three games.
pub struct GameView {
    /// Grid cell width in terminal columns (Tetris and Snake).
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = match snap {
            GameSnapshot::Tetris(s) => self.draw_tetris(fb, s, viewport),
            GameSnapshot::Twenty48(s) => self.draw_twenty48(fb, s, viewport),
            GameSnapshot::Snake(s) => self.draw_snake(fb, s, viewport),
        };

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status() {
            Status::Paused => draw_overlay(fb, frame, &["PAUSED"]),
            Status::GameOver => draw_overlay(fb, frame, &["GAME OVER", "R TO RESTART"]),
            Status::NotStarted | Status::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn place(&self, viewport: Viewport, inner_w: u16, inner_h: u16) -> Frame {
        let w = inner_w + 2;
        let h = inner_h + 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame {
            x: viewport.width.saturating_sub(w + PANEL_W) / 2,
            y,
            w,
            h,
        }
    }

    fn grid_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, ch: char, style: CellStyle) {
        if x < 0 || y < 0 {
            return;
        }
        let px = frame.inner_x() + x as u16 * self.cell_w;
        let py = frame.inner_y() + y as u16;
        if px >= frame.x + frame.w - 1 || py >= frame.y + frame.h - 1 {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_tetris(&self, fb: &mut FrameBuffer, snap: &TetrisSnapshot, viewport: Viewport) -> Frame {
        let frame = self.place(
            viewport,
            snap.width as u16 * self.cell_w,
            snap.height as u16,
        );
        draw_play_area(fb, frame);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for y in 0..snap.height as usize {
            for x in 0..snap.width as usize {
                let cell = snap.cell(x, y);
                let (ch, style) = match ShapeId::from_id(cell) {
                    Some(shape) => ('█', shape_style(shape)),
                    None => ('·', empty),
                };
                self.grid_cell(fb, frame, x as i16, y as i16, ch, style);
            }
        }

        if let Some(active) = snap.active {
            let style = shape_style(active.shape).bold();
            for &(x, y) in active.cells.iter() {
                self.grid_cell(fb, frame, x, y, '█', style);
            }
        }
        frame
    }

    fn draw_twenty48(&self, fb: &mut FrameBuffer, snap: &Twenty48Snapshot, viewport: Viewport) -> Frame {
        let n = TWENTY48_SIZE as u16;
        let frame = self.place(viewport, n * TILE_W, n * TILE_H);
        draw_play_area(fb, frame);

        for (r, row) in snap.board.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let x = frame.inner_x() + c as u16 * TILE_W;
                let y = frame.inner_y() + r as u16 * TILE_H;
                let style = tile_style(value);
                // One column of gutter on the right keeps tiles apart.
                fb.fill_rect(x, y, TILE_W - 1, TILE_H, ' ', style);
                if value == 0 {
                    fb.put_char(x + (TILE_W - 1) / 2, y + TILE_H / 2, '·', style.dim());
                } else {
                    let digits = digit_count(value);
                    let dx = (TILE_W - 1).saturating_sub(digits) / 2;
                    fb.put_u32(x + dx, y + TILE_H / 2, value, style.bold());
                }
            }
        }
        frame
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, snap: &SnakeSnapshot, viewport: Viewport) -> Frame {
        let frame = self.place(
            viewport,
            snap.width as u16 * self.cell_w,
            snap.height as u16,
        );
        draw_play_area(fb, frame);

        if let Some(food) = snap.food {
            let style = CellStyle::new(Rgb::new(230, 70, 70), PLAY_BG).bold();
            self.grid_cell(fb, frame, food.x, food.y, '●', style);
        }

        let body = CellStyle::new(Rgb::new(90, 200, 110), PLAY_BG);
        for p in snap.body.iter().skip(1) {
            self.grid_cell(fb, frame, p.x, p.y, '█', body);
        }
        if let Some(head) = snap.body.first() {
            let style = CellStyle::new(Rgb::new(170, 255, 170), PLAY_BG).bold();
            self.grid_cell(fb, frame, head.x, head.y, '█', style);
        }
        frame
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let mut y = frame.y;

        let title = match snap {
            GameSnapshot::Tetris(_) => "TETRIS",
            GameSnapshot::Twenty48(_) => "2048",
            GameSnapshot::Snake(_) => "SNAKE",
        };
        fb.put_str(panel_x, y, title, label);
        y += 2;

        y = entry_u32(fb, panel_x, y, "SCORE", snap.score(), label, value);

        match snap {
            GameSnapshot::Tetris(s) => {
                y = entry_u32(fb, panel_x, y, "LINES", s.lines_removed, label, value);
                fb.put_str(panel_x, y, "SPEED", label);
                let end = fb.put_u32(panel_x, y + 1, s.fall_interval_ms, value);
                fb.put_str(end, y + 1, "ms", value);
                y += 3;
                fb.put_str(panel_x, y, "NEXT", label);
                fb.put_str(panel_x, y + 1, &s.next_shape.as_str().to_uppercase(), value);
                y += 3;
            }
            GameSnapshot::Twenty48(s) => {
                let best = s.board.iter().flatten().copied().max().unwrap_or(0);
                y = entry_u32(fb, panel_x, y, "BEST TILE", best, label, value);
            }
            GameSnapshot::Snake(s) => {
                y = entry_u32(fb, panel_x, y, "LENGTH", s.body.len() as u32, label, value);
                y = entry_u32(fb, panel_x, y, "DEATHS", s.deaths, label, value);
            }
        }

        let hint = value.dim();
        let rotate = matches!(snap, GameSnapshot::Tetris(_));
        for line in ["ARROWS move", "SPACE rotate", "P pause", "R restart", "Q quit"] {
            if line.starts_with("SPACE") && !rotate {
                continue;
            }
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

/// Width reserved to the right of the play area for the side panel.
const PANEL_W: u16 = 16;

fn draw_play_area(fb: &mut FrameBuffer, frame: Frame) {
    fb.fill_rect(
        frame.inner_x(),
        frame.inner_y(),
        frame.w - 2,
        frame.h - 2,
        ' ',
        CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
    );
    draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));
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

fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let top = frame.y + (frame.h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        fb.put_str_centered(frame.x, top + i as u16, frame.w, text, style);
    }
}

fn entry_u32(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    label: &str,
    n: u32,
    label_style: CellStyle,
    value_style: CellStyle,
) -> u16 {
    fb.put_str(x, y, label, label_style);
    fb.put_u32(x, y + 1, n, value_style);
    y + 3
}

fn shape_style(shape: ShapeId) -> CellStyle {
    let fg = match shape {
        ShapeId::Z => Rgb::new(220, 80, 80),
        ShapeId::S => Rgb::new(100, 220, 120),
        ShapeId::Line => Rgb::new(80, 220, 220),
        ShapeId::T => Rgb::new(200, 120, 220),
        ShapeId::Square => Rgb::new(240, 220, 80),
        ShapeId::L => Rgb::new(255, 165, 0),
        ShapeId::MirroredL => Rgb::new(80, 120, 220),
    };
    CellStyle::new(fg, PLAY_BG)
}

fn tile_style(value: u32) -> CellStyle {
    let bg = match value {
        0 => Rgb::new(45, 45, 55),
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if (2..=4).contains(&value) {
        Rgb::new(119, 110, 101)
    } else {
        Rgb::new(249, 246, 242)
    };
    CellStyle::new(fg, bg)
}

fn digit_count(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
