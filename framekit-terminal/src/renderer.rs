/// ASCII line canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use framekit_core::LineSurface;
use std::io::Write;

/// Endpoints further than this many canvas sizes away are treated as
/// garbage from unclipped projection and the line is dropped.
const MAX_REACH: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Character grid that rasterizes line segments with Bresenham's algorithm.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    pen: Cell,
    dropped: usize,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
            pen: Cell {
                ch: '#',
                color: Color::White,
            },
            dropped: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.dropped = 0;
    }

    /// Character and color used by subsequent `draw_line` calls.
    pub fn set_pen(&mut self, ch: char, color: Color) {
        self.pen = Cell { ch, color };
    }

    /// Lines rejected since the last `clear`.
    pub fn dropped_lines(&self) -> usize {
        self.dropped
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].ch)
        } else {
            None
        }
    }

    /// Plot one cell with the given character; off-canvas cells are ignored.
    pub fn plot(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, color };
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.plot(x + i as i32, y, ch, color);
        }
    }

    fn in_reach(&self, (x, y): (f32, f32)) -> bool {
        let reach_x = MAX_REACH * self.width.max(1) as f32;
        let reach_y = MAX_REACH * self.height.max(1) as f32;
        x.is_finite() && y.is_finite() && x.abs() <= reach_x && y.abs() <= reach_y
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineSurface for AsciiCanvas {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        if !self.in_reach(from) || !self.in_reach(to) {
            self.dropped += 1;
            return;
        }

        let Cell { ch, color } = self.pen;
        let (mut x0, mut y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}
