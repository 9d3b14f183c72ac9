//! Character-grid view of a frame
//!
//! Window pixels are scaled onto a fixed grid of cells. Each cell samples
//! its center point; later figures draw over earlier ones.

use std::fmt::Write;

use glam::Vec2;

use super::shapes;
use crate::sim::{FigureView, Frame, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    columns: usize,
    rows: usize,
    cells: Vec<Option<Cell>>,
}

impl Canvas {
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells[row * self.columns + column]
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Redraw the grid from a frame
    pub fn draw(&mut self, frame: &Frame) {
        self.clear();
        if frame.extent.x <= 0 || frame.extent.y <= 0 {
            return;
        }
        let cell_size = Vec2::new(
            frame.extent.x as f32 / self.columns as f32,
            frame.extent.y as f32 / self.rows as f32,
        );
        for figure in &frame.figures {
            self.draw_figure(figure, cell_size);
        }
    }

    fn draw_figure(&mut self, figure: &FigureView, cell_size: Vec2) {
        let cell = Cell {
            glyph: shapes::glyph(figure.shape),
            color: figure.color,
        };
        let origin = figure.pos.as_vec2();
        let size = figure.size as f32;

        // Only the cells under the figure's bounding box can be covered
        let first = (origin / cell_size).floor().max(Vec2::ZERO);
        let last = ((origin + Vec2::splat(size)) / cell_size).ceil();
        let (c0, r0) = (first.x as usize, first.y as usize);
        let c1 = (last.x.max(0.0) as usize).min(self.columns);
        let r1 = (last.y.max(0.0) as usize).min(self.rows);

        let mut drawn = false;
        for row in r0..r1 {
            for column in c0..c1 {
                let center = (Vec2::new(column as f32, row as f32) + 0.5) * cell_size;
                if shapes::covers(figure.shape, center - origin, size) {
                    self.cells[row * self.columns + column] = Some(cell);
                    drawn = true;
                }
            }
        }

        // Figures smaller than a cell still show up in the cell under their center
        if !drawn {
            let center = (origin + Vec2::splat(size / 2.0)) / cell_size;
            let column = (center.x.max(0.0) as usize).min(self.columns - 1);
            let row = (center.y.max(0.0) as usize).min(self.rows - 1);
            self.cells[row * self.columns + column] = Some(cell);
        }
    }

    /// Plain text with a border, one line per row
    pub fn to_text(&self) -> String {
        self.render(false)
    }

    /// Like `to_text`, with 24-bit ANSI colors on each glyph
    pub fn to_ansi(&self) -> String {
        self.render(true)
    }

    fn render(&self, ansi: bool) -> String {
        let border = format!("+{}+\n", "-".repeat(self.columns));
        let mut out = String::with_capacity((self.columns + 3) * (self.rows + 2));
        out.push_str(&border);
        for row in self.cells.chunks(self.columns) {
            out.push('|');
            for cell in row {
                match cell {
                    Some(Cell { glyph, color }) if ansi => {
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m{}\x1b[0m",
                            color.r, color.g, color.b, glyph
                        );
                    }
                    Some(cell) => out.push(cell.glyph),
                    None => out.push(' '),
                }
            }
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}
