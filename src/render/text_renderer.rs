use std::io::Write;

use super::{RenderEvent, Renderer};
use crate::cell::Cell;
use crate::grid::Grid;
use crate::tile::TileKind;

const UNRESOLVED: char = '·';
const CONTRADICTION: char = '×';

pub fn glyph(cell: &Cell) -> char {
    match cell.resolved() {
        Some(tile) => tile_glyph(tile),
        None if cell.is_contradiction() => CONTRADICTION,
        None => UNRESOLVED,
    }
}

pub fn tile_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Blank => ' ',
        TileKind::TopRightTurn => '└',
        TileKind::TopLeftTurn => '┘',
        TileKind::BottomRightTurn => '┌',
        TileKind::BottomLeftTurn => '┐',
        TileKind::Vertical => '│',
        TileKind::Horizontal => '─',
        TileKind::VerticalCrossing => '╂',
        TileKind::HorizontalCrossing => '┿',
    }
}

/// One line per grid row.
pub fn render_to_string(grid: &Grid<Cell>) -> String {
    let mut output = String::with_capacity(grid.size() * 4 + grid.rows());

    for (_, column, cell) in grid {
        output.push(glyph(cell));

        if column + 1 == grid.columns() {
            output.push('\n');
        }
    }

    output
}

/// Draws the grid with box-drawing characters, optionally after every step.
pub struct TextRenderer<W: Write> {
    out: W,
    animate: bool,
    drawn_rows: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, animate: bool) -> Self {
        Self {
            out,
            animate,
            drawn_rows: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, grid: &Grid<Cell>) -> Result<(), String> {
        // redraw in place over the previous frame
        if self.animate && self.drawn_rows > 0 {
            write!(self.out, "\x1b[{}A", self.drawn_rows).map_err(|e| e.to_string())?;
        }

        self.out
            .write_all(render_to_string(grid).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| format!("Failed to write grid: {}", e))?;

        self.drawn_rows = grid.rows();

        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = String;

    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error> {
        if let RenderEvent::Started { generation } = event {
            self.drawn_rows = 0;

            // keep consecutive patterns apart
            if *generation > 1 {
                writeln!(self.out).map_err(|e| format!("Failed to write grid: {}", e))?;
            }
        }

        Ok(())
    }

    fn update(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error> {
        if self.animate {
            self.draw(grid)?;
        }

        Ok(())
    }

    fn finalize(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error> {
        self.draw(grid)?;

        if !self.animate {
            self.drawn_rows = 0;
        }

        Ok(())
    }
}
