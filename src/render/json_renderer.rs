use super::{RenderEvent, Renderer};
use crate::cell::Cell;
use crate::grid::Grid;
use crate::tile::TileKind;

use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CellSnapshot {
    pub row: usize,
    pub column: usize,
    pub collapsed: bool,
    /// `None` while unresolved or after a contradiction.
    pub tile: Option<TileKind>,
}

#[derive(Debug, Serialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub contradictions: usize,
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid<Cell>) -> Self {
        let cells: Vec<CellSnapshot> = grid
            .iter()
            .map(|(row, column, cell)| CellSnapshot {
                row,
                column,
                collapsed: cell.is_collapsed(),
                tile: cell.resolved(),
            })
            .collect();

        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            contradictions: grid.iter().filter(|(_, _, cell)| cell.is_contradiction()).count(),
            cells,
        }
    }
}

/// Dumps the resolved tile of every cell as JSON once the grid is complete,
/// one array entry per generation.
pub struct JsonRenderer {
    output_path: PathBuf,
    generations: Vec<GridSnapshot>,
}

impl JsonRenderer {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            generations: Vec::new(),
        }
    }

    fn save(&self) -> Result<(), String> {
        let file = File::create(&self.output_path)
            .map_err(|e| format!("Failed to create {}: {}", self.output_path.display(), e))?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &self.generations)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;

        info!("Saved {}", self.output_path.display());

        Ok(())
    }
}

impl Renderer for JsonRenderer {
    type Error = String;

    fn handle_event(&mut self, _event: &RenderEvent) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Rewrites the file after each generation so earlier runs survive an abort.
    fn finalize(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error> {
        self.generations.push(GridSnapshot::capture(grid));
        self.save()
    }
}
