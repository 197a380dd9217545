use super::{RenderEvent, Renderer};
use crate::cell::Cell;
use crate::grid::Grid;
use crate::tile::TileKind;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use log::info;
use std::path::PathBuf;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BORDER: Rgba<u8> = Rgba([220, 220, 220, 255]);
const LINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Segment in cell-local coordinates, both axes in `0.0..=1.0`.
pub type Segment = ((f32, f32), (f32, f32));

/// Line segments drawn for `tile`. Crossings leave a gap in the middle
/// third of the line that passes underneath.
pub fn tile_segments(tile: TileKind) -> Vec<Segment> {
    const MID: f32 = 0.5;
    const THIRD: f32 = 1.0 / 3.0;
    const TWO_THIRDS: f32 = 2.0 / 3.0;

    let up = ((MID, 0.0), (MID, MID));
    let down = ((MID, 1.0), (MID, MID));
    let left = ((0.0, MID), (MID, MID));
    let right = ((1.0, MID), (MID, MID));
    let vertical = ((MID, 1.0), (MID, 0.0));
    let horizontal = ((1.0, MID), (0.0, MID));

    match tile {
        TileKind::Blank => vec![],
        TileKind::TopRightTurn => vec![up, right],
        TileKind::TopLeftTurn => vec![up, left],
        TileKind::BottomRightTurn => vec![down, right],
        TileKind::BottomLeftTurn => vec![down, left],
        TileKind::Vertical => vec![vertical],
        TileKind::Horizontal => vec![horizontal],
        TileKind::VerticalCrossing => vec![
            vertical,
            ((THIRD, MID), (0.0, MID)),
            ((1.0, MID), (TWO_THIRDS, MID)),
        ],
        TileKind::HorizontalCrossing => vec![
            horizontal,
            ((MID, THIRD), (MID, 0.0)),
            ((MID, 1.0), (MID, TWO_THIRDS)),
        ],
    }
}

/// Writes the finished grid to a PNG, `resolution` pixels per cell.
pub struct ImageRenderer {
    output_path: PathBuf,
    resolution: u32,
    generation: usize,
}

impl ImageRenderer {
    pub fn new(output_path: PathBuf, resolution: u32) -> Result<Self, String> {
        if resolution < 3 {
            return Err(format!("Resolution must be at least 3 pixels, got {}", resolution));
        }

        Ok(Self {
            output_path,
            resolution,
            generation: 0,
        })
    }

    pub fn draw(&self, grid: &Grid<Cell>) -> RgbaImage {
        let size = self.resolution;
        let mut canvas = RgbaImage::from_pixel(
            grid.columns() as u32 * size,
            grid.rows() as u32 * size,
            BACKGROUND,
        );

        for (row, column, cell) in grid {
            // contradictions leave a gap
            if cell.is_contradiction() {
                continue;
            }

            let x = column as u32 * size;
            let y = row as u32 * size;

            draw_hollow_rect_mut(
                &mut canvas,
                Rect::at(x as i32, y as i32).of_size(size, size),
                BORDER,
            );

            if let Some(tile) = cell.resolved() {
                for (start, end) in tile_segments(tile) {
                    self.stroke(&mut canvas, (x, y), start, end);
                }
            }
        }

        canvas
    }

    // two pixels wide
    fn stroke(&self, canvas: &mut RgbaImage, origin: (u32, u32), start: (f32, f32), end: (f32, f32)) {
        let scale = (self.resolution - 1) as f32;
        let to_canvas = |(px, py): (f32, f32), offset: f32| {
            (
                origin.0 as f32 + px * scale + if start.0 == end.0 { offset } else { 0.0 },
                origin.1 as f32 + py * scale + if start.1 == end.1 { offset } else { 0.0 },
            )
        };

        for offset in [0.0, 1.0] {
            draw_line_segment_mut(canvas, to_canvas(start, offset), to_canvas(end, offset), LINE);
        }
    }

    fn path_for(&self, generation: usize) -> PathBuf {
        if generation <= 1 {
            return self.output_path.clone();
        }

        let stem = self
            .output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = self
            .output_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "png".to_string());

        self.output_path
            .with_file_name(format!("{}-{}.{}", stem, generation, extension))
    }
}

impl Renderer for ImageRenderer {
    type Error = String;

    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error> {
        if let RenderEvent::Started { generation } = event {
            self.generation = *generation;
        }

        Ok(())
    }

    fn finalize(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error> {
        if grid.size() == 0 {
            return Err("Cannot save an empty grid".to_string());
        }

        let path = self.path_for(self.generation);

        self.draw(grid)
            .save(&path)
            .map_err(|e| format!("Failed to save image: {}", e))?;

        info!("Saved {}", path.display());

        Ok(())
    }
}
