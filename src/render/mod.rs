pub mod events;
pub mod text_renderer;

#[cfg(feature = "image")]
pub mod image_renderer;

#[cfg(feature = "json")]
pub mod json_renderer;

use crate::cell::Cell;
use crate::grid::Grid;

pub use events::RenderEvent;

/// Read-only consumer of solver state.
pub trait Renderer {
    type Error;

    /// Handle a render event during generation
    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error>;

    /// Called after every solver step
    fn update(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error> {
        let _ = grid;
        Ok(())
    }

    /// Called once the grid is complete
    fn finalize(&mut self, grid: &Grid<Cell>) -> Result<(), Self::Error>;
}
