use log::{debug, trace};
use rand::Rng;

use crate::cell::Cell;
use crate::grid::Grid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    #[default]
    Incomplete,
    Complete,
}

/// Outcome of a single [`Solver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A cell was collapsed and more are waiting.
    Continue,
    /// Every cell is collapsed.
    Done,
}

/// Collapses one cell per step, always the first uncollapsed cell in
/// row-major order. Only already resolved neighbours constrain it and
/// nothing is revisited, so a contradiction stays in the grid.
#[derive(Debug, Default, Clone)]
pub struct Solver {
    state: SolverState,
    collapses: usize,
    contradictions: usize,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn done(&self) -> bool {
        self.state == SolverState::Complete
    }

    /// Collapses performed since the last reset.
    pub fn collapses(&self) -> usize {
        self.collapses
    }

    /// Cells that collapsed with no option left since the last reset.
    pub fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// Back to `Incomplete`, for use with a freshly created grid.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn step<R: Rng + ?Sized>(&mut self, grid: &mut Grid<Cell>, rng: &mut R) -> Step {
        let mut pending = grid
            .iter()
            .filter(|(_, _, cell)| !cell.is_collapsed())
            .map(|(row, column, _)| (row, column));

        let next = pending.next();
        let more = pending.next().is_some();

        let Some((row, column)) = next else {
            if self.state != SolverState::Complete {
                debug!("Grid complete after {} collapses", self.collapses);
            }
            self.state = SolverState::Complete;
            return Step::Done;
        };

        let constraints = grid.constraints(row, column);

        if let Some(cell) = grid.get_mut(row, column) {
            cell.recompute_options(&constraints);
            cell.collapse(rng);

            match cell.resolved() {
                Some(tile) => trace!("({}, {}) -> {}", row, column, tile),
                None => {
                    self.contradictions += 1;
                    debug!("({}, {}) collapsed without a tile", row, column);
                }
            }
        }

        self.collapses += 1;

        if more {
            self.state = SolverState::Incomplete;
            Step::Continue
        } else {
            debug!("Grid complete after {} collapses", self.collapses);
            self.state = SolverState::Complete;
            Step::Done
        }
    }

    /// Steps until the grid is complete and returns how many cells were collapsed.
    pub fn run<R: Rng + ?Sized>(&mut self, grid: &mut Grid<Cell>, rng: &mut R) -> usize {
        let start = self.collapses;

        while self.step(grid, rng) == Step::Continue {}

        self.collapses - start
    }
}
