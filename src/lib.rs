//! Knot and pipe patterns from a step-wise, simplified wave function collapse.
//!
//! A [`Grid`] of [`Cell`]s starts with every [`TileKind`] of a [`TileSet`]
//! possible. Each [`Solver::step`] takes the first uncollapsed cell in
//! row-major order, keeps the tiles that fit the grid edge and the
//! neighbours resolved so far, and picks one of them at random.
//!
//! ```
//! use knot_wfc::{Grid, Solver, TileSet};
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//!
//! let tiles = TileSet::new();
//! let mut grid = Grid::create(6, 8, &tiles);
//! let mut rng = XorShiftRng::seed_from_u64(7);
//!
//! assert_eq!(Solver::new().run(&mut grid, &mut rng), 48);
//! assert!(grid.is_fully_collapsed());
//! ```

pub mod cell;
pub mod grid;
pub mod render;
pub mod solver;
pub mod tile;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;

pub use cell::{Cell, Constraint};
pub use grid::{Direction, Grid, Neighbors, Position, Size};
pub use solver::{Solver, SolverState, Step};
pub use tile::{TileKind, TileSet};
