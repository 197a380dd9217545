use log::trace;
use rand::Rng;

use crate::grid::{Direction, Neighbors};
use crate::tile::{TileKind, TileSet};

/// Requirement one side of a cell places on its tile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Outside the grid; no line may leave through this side.
    Boundary,
    /// The neighbour is not resolved yet, or collapsed without a tile.
    #[default]
    Free,
    /// The neighbour's connector on the shared edge.
    Connector(bool),
}

impl Constraint {
    pub fn admits(&self, tile: TileKind, side: Direction) -> bool {
        match self {
            Constraint::Boundary => !tile.connector(side),
            Constraint::Free => true,
            Constraint::Connector(open) => tile.connector(side) == *open,
        }
    }
}

/// Possibility state of one grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    options: Vec<TileKind>,
    collapsed: bool,
}

impl Cell {
    pub fn new(row: usize, column: usize, tiles: &TileSet) -> Self {
        Self {
            row,
            column,
            options: tiles.variants().to_vec(),
            collapsed: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn options(&self) -> &[TileKind] {
        &self.options
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Number of remaining options. Cell selection never looks at it.
    pub fn entropy(&self) -> usize {
        self.options.len()
    }

    /// The tile this cell settled on, if it collapsed to one.
    pub fn resolved(&self) -> Option<TileKind> {
        match (self.collapsed, self.options.as_slice()) {
            (true, [tile]) => Some(*tile),
            _ => None,
        }
    }

    /// Collapsed with nothing left to draw.
    pub fn is_contradiction(&self) -> bool {
        self.collapsed && self.options.is_empty()
    }

    /// Drops every option that some side rejects. Sides are filtered independently.
    pub fn recompute_options(&mut self, constraints: &Neighbors<Constraint>) {
        let before = self.options.len();

        for (side, constraint) in constraints {
            self.options.retain(|tile| constraint.admits(*tile, side));
        }

        trace!(
            "({}, {}) options {} -> {}",
            self.row,
            self.column,
            before,
            self.options.len()
        );
    }

    /// Picks one remaining option at random. The cell counts as collapsed
    /// afterwards even when no option was left.
    pub fn collapse<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.options.len() > 1 {
            let choice = rng.gen_range(0..self.options.len());
            self.options = vec![self.options[choice]];
        }

        self.collapsed = true;
    }
}
