use core::str::FromStr;

use enum_map::{enum_map, Enum, EnumMap};

use crate::cell::{Cell, Constraint};
use crate::tile::TileSet;

/// `(row, column)`
pub type Position = (usize, usize);

/// Per-side values of a cell, indexed by [`Direction`].
pub type Neighbors<T> = EnumMap<Direction, T>;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn invert(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Grid extent as given on the command line, `<columns>x<rows>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_width, raw_height) = s.split_once('x').ok_or(format!("invalid format: {}", s))?;

        let width = raw_width
            .parse::<usize>()
            .map_err(|_| format!("invalid width: {}", raw_width))?;
        let height = raw_height
            .parse::<usize>()
            .map_err(|_| format!("invalid height: {}", raw_height))?;

        Ok(Size { width, height })
    }
}

/// Fixed-size row-major 2D storage.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    columns: usize,
}

pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    pos: usize,
}

impl<T> Grid<T> {
    pub fn new<F: FnMut(usize, usize) -> T>(rows: usize, columns: usize, initializer: &mut F) -> Self {
        let mut data = Vec::with_capacity(rows * columns);

        for row in 0..rows {
            for column in 0..columns {
                data.push(initializer(row, column));
            }
        }

        Self {
            data,
            rows,
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter { grid: self, pos: 0 }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            None
        } else {
            Some(column + row * self.columns)
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.data.get(self.index(row, column)?)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        let index = self.index(row, column)?;

        self.data.get_mut(index)
    }

    pub fn set(&mut self, row: usize, column: usize, value: T) -> Result<(), &'static str> {
        let index = self.index(row, column).ok_or("Cell out of range")?;

        self.data[index] = value;

        Ok(())
    }

    /// Position next to `(row, column)`, `None` past the edge. There is no wraparound.
    pub fn neighbor_position(&self, row: usize, column: usize, direction: Direction) -> Option<Position> {
        let position = match direction {
            Direction::Up => {
                if row == 0 {
                    None
                } else {
                    Some((row - 1, column))
                }
            }
            Direction::Down => {
                if row + 1 >= self.rows {
                    None
                } else {
                    Some((row + 1, column))
                }
            }
            Direction::Left => {
                if column == 0 {
                    None
                } else {
                    Some((row, column - 1))
                }
            }
            Direction::Right => {
                if column + 1 >= self.columns {
                    None
                } else {
                    Some((row, column + 1))
                }
            }
        }?;

        self.index(position.0, position.1).map(|_| position)
    }

    pub fn neighbor(&self, row: usize, column: usize, direction: Direction) -> Option<&T> {
        let (row, column) = self.neighbor_position(row, column, direction)?;

        self.get(row, column)
    }

    pub fn neighbors(&self, row: usize, column: usize) -> Neighbors<Option<&T>> {
        enum_map! {
            direction => self.neighbor(row, column, direction),
        }
    }
}

impl Grid<Cell> {
    /// Fresh grid where every cell may still be any tile of `tiles`.
    pub fn create(rows: usize, columns: usize, tiles: &TileSet) -> Self {
        Grid::new(rows, columns, &mut |row, column| Cell::new(row, column, tiles))
    }

    pub fn is_fully_collapsed(&self) -> bool {
        self.data.iter().all(Cell::is_collapsed)
    }

    /// Cells still waiting to be collapsed.
    pub fn remaining(&self) -> usize {
        self.data.iter().filter(|cell| !cell.is_collapsed()).count()
    }

    /// What each side of `(row, column)` demands from the tile placed there.
    pub fn constraints(&self, row: usize, column: usize) -> Neighbors<Constraint> {
        enum_map! {
            direction => match self.neighbor(row, column, direction) {
                None => Constraint::Boundary,
                Some(cell) => match cell.resolved() {
                    Some(tile) => Constraint::Connector(tile.connector(direction.invert())),
                    None => Constraint::Free,
                },
            },
        }
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (usize, usize, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.grid.data.len() {
            None
        } else {
            let row = self.pos / self.grid.columns;
            let column = self.pos % self.grid.columns;
            let value = &self.grid.data[self.pos];

            self.pos += 1;

            Some((row, column, value))
        }
    }
}
