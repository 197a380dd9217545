use std::fmt;

use enum_map::{enum_map, EnumMap};

use crate::grid::Direction;

/// Line tile drawn inside a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum TileKind {
    Blank,
    TopRightTurn,
    TopLeftTurn,
    BottomRightTurn,
    BottomLeftTurn,
    Vertical,
    Horizontal,
    /// Vertical line passing over a horizontal one.
    VerticalCrossing,
    /// Horizontal line passing over a vertical one.
    HorizontalCrossing,
}

impl TileKind {
    /// Whether a line leaves the tile through each side.
    pub fn connectors(&self) -> EnumMap<Direction, bool> {
        let (up, right, down, left) = match self {
            TileKind::Blank => (false, false, false, false),
            TileKind::TopRightTurn => (true, true, false, false),
            TileKind::TopLeftTurn => (true, false, false, true),
            TileKind::BottomRightTurn => (false, true, true, false),
            TileKind::BottomLeftTurn => (false, false, true, true),
            TileKind::Vertical => (true, false, true, false),
            TileKind::Horizontal => (false, true, false, true),
            TileKind::VerticalCrossing | TileKind::HorizontalCrossing => (true, true, true, true),
        };

        enum_map! {
            Direction::Up => up,
            Direction::Right => right,
            Direction::Down => down,
            Direction::Left => left,
        }
    }

    pub fn connector(&self, side: Direction) -> bool {
        self.connectors()[side]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileKind::Blank => "blank",
            TileKind::TopRightTurn => "top-right-turn",
            TileKind::TopLeftTurn => "top-left-turn",
            TileKind::BottomRightTurn => "bottom-right-turn",
            TileKind::BottomLeftTurn => "bottom-left-turn",
            TileKind::Vertical => "vertical",
            TileKind::Horizontal => "horizontal",
            TileKind::VerticalCrossing => "vertical-crossing",
            TileKind::HorizontalCrossing => "horizontal-crossing",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed, unweighted tile catalog every cell starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    variants: Vec<TileKind>,
}

impl TileSet {
    pub fn new() -> Self {
        Self {
            variants: vec![
                TileKind::Blank,
                TileKind::TopRightTurn,
                TileKind::TopLeftTurn,
                TileKind::BottomRightTurn,
                TileKind::BottomLeftTurn,
                TileKind::Vertical,
                TileKind::Horizontal,
                TileKind::VerticalCrossing,
                TileKind::HorizontalCrossing,
            ],
        }
    }

    pub fn variants(&self) -> &[TileKind] {
        &self.variants
    }

    pub fn connector(&self, tile: TileKind, side: Direction) -> bool {
        tile.connector(side)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}
