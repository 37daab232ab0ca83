//! Tile data model: pair values, their colors, and grid placement.
//!
//! This module contains:
//! - The eight pair values and the palette used to paint them
//! - The per-tile record (pair value + lock flag)
//! - The fixed 2 x 8 grid layout used by renderers

use serde::{Deserialize, Serialize};

/// Tile identifier (0-15 on the fixed board)
pub type TileIndex = usize;

/// Number of tiles on the board
pub const TILE_COUNT: usize = 16;

/// Number of distinct pairs on the board
pub const PAIR_COUNT: usize = TILE_COUNT / 2;

/// Symbolic value shared by exactly two tiles.
///
/// Each value is rendered with its own color when revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PairValue {
    Red,
    Blue,
    Green,
    Yellow,
    Magenta,
    Cyan,
    Gray,
    Teal,
}

impl PairValue {
    /// All pair values
    pub const ALL: [PairValue; PAIR_COUNT] = [
        PairValue::Red,
        PairValue::Blue,
        PairValue::Green,
        PairValue::Yellow,
        PairValue::Magenta,
        PairValue::Cyan,
        PairValue::Gray,
        PairValue::Teal,
    ];

    /// Color shown while a tile with this value is face up
    pub fn color(&self) -> Color {
        match self {
            PairValue::Red => Color::rgb(1.0, 0.0, 0.0),
            PairValue::Blue => Color::rgb(0.0, 0.0, 1.0),
            PairValue::Green => Color::rgb(0.0, 1.0, 0.0),
            PairValue::Yellow => Color::rgb(1.0, 0.92, 0.016),
            PairValue::Magenta => Color::rgb(1.0, 0.0, 1.0),
            PairValue::Cyan => Color::rgb(0.0, 1.0, 1.0),
            PairValue::Gray => Color::rgb(0.5, 0.5, 0.5),
            PairValue::Teal => Color::rgb(0.0, 0.5, 0.5),
        }
    }

    /// Single-letter tag for text renderers
    pub fn symbol(&self) -> char {
        match self {
            PairValue::Red => 'R',
            PairValue::Blue => 'B',
            PairValue::Green => 'G',
            PairValue::Yellow => 'Y',
            PairValue::Magenta => 'M',
            PairValue::Cyan => 'C',
            PairValue::Gray => 'A',
            PairValue::Teal => 'T',
        }
    }
}

/// RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Color of a face-down tile
    pub const NEUTRAL: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// A single selectable cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Value shared with exactly one other tile
    pub pair_value: PairValue,
    /// Set once the tile is part of a confirmed match; never cleared
    pub locked: bool,
}

impl Tile {
    pub fn new(pair_value: PairValue) -> Self {
        Self {
            pair_value,
            locked: false,
        }
    }
}

/// Placement of tiles in world space.
///
/// Tiles are laid out in two rows of eight, `spacing` apart, starting at `base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileLayout {
    pub base: [f32; 3],
    pub spacing: f32,
    pub columns: usize,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            base: [8.0, 0.5, 24.0],
            spacing: 2.0,
            columns: 8,
        }
    }
}

impl TileLayout {
    /// Grid cell (row, column) of a tile
    pub fn cell(&self, index: TileIndex) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// World position of a tile's center
    pub fn position(&self, index: TileIndex) -> [f32; 3] {
        let (row, col) = self.cell(index);
        [
            self.base[0] + col as f32 * self.spacing,
            self.base[1],
            self.base[2] + row as f32 * self.spacing,
        ]
    }
}
