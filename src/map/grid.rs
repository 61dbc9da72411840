//! Row-major tile grid implementing the pathfinding grid surfaces

use crate::config::range_types::MovementModifier;
use crate::errors::{GridSightError, GridSightResult};
use crate::pathfinding::{GridAdapter, SearchGrid};
use bevy::prelude::*;

/// A single grid cell and how hard it is to cross
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tile {
    pub movement_modifier: MovementModifier,
}

impl Tile {
    pub fn new(movement_modifier: f32) -> Self {
        Self {
            movement_modifier: MovementModifier::new(movement_modifier),
        }
    }

    pub fn passable() -> Self {
        Self {
            movement_modifier: MovementModifier::NORMAL,
        }
    }

    pub fn impassable() -> Self {
        Self {
            movement_modifier: MovementModifier::IMPASSABLE,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.movement_modifier.is_passable()
    }
}

/// Grid of tiles where index 0 is (0, 0), index 1 is (1, 0), and so on
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, tiles: Vec<Tile>) -> GridSightResult<Self> {
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(GridSightError::InvalidMapData {
                reason: format!(
                    "Tile count {} does not match grid dimensions {}x{} (expected {})",
                    tiles.len(),
                    width,
                    height,
                    expected
                ),
            });
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Grid where every cell holds `tile`
    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Replace the tile at `cell`; returns false when the cell is outside the grid
    pub fn set_tile(&mut self, cell: IVec2, tile: Tile) -> bool {
        match self.index_of(cell.x, cell.y) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_passable()).count()
    }
}

impl GridAdapter for TileGrid {
    fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index_of(x, y).map(|index| &self.tiles[index])
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

impl SearchGrid for TileGrid {}
