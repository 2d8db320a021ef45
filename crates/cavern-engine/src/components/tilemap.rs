//! Collision layer for grid-based maps.
//!
//! A `CollisionMap` stores a bounded grid of optional tiles and answers
//! [`TileQuery`] lookups for the movement system. Everything outside the
//! grid reads as empty, so entities can wander off the map edge without the
//! query failing.

use glam::Vec2;

use crate::core::constants::CELL_SIZE;
use crate::core::physics::{Tile, TileQuery};

/// Glyph for a solid tile in ASCII layouts.
pub const SOLID_GLYPH: char = '#';
/// Glyph for a tile that exists but does not block (background decoration).
pub const PASSABLE_GLYPH: char = '-';

/// Tiles are stored in row-major order: index = y * width + x
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMap {
    /// Width of the map in cells.
    pub width: u32,
    /// Height of the map in cells.
    pub height: u32,
    tiles: Vec<Option<Tile>>,
}

impl CollisionMap {
    /// Create a new empty map.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![None; count],
        }
    }

    /// Build a map from ASCII rows. `#` is solid, `-` is a passable tile,
    /// any other glyph is empty. Short rows are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut map = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = match glyph {
                    SOLID_GLYPH => Some(Tile::SOLID),
                    PASSABLE_GLYPH => Some(Tile::PASSABLE),
                    _ => None,
                };
                map.set(x as i32, y as i32, tile);
            }
        }
        map
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get a tile at grid position (x, y).
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.tiles[i].as_ref())
    }

    /// Set a tile at grid position (x, y). Out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Option<Tile>) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Fill a rectangular region with a tile.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, tile: Option<Tile>) {
        for ty in y..y + h {
            for tx in x..x + w {
                self.set(tx, ty, tile);
            }
        }
    }

    /// Clear all tiles.
    pub fn clear(&mut self) {
        self.tiles.fill(None);
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Count of tiles that block movement.
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().flatten().filter(|t| t.collides).count()
    }

    /// Convert a world position to the cell containing it.
    /// Unlike lookups, this is unbounded: cells off the map are still cells.
    pub fn world_to_cell(world_pos: Vec2) -> (i32, i32) {
        (
            (world_pos.x / CELL_SIZE).floor() as i32,
            (world_pos.y / CELL_SIZE).floor() as i32,
        )
    }

    /// Top-left corner of a cell in world space.
    pub fn cell_to_world(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * CELL_SIZE, y as f32 * CELL_SIZE)
    }
}

impl TileQuery for CollisionMap {
    fn tile_at(&self, cell_x: i32, cell_y: i32) -> Option<Tile> {
        self.get(cell_x, cell_y).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let map = CollisionMap::new(10, 10);
        assert_eq!(map.tile_count(), 0);
        assert_eq!(map.width, 10);
        assert_eq!(map.height, 10);
    }

    #[test]
    fn set_and_get_tile() {
        let mut map = CollisionMap::new(5, 5);
        map.set(2, 3, Some(Tile::SOLID));
        assert_eq!(map.get(2, 3), Some(&Tile::SOLID));
        assert!(map.collides_at(2, 3));
        assert_eq!(map.tile_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_absent() {
        let mut map = CollisionMap::new(5, 5);
        map.fill_rect(0, 0, 5, 5, Some(Tile::SOLID));
        assert!(map.tile_at(10, 10).is_none());
        assert!(map.tile_at(-1, 0).is_none());
        assert!(map.tile_at(0, -1).is_none());
        assert!(!map.collides_at(i32::MIN, i32::MAX));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut map = CollisionMap::new(10, 10);
        map.fill_rect(8, 8, 5, 5, Some(Tile::SOLID));
        assert_eq!(map.tile_count(), 4);
        map.fill_rect(-2, -2, 3, 3, Some(Tile::SOLID));
        assert_eq!(map.tile_count(), 5);
    }

    #[test]
    fn from_rows_reads_glyphs() {
        let map = CollisionMap::from_rows(&[
            "....",
            ".-..",
            "####",
        ]);
        assert_eq!(map.width, 4);
        assert_eq!(map.height, 3);
        assert_eq!(map.solid_count(), 4);
        assert_eq!(map.tile_count(), 5);
        assert!(map.tile_at(1, 1).is_some());
        assert!(!map.collides_at(1, 1));
        assert!(map.collides_at(3, 2));
    }

    #[test]
    fn world_cell_conversion() {
        assert_eq!(CollisionMap::world_to_cell(Vec2::new(17.0, 8.0)), (2, 1));
        assert_eq!(CollisionMap::world_to_cell(Vec2::new(-1.0, -9.0)), (-1, -2));
        assert_eq!(CollisionMap::cell_to_world(3, 2), Vec2::new(24.0, 16.0));
    }

    #[test]
    fn wide_map_indexes_far_column() {
        let mut map = CollisionMap::new(70_000, 2);
        map.set(69_999, 1, Some(Tile::SOLID));
        assert!(map.collides_at(69_999, 1));
        assert!(!map.collides_at(69_999, 0));
        assert!(!map.collides_at(70_000, 1));
        assert_eq!(map.tile_count(), 1);
    }

    #[test]
    fn clear_removes_all_tiles() {
        let mut map = CollisionMap::new(10, 10);
        map.fill_rect(0, 0, 10, 10, Some(Tile::SOLID));
        assert_eq!(map.tile_count(), 100);

        map.clear();
        assert_eq!(map.tile_count(), 0);
    }
}
