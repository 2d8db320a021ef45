use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::tilemap::{CollisionMap, PASSABLE_GLYPH, SOLID_GLYPH};
use crate::core::constants::CELL_SIZE;
use crate::core::physics::{PhysicsBody, Tile};

/// Glyph marking the player spawn. Exactly one per level.
pub const PLAYER_GLYPH: char = 'P';
/// Glyph marking a slime spawn.
pub const SLIME_GLYPH: char = 's';
/// Glyphs for empty cells.
pub const EMPTY_GLYPHS: [char; 2] = ['.', ' '];

/// Level layout as shipped next to a game, loaded from JSON.
///
/// ```json
/// { "name": "cavern", "rows": ["#....#", "#P.s.#", "######"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub name: String,
    /// One string per map row, top to bottom. All rows share one width.
    pub rows: Vec<String>,
}

/// Level loading errors
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level has no rows")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("level has no player spawn")]
    MissingPlayerSpawn,

    #[error("second player spawn at ({x}, {y})")]
    DuplicatePlayerSpawn { x: usize, y: usize },
}

/// A parsed level: the collision grid plus where things start.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub map: CollisionMap,
    /// Player spawn cell (column, row).
    pub player_spawn: (i32, i32),
    /// Slime spawn cells in reading order.
    pub slime_spawns: Vec<(i32, i32)>,
}

impl LevelDescriptor {
    /// Parse a level descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Self {
        Self {
            name: name.into(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Validate the layout and split it into collision tiles and spawns.
    pub fn build(&self) -> Result<Level, LevelError> {
        let width = self.rows.first().ok_or(LevelError::Empty)?.chars().count();
        if width == 0 {
            return Err(LevelError::Empty);
        }

        let mut map = CollisionMap::new(width as u32, self.rows.len() as u32);
        let mut player_spawn = None;
        let mut slime_spawns = Vec::new();

        for (y, row) in self.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow { row: y, expected: width, found });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = (x as i32, y as i32);
                match glyph {
                    SOLID_GLYPH => map.set(cell.0, cell.1, Some(Tile::SOLID)),
                    PASSABLE_GLYPH => map.set(cell.0, cell.1, Some(Tile::PASSABLE)),
                    PLAYER_GLYPH => {
                        if player_spawn.replace(cell).is_some() {
                            return Err(LevelError::DuplicatePlayerSpawn { x, y });
                        }
                    }
                    SLIME_GLYPH => slime_spawns.push(cell),
                    g if EMPTY_GLYPHS.contains(&g) => {}
                    glyph => return Err(LevelError::UnknownGlyph { glyph, x, y }),
                }
            }
        }

        let player_spawn = player_spawn.ok_or(LevelError::MissingPlayerSpawn)?;
        log::info!(
            "level '{}' loaded: {}x{}, {} solid tiles, {} slimes",
            self.name,
            map.width,
            map.height,
            map.solid_count(),
            slime_spawns.len()
        );

        Ok(Level {
            name: self.name.clone(),
            map,
            player_spawn,
            slime_spawns,
        })
    }
}

impl Level {
    /// Body resting at the top-left of a spawn cell.
    pub fn spawn_body(cell: (i32, i32)) -> PhysicsBody {
        PhysicsBody::new(cell.0, cell.1 as f32 * CELL_SIZE)
    }
}
