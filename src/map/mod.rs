use crate::game_logic::errors::{TacticsError, TacticsResult};
use crate::grid::TileGrid;
use bevy::prelude::*;
use ::pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationErrors};

/// Persisted tile layout and unit spawn for one battlefield
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Resource)]
pub struct GridMapDefinition {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(range(min = 0.25, max = 16.0))]
    pub cell_size: f32, // World units per grid cell
    #[validate(range(min = 0.05, max = 8.0))]
    pub tile_half_height: f32,
    #[validate(length(min = 1, max = 65536))]
    pub tiles: Vec<TileDefinition>,
    pub unit_spawn: [i32; 2],
}

/// One column of the battlefield; `height` is the top face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct TileDefinition {
    pub x: i32,
    pub z: i32,
    #[validate(range(min = -100.0, max = 100.0))]
    pub height: f32,
    pub walkable: bool,
}

impl TileDefinition {
    pub fn new(x: i32, z: i32, height: f32, walkable: bool) -> Self {
        Self {
            x,
            z,
            height,
            walkable,
        }
    }

    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.x, self.z)
    }
}

fn describe(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("{field}: {}", error_msgs.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}

impl GridMapDefinition {
    /// Create a new map definition with validation
    pub fn new(
        name: String,
        cell_size: f32,
        tile_half_height: f32,
        tiles: Vec<TileDefinition>,
        unit_spawn: IVec2,
    ) -> TacticsResult<Self> {
        let map = Self {
            name,
            cell_size,
            tile_half_height,
            tiles,
            unit_spawn: unit_spawn.to_array(),
        };
        map.check()?;
        Ok(map)
    }

    /// Field ranges, per-tile ranges, unique coordinates and a walkable spawn tile
    pub fn check(&self) -> TacticsResult<()> {
        self.validate().map_err(|e| TacticsError::MapValidationFailed {
            reason: describe(&e),
        })?;

        let mut seen = HashSet::new();
        for tile in &self.tiles {
            tile.validate().map_err(|e| TacticsError::MapValidationFailed {
                reason: format!("tile ({}, {}): {}", tile.x, tile.z, describe(&e)),
            })?;
            if !seen.insert(tile.coord()) {
                return Err(TacticsError::DuplicateTile {
                    x: tile.x,
                    z: tile.z,
                });
            }
        }

        let spawn = self.spawn_coord();
        match self.tile(spawn) {
            Some(tile) if tile.walkable => Ok(()),
            Some(_) => Err(TacticsError::InvalidMapData {
                reason: format!("spawn tile ({}, {}) is not walkable", spawn.x, spawn.y),
            }),
            None => Err(TacticsError::InvalidMapData {
                reason: format!("no tile at spawn ({}, {})", spawn.x, spawn.y),
            }),
        }
    }

    pub fn spawn_coord(&self) -> IVec2 {
        IVec2::from_array(self.unit_spawn)
    }

    pub fn tile(&self, coord: IVec2) -> Option<&TileDefinition> {
        self.tiles.iter().find(|t| t.coord() == coord)
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.walkable).count()
    }

    /// Lowest and highest tile tops
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.tiles.iter().map(|t| t.height).fold(None, |acc, h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Get the maps directory path
    pub fn get_maps_dir() -> TacticsResult<PathBuf> {
        std::env::current_dir()
            .map(|dir| dir.join("maps"))
            .map_err(|source| TacticsError::MapIo {
                path: PathBuf::from("maps"),
                source,
            })
    }

    /// Load a map from the maps directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> TacticsResult<Self> {
        Self::load_from_path(Self::get_maps_dir()?.join(filename))
    }

    pub fn load_from_path<P: AsRef<Path>>(file_path: P) -> TacticsResult<Self> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            return Err(TacticsError::MapFileNotFound {
                path: file_path.to_path_buf(),
            });
        }

        let data = std::fs::read(file_path).map_err(|source| TacticsError::MapIo {
            path: file_path.to_path_buf(),
            source,
        })?;
        let (map, _): (GridMapDefinition, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                TacticsError::CorruptedMapFile {
                    reason: format!("Failed to deserialize map data: {e}"),
                }
            })?;

        map.check()?;
        Ok(map)
    }

    /// Save the map to the maps directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> TacticsResult<PathBuf> {
        let file_path = Self::get_maps_dir()?.join(filename);
        self.save_to_path(&file_path)?;
        Ok(file_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, file_path: P) -> TacticsResult<()> {
        self.check()?;

        let file_path = file_path.as_ref();
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| TacticsError::MapIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data =
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                TacticsError::InvalidMapData {
                    reason: format!("Failed to serialize map: {e}"),
                }
            })?;

        std::fs::write(file_path, data).map_err(|source| TacticsError::MapIo {
            path: file_path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Build the runtime grid for this map
    pub fn to_tile_grid(&self) -> TacticsResult<TileGrid> {
        let mut grid = TileGrid::new(self.cell_size);
        for tile in &self.tiles {
            grid.insert_tile(tile.coord(), tile.height, self.tile_half_height, tile.walkable)?;
        }
        Ok(grid)
    }

    /// Every coordinate connected to the spawn when steps up to `jump_height` are allowed
    pub fn reachable_from_spawn(&self, jump_height: f32) -> HashSet<IVec2> {
        let by_coord: HashMap<IVec2, &TileDefinition> =
            self.tiles.iter().map(|t| (t.coord(), t)).collect();
        let spawn = self.spawn_coord();
        if !by_coord.get(&spawn).is_some_and(|t| t.walkable) {
            return HashSet::new();
        }

        bfs_reach(spawn, |coord| {
            let here = by_coord.get(coord).map_or(0.0, |t| t.height);
            [IVec2::Y, IVec2::NEG_Y, IVec2::X, IVec2::NEG_X]
                .into_iter()
                .map(|offset| *coord + offset)
                .filter(|next| {
                    by_coord
                        .get(next)
                        .is_some_and(|t| t.walkable && (t.height - here).abs() <= jump_height)
                })
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// Built-in arena used when no map file is configured
    ///
    /// An 8x8 floor with a staircase, a platform reachable with a 2.0 jump,
    /// a pillar too tall to climb and one blocked tile.
    pub fn demo() -> Self {
        let mut tiles = Vec::new();
        for z in 0..8 {
            for x in 0..8 {
                let height = match (x, z) {
                    (3, 2) => 0.5,
                    (4, 2) => 1.0,
                    (5, 2) => 1.5,
                    (5..=6, 4..=5) => 2.0,
                    (1, 5) => 4.0,
                    _ => 0.0,
                };
                tiles.push(TileDefinition::new(x, z, height, (x, z) != (2, 2)));
            }
        }

        Self {
            name: "Demo Arena".to_string(),
            cell_size: 1.0,
            tile_half_height: 0.5,
            tiles,
            unit_spawn: [0, 0],
        }
    }
}
