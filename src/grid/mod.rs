use crate::game_logic::errors::{TacticsError, TacticsResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Neighbor search order: forward (+Z), back (-Z), right (+X), left (-X)
const NEIGHBOR_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
];

/// Stable identity of a tile inside a [`TileGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single addressable grid cell
///
/// The display flags (`selectable`, `current`, `target`) are written by the
/// reachability and movement logic and read by rendering. The adjacency list
/// is only written by [`TileGrid::compute_adjacency_lists`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    coord: IVec2,
    center: Vec3,
    half_extents: Vec3,
    pub walkable: bool,
    pub selectable: bool,
    pub current: bool,
    pub target: bool,
    adjacency_list: Vec<TileId>,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> IVec2 {
        self.coord
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Height of the walkable top face
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Where a unit with the given half height stands when centred on this tile
    pub fn standing_point(&self, unit_half_height: f32) -> Vec3 {
        let mut point = self.center;
        point.y += unit_half_height + self.half_extents.y;
        point
    }

    pub fn adjacency_list(&self) -> &[TileId] {
        &self.adjacency_list
    }

    /// Return flags and adjacency to their freshly-constructed state
    pub fn reset(&mut self) {
        self.adjacency_list.clear();
        self.selectable = false;
        self.current = false;
        self.target = false;
    }

    /// Ray/box slab test; returns the distance along the ray to the entry point
    fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            if d.abs() < f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - o) / d;
            let t2 = (max[axis] - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Tile storage with a grid-coordinate spatial index
#[derive(Debug, Clone, Resource)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    index: HashMap<IVec2, TileId>,
    cell_size: f32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TileGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            tiles: Vec::new(),
            index: HashMap::new(),
            cell_size,
        }
    }

    /// Flat rectangular grid of tiles whose top faces sit at `top_height`
    pub fn flat(width: i32, depth: i32, top_height: f32) -> TacticsResult<Self> {
        let mut grid = Self::default();
        for z in 0..depth {
            for x in 0..width {
                grid.insert_tile(IVec2::new(x, z), top_height, 0.5, true)?;
            }
        }
        Ok(grid)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Add a tile whose top face sits at `top_height`
    pub fn insert_tile(
        &mut self,
        coord: IVec2,
        top_height: f32,
        half_height: f32,
        walkable: bool,
    ) -> TacticsResult<TileId> {
        if self.index.contains_key(&coord) {
            return Err(TacticsError::DuplicateTile {
                x: coord.x,
                z: coord.y,
            });
        }

        let id = TileId(self.tiles.len() as u32);
        let center = Vec3::new(
            coord.x as f32 * self.cell_size,
            top_height - half_height,
            coord.y as f32 * self.cell_size,
        );
        self.tiles.push(Tile {
            id,
            coord,
            center,
            half_extents: Vec3::new(self.cell_size / 2.0, half_height, self.cell_size / 2.0),
            walkable,
            selectable: false,
            current: false,
            target: false,
            adjacency_list: Vec::new(),
        });
        self.index.insert(coord, id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_at(&self, coord: IVec2) -> Option<TileId> {
        self.index.get(&coord).copied()
    }

    pub fn world_to_coord(&self, position: Vec3) -> IVec2 {
        IVec2::new(
            (position.x / self.cell_size).round() as i32,
            (position.z / self.cell_size).round() as i32,
        )
    }

    /// Tile directly below `position` whose top face is no more than
    /// `max_distance` beneath it
    pub fn tile_under(&self, position: Vec3, max_distance: f32) -> Option<TileId> {
        let id = self.tile_at(self.world_to_coord(position))?;
        let gap = position.y - self.tile(id)?.top();
        (0.0..=max_distance).contains(&gap).then_some(id)
    }

    /// Orthogonal walkable neighbors whose top faces are within `jump_height`
    pub fn find_neighbors(&self, id: TileId, jump_height: f32) -> Vec<TileId> {
        let Some(tile) = self.tile(id) else {
            return Vec::new();
        };

        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| self.tile_at(tile.coord + *offset))
            .filter(|neighbor_id| {
                self.tile(*neighbor_id).is_some_and(|neighbor| {
                    neighbor.walkable && (neighbor.top() - tile.top()).abs() <= jump_height
                })
            })
            .collect()
    }

    /// Regenerate every tile's adjacency list for the given height tolerance
    pub fn compute_adjacency_lists(&mut self, jump_height: f32) {
        let lists: Vec<Vec<TileId>> = self
            .tiles
            .iter()
            .map(|tile| self.find_neighbors(tile.id, jump_height))
            .collect();

        for (tile, list) in self.tiles.iter_mut().zip(lists) {
            tile.adjacency_list = list;
        }
    }

    /// Nearest tile hit by a ray (pointer picking)
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<TileId> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        self.tiles
            .iter()
            .filter_map(|tile| tile.ray_entry(origin, direction).map(|t| (t, tile.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
    }
}
