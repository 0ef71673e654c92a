use crate::grid::{TileGrid, TileId};
use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

pub mod traversal;

pub use traversal::TraversalSequence;

/// Configuration for one reachability computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachabilityConfig {
    /// Maximum number of hops from the origin tile
    pub move_budget: u32,
    /// Largest height difference between neighbouring tiles that still connects them
    pub jump_height: f32,
    /// How far below the unit the current-tile search looks
    pub ground_search_distance: f32,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            move_budget: 5,
            jump_height: 2.0,
            ground_search_distance: 1.0,
        }
    }
}

/// BFS scratch state for one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchRecord {
    pub visited: bool,
    pub distance: u32,
    pub parent: Option<TileId>,
}

/// Breadth-first reachability over the tile adjacency graph
///
/// Search state lives here, keyed by tile id, so two units never share
/// scratch data through the grid.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityEngine {
    records: HashMap<TileId, SearchRecord>,
    selectable: Vec<TileId>,
    current_tile: Option<TileId>,
}

impl ReachabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the selectable set around the tile under `unit_position`
    ///
    /// Returns `None` without touching any state when no tile can be resolved
    /// under the unit; the previous selectable set stays as it was.
    pub fn find_selectable_tiles(
        &mut self,
        grid: &mut TileGrid,
        unit_position: Vec3,
        config: &ReachabilityConfig,
    ) -> Option<&[TileId]> {
        let Some(origin) = grid.tile_under(unit_position, config.ground_search_distance) else {
            debug!(
                "No tile under unit at ({:.2}, {:.2}, {:.2}); skipping reachability",
                unit_position.x, unit_position.y, unit_position.z
            );
            return None;
        };

        self.clear_selection(grid);
        grid.compute_adjacency_lists(config.jump_height);

        if let Some(tile) = grid.tile_mut(origin) {
            tile.current = true;
        }
        self.current_tile = Some(origin);

        let mut process = VecDeque::new();
        self.records.insert(
            origin,
            SearchRecord {
                visited: true,
                distance: 0,
                parent: None,
            },
        );
        process.push_back(origin);

        while let Some(id) = process.pop_front() {
            let distance = self.search_record(id).distance;

            let Some(tile) = grid.tile_mut(id) else {
                continue;
            };
            tile.selectable = true;
            self.selectable.push(id);

            // A tile at exactly the budget is reachable but is not expanded
            if distance >= config.move_budget {
                continue;
            }

            for &neighbor in tile.adjacency_list() {
                if self.search_record(neighbor).visited {
                    continue;
                }
                self.records.insert(
                    neighbor,
                    SearchRecord {
                        visited: true,
                        distance: distance + 1,
                        parent: Some(id),
                    },
                );
                process.push_back(neighbor);
            }
        }

        debug!(
            "Reachability from tile {}: {} selectable tiles (budget {})",
            origin,
            self.selectable.len(),
            config.move_budget
        );

        Some(self.selectable.as_slice())
    }

    /// Reset every selectable tile, drop the current-tile flag and all search state
    pub fn clear_selection(&mut self, grid: &mut TileGrid) {
        if let Some(current) = self.current_tile.take() {
            if let Some(tile) = grid.tile_mut(current) {
                tile.current = false;
            }
        }

        for id in self.selectable.drain(..) {
            if let Some(tile) = grid.tile_mut(id) {
                tile.reset();
            }
        }

        self.records.clear();
    }

    /// Search state for a tile; tiles the last run never reached report the default record
    pub fn search_record(&self, id: TileId) -> SearchRecord {
        self.records.get(&id).copied().unwrap_or_default()
    }

    pub fn distance(&self, id: TileId) -> Option<u32> {
        self.records.get(&id).map(|record| record.distance)
    }

    pub fn parent(&self, id: TileId) -> Option<TileId> {
        self.records.get(&id).and_then(|record| record.parent)
    }

    pub fn selectable_tiles(&self) -> &[TileId] {
        &self.selectable
    }

    pub fn is_selectable(&self, id: TileId) -> bool {
        self.selectable.contains(&id)
    }

    pub fn current_tile(&self) -> Option<TileId> {
        self.current_tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pathfinding::prelude::dijkstra_all;
    use std::collections::HashSet;

    fn config(move_budget: u32) -> ReachabilityConfig {
        ReachabilityConfig {
            move_budget,
            ..ReachabilityConfig::default()
        }
    }

    fn standing_on(grid: &TileGrid, coord: IVec2) -> Vec3 {
        let id = grid.tile_at(coord).unwrap();
        grid.tile(id).unwrap().standing_point(0.9)
    }

    fn find_from(
        engine: &mut ReachabilityEngine,
        grid: &mut TileGrid,
        coord: IVec2,
        cfg: &ReachabilityConfig,
    ) -> Option<Vec<TileId>> {
        let position = standing_on(grid, coord);
        engine
            .find_selectable_tiles(grid, position, cfg)
            .map(|tiles| tiles.to_vec())
    }

    /// Grid with mixed heights, a hole and an unwalkable tile
    fn uneven_grid() -> TileGrid {
        let heights = [
            [0.0, 0.0, 1.0, 3.5, 3.5],
            [0.0, 1.0, 2.0, 2.5, 6.0],
            [0.0, f32::NAN, 0.0, 0.5, 0.0],
            [0.5, 0.0, 0.0, 9.0, 0.0],
            [0.0, 0.0, 1.5, 0.0, 0.0],
        ];
        let mut grid = TileGrid::default();
        for (z, row) in heights.iter().enumerate() {
            for (x, height) in row.iter().enumerate() {
                if height.is_nan() {
                    continue;
                }
                let walkable = !(x == 4 && z == 2);
                grid.insert_tile(IVec2::new(x as i32, z as i32), *height, 0.5, walkable)
                    .unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_flat_grid_budget_one() {
        let mut grid = TileGrid::flat(3, 3, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();
        let center = grid.tile_at(IVec2::new(1, 1)).unwrap();

        let selectable = find_from(&mut engine, &mut grid, IVec2::new(1, 1), &config(1)).unwrap();

        assert_eq!(selectable.len(), 5);
        assert_eq!(selectable[0], center);
        for id in &selectable[1..] {
            assert_eq!(engine.distance(*id), Some(1));
            assert_eq!(engine.parent(*id), Some(center));
            assert!(grid.tile(*id).unwrap().selectable);
        }
        assert!(grid.tile(center).unwrap().current);
        assert_eq!(engine.current_tile(), Some(center));

        let corner = grid.tile_at(IVec2::new(0, 0)).unwrap();
        assert!(!engine.is_selectable(corner));
        assert!(!grid.tile(corner).unwrap().selectable);
    }

    #[test]
    fn test_height_gap_unreachable() {
        let mut grid = TileGrid::default();
        let first = grid.insert_tile(IVec2::new(0, 0), 0.0, 0.5, true).unwrap();
        let second = grid.insert_tile(IVec2::new(1, 0), 0.0, 0.5, true).unwrap();
        let third = grid.insert_tile(IVec2::new(2, 0), 3.0, 0.5, true).unwrap();
        let mut engine = ReachabilityEngine::new();

        let position = grid.tile(first).unwrap().standing_point(0.9);
        engine.find_selectable_tiles(&mut grid, position, &config(10));

        assert!(engine.is_selectable(second));
        assert!(!engine.is_selectable(third));
        assert!(!grid.tile(second).unwrap().adjacency_list().contains(&third));
    }

    #[test]
    fn test_budget_zero_selects_only_origin() {
        let mut grid = TileGrid::flat(3, 3, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();
        let center = grid.tile_at(IVec2::new(1, 1)).unwrap();

        let selectable = find_from(&mut engine, &mut grid, IVec2::new(1, 1), &config(0)).unwrap();

        assert_eq!(selectable, vec![center]);
        assert_eq!(engine.search_record(center).distance, 0);
        assert_eq!(engine.parent(center), None);
    }

    #[test]
    fn test_budget_boundary_not_expanded() {
        // Straight corridor: 0 - 1 - 2 - 3
        let mut grid = TileGrid::flat(4, 1, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();

        find_from(&mut engine, &mut grid, IVec2::new(0, 0), &config(2));

        let at_budget = grid.tile_at(IVec2::new(2, 0)).unwrap();
        let beyond = grid.tile_at(IVec2::new(3, 0)).unwrap();
        assert!(engine.is_selectable(at_budget));
        assert_eq!(engine.distance(at_budget), Some(2));
        assert!(!engine.is_selectable(beyond));
        assert!(!engine.search_record(beyond).visited);
    }

    #[test]
    fn test_matches_shortest_path_oracle() {
        let mut grid = uneven_grid();
        let jump_height = 2.0;
        let origin_coord = IVec2::new(0, 0);
        let origin = grid.tile_at(origin_coord).unwrap();

        for budget in 0..8 {
            let mut engine = ReachabilityEngine::new();
            let cfg = ReachabilityConfig {
                move_budget: budget,
                jump_height,
                ground_search_distance: 1.0,
            };
            find_from(&mut engine, &mut grid, origin_coord, &cfg);

            let oracle_grid = grid.clone();
            let reachable = dijkstra_all(&origin, |id| {
                oracle_grid
                    .find_neighbors(*id, jump_height)
                    .into_iter()
                    .map(|n| (n, 1u32))
                    .collect::<Vec<_>>()
            });

            let expected: HashSet<TileId> = reachable
                .iter()
                .filter(|(_, (_, cost))| *cost <= budget)
                .map(|(id, _)| *id)
                .chain(std::iter::once(origin))
                .collect();
            let actual: HashSet<TileId> = engine.selectable_tiles().iter().copied().collect();
            assert_eq!(actual, expected, "budget {budget}");

            for (id, (_, cost)) in &reachable {
                if *cost <= budget {
                    assert_eq!(engine.distance(*id), Some(*cost), "tile {id} budget {budget}");
                }
            }
        }
    }

    #[test]
    fn test_parent_chain_reaches_origin() {
        let mut grid = uneven_grid();
        let mut engine = ReachabilityEngine::new();
        let origin = grid.tile_at(IVec2::new(0, 0)).unwrap();

        find_from(&mut engine, &mut grid, IVec2::new(0, 0), &config(6));

        for &id in engine.selectable_tiles() {
            let distance = engine.distance(id).unwrap();
            let mut steps = 0;
            let mut cursor = id;
            while let Some(parent) = engine.parent(cursor) {
                cursor = parent;
                steps += 1;
            }
            assert_eq!(cursor, origin);
            assert_eq!(steps, distance);
        }
    }

    #[test]
    fn test_clear_selection_resets_tiles() {
        let mut grid = TileGrid::flat(3, 3, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();
        find_from(&mut engine, &mut grid, IVec2::new(1, 1), &config(2));
        let previously: Vec<TileId> = engine.selectable_tiles().to_vec();
        assert!(!previously.is_empty());

        engine.clear_selection(&mut grid);

        assert!(engine.selectable_tiles().is_empty());
        assert_eq!(engine.current_tile(), None);
        for id in previously {
            let tile = grid.tile(id).unwrap();
            assert!(!tile.selectable && !tile.current && !tile.target);
            assert_eq!(engine.search_record(id), SearchRecord::default());
        }
    }

    #[test]
    fn test_unresolved_tile_keeps_previous_selection() {
        let mut grid = TileGrid::flat(3, 3, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();
        find_from(&mut engine, &mut grid, IVec2::new(1, 1), &config(1));
        let before = engine.selectable_tiles().to_vec();

        let airborne = Vec3::new(1.0, 5.0, 1.0);
        assert!(engine.find_selectable_tiles(&mut grid, airborne, &config(1)).is_none());

        assert_eq!(engine.selectable_tiles(), before.as_slice());
        assert!(before.iter().all(|id| grid.tile(*id).unwrap().selectable));
    }

    #[test]
    fn test_recompute_does_not_accumulate() {
        let mut grid = TileGrid::flat(3, 3, 0.0).unwrap();
        let mut engine = ReachabilityEngine::new();
        let position = standing_on(&grid, IVec2::new(1, 1));

        engine.find_selectable_tiles(&mut grid, position, &config(1));
        engine.find_selectable_tiles(&mut grid, position, &config(1));
        assert_eq!(engine.selectable_tiles().len(), 5);

        // Moving the origin drops the old current flag
        let old_center = grid.tile_at(IVec2::new(1, 1)).unwrap();
        find_from(&mut engine, &mut grid, IVec2::new(0, 0), &config(1));
        assert!(!grid.tile(old_center).unwrap().current);
        assert_eq!(engine.selectable_tiles().len(), 3);
    }
}
