use crate::game_logic::movement::{
    DEFAULT_ARRIVAL_EPSILON, LocomotionConfig, LocomotionController, LocomotionPhase,
};
use crate::grid::{TileGrid, TileId};
use crate::pathfinding::{ReachabilityConfig, ReachabilityEngine, TraversalSequence};
use crate::resources::GameSettings;
use bevy::prelude::*;

/// Read-only movement parameters of one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitParameters {
    pub move_budget: u32,
    pub jump_height: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub half_height: f32,
    pub arrival_epsilon: f32,
    pub ground_search_distance: f32,
    pub gravity: Vec3,
}

impl Default for UnitParameters {
    fn default() -> Self {
        Self {
            move_budget: 5,
            jump_height: 2.0,
            move_speed: 2.0,
            jump_velocity: 4.5,
            half_height: 0.9,
            arrival_epsilon: DEFAULT_ARRIVAL_EPSILON,
            ground_search_distance: 1.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

impl UnitParameters {
    /// Build parameters from settings; `half_height` comes from the unit's body extent
    pub fn from_settings(settings: &GameSettings, half_height: f32) -> Self {
        Self {
            move_budget: settings.move_budget.get(),
            jump_height: settings.jump_height.get(),
            move_speed: settings.move_speed.get(),
            jump_velocity: settings.jump_velocity.get(),
            half_height,
            arrival_epsilon: settings.arrival_epsilon.get(),
            // The search starts at the unit's origin, so it must at least reach its feet
            ground_search_distance: settings.ground_search_distance.get().max(half_height + DEFAULT_ARRIVAL_EPSILON),
            gravity: Vec3::new(0.0, -settings.gravity.get(), 0.0),
        }
    }

    pub fn reachability(&self) -> ReachabilityConfig {
        ReachabilityConfig {
            move_budget: self.move_budget,
            jump_height: self.jump_height,
            ground_search_distance: self.ground_search_distance,
        }
    }

    pub fn locomotion(&self) -> LocomotionConfig {
        LocomotionConfig {
            move_speed: self.move_speed,
            jump_velocity: self.jump_velocity,
            half_height: self.half_height,
            arrival_epsilon: self.arrival_epsilon,
            gravity: self.gravity,
        }
    }
}

/// Outcome of one [`TacticsUnit::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitTick {
    /// Not moving; the selectable set was refreshed (false if no tile is under the unit)
    Idle { refreshed: bool },
    /// A destination was accepted this tick
    MoveStarted { destination: TileId },
    /// Moving; the phase the controller executed
    Moving(LocomotionPhase),
    /// The last waypoint was reached and selection state was cleared
    MoveFinished,
}

/// A unit that picks reachable tiles and walks, jumps and falls across them
#[derive(Component, Debug, Clone)]
pub struct TacticsUnit {
    params: UnitParameters,
    moving: bool,
    reachability: ReachabilityEngine,
    locomotion: LocomotionController,
}

impl TacticsUnit {
    pub fn new(params: UnitParameters) -> Self {
        Self {
            params,
            moving: false,
            reachability: ReachabilityEngine::new(),
            locomotion: LocomotionController::new(params.locomotion()),
        }
    }

    pub fn params(&self) -> &UnitParameters {
        &self.params
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn reachability(&self) -> &ReachabilityEngine {
        &self.reachability
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    /// Refresh the selectable set around the unit; returns false if no tile is under it
    pub fn find_selectable_tiles(&mut self, grid: &mut TileGrid, position: Vec3) -> bool {
        self.reachability
            .find_selectable_tiles(grid, position, &self.params.reachability())
            .is_some()
    }

    /// Commit to a destination; ignored while moving or if the tile is not selectable
    pub fn select_destination(&mut self, grid: &mut TileGrid, destination: TileId) -> bool {
        if self.moving {
            return false;
        }
        let Some(path) = TraversalSequence::build(&self.reachability, destination) else {
            debug!("Ignoring selection of non-selectable tile {destination}");
            return false;
        };

        if let Some(tile) = grid.tile_mut(destination) {
            tile.target = true;
        }
        info!("Moving to tile {destination} ({} waypoints)", path.len());
        debug!(
            "Route: {}",
            path.waypoints().map(|id| id.to_string()).collect::<Vec<_>>().join(" -> ")
        );
        self.locomotion.begin(path);
        self.moving = true;
        true
    }

    /// Run one tick: reachability and selection while idle, locomotion while moving
    pub fn tick(
        &mut self,
        delta_secs: f32,
        transform: &mut Transform,
        grid: &mut TileGrid,
        selection: Option<TileId>,
    ) -> UnitTick {
        if !self.moving {
            let refreshed = self.find_selectable_tiles(grid, transform.translation);
            if let Some(destination) = selection {
                if self.select_destination(grid, destination) {
                    return UnitTick::MoveStarted { destination };
                }
            }
            return UnitTick::Idle { refreshed };
        }

        match self.locomotion.tick(delta_secs, transform, grid) {
            LocomotionPhase::SequenceComplete | LocomotionPhase::Idle => {
                self.finish_movement(grid);
                UnitTick::MoveFinished
            }
            phase => UnitTick::Moving(phase),
        }
    }

    /// Stop immediately and run the same cleanup as a completed move
    ///
    /// A unit caught mid-air is put down on the walkable tile below it, or on
    /// the waypoint it was heading for, so the next idle tick can resolve its tile.
    pub fn abort(&mut self, transform: &mut Transform, grid: &mut TileGrid) {
        if !self.moving {
            return;
        }
        info!("Movement aborted");
        let waypoint = self.locomotion.path().peek();
        self.locomotion.abort();
        self.settle(transform, waypoint, grid);
        self.finish_movement(grid);
    }

    fn settle(&self, transform: &mut Transform, waypoint: Option<TileId>, grid: &TileGrid) {
        let half_height = self.params.half_height;
        let below = grid
            .tile_at(grid.world_to_coord(transform.translation))
            .and_then(|id| grid.tile(id))
            .filter(|tile| tile.walkable);

        if let Some(tile) = below {
            transform.translation.y = tile.standing_point(half_height).y;
        } else if let Some(tile) = waypoint.and_then(|id| grid.tile(id)) {
            transform.translation = tile.standing_point(half_height);
        } else {
            warn!("No tile to settle on after abort at {}", transform.translation);
        }
    }

    fn finish_movement(&mut self, grid: &mut TileGrid) {
        self.reachability.clear_selection(grid);
        self.moving = false;
        debug!("Movement finished");
    }
}
