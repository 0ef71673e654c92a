pub mod components;
pub mod config;
pub mod game_logic;
pub mod grid;
pub mod map;
pub mod pathfinding;
pub mod plugins;
pub mod resources;
pub mod terrain_generation;

// Selective re-exports for external consumers

// Plugins - main.rs needs all plugins
pub use plugins::*;

// Game logic - the binaries need errors and the unit driver
pub use game_logic::errors::{TacticsError, TacticsResult};
pub use game_logic::unit::{TacticsUnit, UnitParameters, UnitTick};

// Grid and map - gridgen needs core map types
pub use grid::{TileGrid, TileId};
pub use map::{GridMapDefinition, TileDefinition};
