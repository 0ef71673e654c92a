use crate::game_logic::errors::{TacticsError, TacticsResult};
use crate::grid::TileGrid;
use crate::map::GridMapDefinition;
use crate::resources::GameConfig;
use bevy::prelude::*;

pub struct MapLoaderPlugin;

impl Plugin for MapLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_map);
    }
}

pub fn load_map(mut commands: Commands, game_config: Res<GameConfig>) {
    let (map, grid) = prepare_map(&game_config);

    let jump_height = game_config.settings.jump_height.get();
    info!(
        "Loaded map '{}': {} tiles, {} connected to spawn at jump height {jump_height}",
        map.name,
        grid.len(),
        map.reachable_from_spawn(jump_height).len()
    );

    commands.insert_resource(grid);
    commands.insert_resource(map);
}

/// Resolve the configured map and its runtime grid, falling back to the demo arena
pub fn prepare_map(game_config: &GameConfig) -> (GridMapDefinition, TileGrid) {
    let map = load_map_from_config(game_config).unwrap_or_else(|err| {
        report_map_error(&err);
        warn!("Falling back to the demo arena");
        GridMapDefinition::demo()
    });

    match map.to_tile_grid() {
        Ok(grid) => (map, grid),
        Err(err) => {
            warn!("Failed to build tile grid for '{}': {err}", map.name);
            let demo = GridMapDefinition::demo();
            let grid = demo.to_tile_grid().unwrap_or_default();
            (demo, grid)
        }
    }
}

fn load_map_from_config(game_config: &GameConfig) -> TacticsResult<GridMapDefinition> {
    let Some(map_file) = &game_config.settings.map_file_path else {
        info!("No map file configured, using the demo arena");
        return Ok(GridMapDefinition::demo());
    };

    info!("Attempting to load map from: {map_file}");
    GridMapDefinition::load_from_file(map_file)
}

fn report_map_error(err: &TacticsError) {
    match err {
        TacticsError::MapFileNotFound { path } => {
            warn!(
                "Map file not found: {}. Generate one with: cargo run --bin gridgen",
                path.display()
            );
        }
        TacticsError::MapIo { path, source } => {
            warn!("Could not access map file {}: {source}", path.display());
        }
        TacticsError::CorruptedMapFile { reason } => {
            warn!("Map file is corrupted: {reason}");
        }
        TacticsError::MapValidationFailed { reason } | TacticsError::InvalidMapData { reason } => {
            warn!("Map data is invalid: {reason}");
        }
        _ => warn!("Unexpected error loading map: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_map_configured_uses_demo() {
        let (map, grid) = prepare_map(&GameConfig::default());
        assert_eq!(map.name, GridMapDefinition::demo().name);
        assert_eq!(grid.len(), map.tiles.len());
    }

    #[test]
    fn test_missing_map_falls_back_to_demo() {
        let mut config = GameConfig::default();
        config.settings.map_file_path = Some("definitely_missing_map.bin".to_string());

        let (map, grid) = prepare_map(&config);

        assert_eq!(map.name, GridMapDefinition::demo().name);
        assert!(grid.tile_at(map.spawn_coord()).is_some());
    }
}
