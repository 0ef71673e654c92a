use crate::grid::{Tile, TileId};
use bevy::prelude::*;

/// Links a rendered tile entity to its grid tile
#[derive(Component, Debug, Clone, Copy)]
pub struct TileMarker {
    pub id: TileId,
}

/// The unit driven by pointer input
#[derive(Component, Debug, Default)]
pub struct PlayerControlled;

#[derive(Component)]
pub struct CameraFollow {
    pub offset: Vec3,
}

#[derive(Component)]
pub struct SceneLight;

/// Display state of a tile, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileHighlight {
    Current,
    Target,
    Selectable,
    Blocked,
    Default,
}

impl TileHighlight {
    pub fn of(tile: &Tile) -> Self {
        if tile.current {
            Self::Current
        } else if tile.target {
            Self::Target
        } else if tile.selectable {
            Self::Selectable
        } else if !tile.walkable {
            Self::Blocked
        } else {
            Self::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;

    #[test]
    fn test_highlight_priority() {
        let mut grid = TileGrid::flat(1, 1, 0.0).unwrap();
        let id = grid.tile_at(IVec2::ZERO).unwrap();
        let tile = grid.tile_mut(id).unwrap();
        assert_eq!(TileHighlight::of(tile), TileHighlight::Default);

        tile.selectable = true;
        assert_eq!(TileHighlight::of(tile), TileHighlight::Selectable);

        tile.target = true;
        assert_eq!(TileHighlight::of(tile), TileHighlight::Target);

        tile.current = true;
        assert_eq!(TileHighlight::of(tile), TileHighlight::Current);
    }

    #[test]
    fn test_blocked_highlight() {
        let mut grid = TileGrid::default();
        let id = grid.insert_tile(IVec2::ZERO, 0.0, 0.5, false).unwrap();
        assert_eq!(TileHighlight::of(grid.tile(id).unwrap()), TileHighlight::Blocked);
    }
}
