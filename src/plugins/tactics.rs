use crate::components::{PlayerControlled, TileHighlight, TileMarker};
use crate::game_logic::unit::{TacticsUnit, UnitTick};
use crate::grid::TileGrid;
use crate::plugins::scene::TileMaterials;
use crate::resources::PendingSelection;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub struct TacticsPlugin;

impl Plugin for TacticsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingSelection>().add_systems(
            Update,
            (
                pick_tile,
                abort_on_escape,
                drive_units,
                update_tile_colors,
                draw_facing_gizmos,
            )
                .chain(),
        );
    }
}

/// Resolve a left-button release to the tile under the cursor
fn pick_tile(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    grid: Res<TileGrid>,
    mut pending: ResMut<PendingSelection>,
) {
    pending.0 = None;
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    pending.0 = grid.raycast(ray.origin, *ray.direction);
    if let Some(id) = pending.0 {
        debug!("Pointer released over tile {id}");
    }
}

fn abort_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut grid: ResMut<TileGrid>,
    mut units: Query<(&mut TacticsUnit, &mut Transform), With<PlayerControlled>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    for (mut unit, mut transform) in &mut units {
        unit.abort(&mut transform, &mut grid);
    }
}

/// Advance every unit by one tick; only player-controlled units receive the selection
///
/// Idle refreshes write the grid's shared selectable and current flags, so with
/// several idle units the last one ticked owns the highlighted set.
pub fn drive_units(
    time: Res<Time>,
    pending: Res<PendingSelection>,
    mut grid: ResMut<TileGrid>,
    mut units: Query<(&mut TacticsUnit, &mut Transform, Has<PlayerControlled>)>,
) {
    for (mut unit, mut transform, controlled) in &mut units {
        let selection = if controlled { pending.0 } else { None };
        if let UnitTick::MoveFinished =
            unit.tick(time.delta_secs(), &mut transform, &mut grid, selection)
        {
            info!("Unit arrived at {}", transform.translation);
        }
    }
}

fn update_tile_colors(
    grid: Res<TileGrid>,
    tile_materials: Option<Res<TileMaterials>>,
    mut tiles: Query<(&TileMarker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let Some(tile_materials) = tile_materials else {
        return;
    };
    for (marker, mut material) in &mut tiles {
        let Some(tile) = grid.tile(marker.id) else {
            continue;
        };
        let handle = tile_materials.get(TileHighlight::of(tile));
        if material.0 != handle {
            material.0 = handle;
        }
    }
}

fn draw_facing_gizmos(mut gizmos: Gizmos, units: Query<&Transform, With<TacticsUnit>>) {
    for transform in &units {
        gizmos.ray(transform.translation, *transform.forward(), Color::srgb(1.0, 0.0, 0.0));
    }
}
