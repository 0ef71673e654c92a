use crate::components::*;
use crate::game_logic::unit::{TacticsUnit, UnitParameters};
use crate::grid::TileGrid;
use crate::map::GridMapDefinition;
use crate::resources::GameConfig;
use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            setup_scene.after(crate::plugins::map_loader::load_map),
        )
        .add_systems(Update, follow_camera);
    }
}

/// Shared tile materials, one per highlight state
#[derive(Resource)]
pub struct TileMaterials {
    pub default: Handle<StandardMaterial>,
    pub current: Handle<StandardMaterial>,
    pub target: Handle<StandardMaterial>,
    pub selectable: Handle<StandardMaterial>,
    pub blocked: Handle<StandardMaterial>,
}

impl TileMaterials {
    pub fn get(&self, highlight: TileHighlight) -> Handle<StandardMaterial> {
        match highlight {
            TileHighlight::Current => self.current.clone(),
            TileHighlight::Target => self.target.clone(),
            TileHighlight::Selectable => self.selectable.clone(),
            TileHighlight::Blocked => self.blocked.clone(),
            TileHighlight::Default => self.default.clone(),
        }
    }
}

fn solid(materials: &mut Assets<StandardMaterial>, [r, g, b]: [f32; 3]) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgb(r, g, b),
        ..default()
    })
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    grid: Res<TileGrid>,
    map: Res<GridMapDefinition>,
    game_config: Res<GameConfig>,
) {
    let settings = &game_config.settings;
    let tile_materials = TileMaterials {
        default: solid(&mut materials, settings.tile_color),
        current: solid(&mut materials, settings.current_tile_color),
        target: solid(&mut materials, settings.target_tile_color),
        selectable: solid(&mut materials, settings.selectable_tile_color),
        blocked: solid(&mut materials, settings.blocked_tile_color),
    };

    for tile in grid.tiles() {
        let size = tile.half_extents() * 2.0;
        commands.spawn((
            // Slightly inset so neighbouring tiles read as separate cells
            Mesh3d(meshes.add(Cuboid::new(size.x * 0.95, size.y, size.z * 0.95))),
            MeshMaterial3d(tile_materials.get(TileHighlight::of(tile))),
            Transform::from_translation(tile.center()),
            TileMarker { id: tile.id() },
        ));
    }
    info!("Spawned {} tiles for '{}'", grid.len(), map.name);
    commands.insert_resource(tile_materials);

    let half_height = settings.unit_half_height();
    let spawn_tile = grid
        .tile_at(map.spawn_coord())
        .and_then(|id| grid.tile(id));
    match spawn_tile {
        Some(tile) => {
            let position = tile.standing_point(half_height);
            info!("Spawning unit on tile {} at {position}", tile.id());
            commands.spawn((
                Mesh3d(meshes.add(Capsule3d::new(settings.unit_radius, settings.unit_length))),
                MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
                Transform::from_translation(position).with_scale(Vec3::splat(settings.unit_scale)),
                TacticsUnit::new(UnitParameters::from_settings(settings, half_height)),
                PlayerControlled,
            ));
        }
        None => warn!("No tile at spawn {}, unit not spawned", map.spawn_coord()),
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 10.0, 0.0),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_3),
            ..default()
        },
        SceneLight,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: settings.ambient_light_brightness,
        affects_lightmapped_meshes: false,
    });

    let offset = settings.camera_offset();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
        CameraFollow { offset },
    ));
}

fn follow_camera(
    unit_query: Query<&Transform, (With<PlayerControlled>, Without<CameraFollow>)>,
    mut camera_query: Query<(&mut Transform, &CameraFollow), Without<PlayerControlled>>,
) {
    let Ok(unit_transform) = unit_query.single() else {
        return;
    };
    for (mut camera_transform, follow) in camera_query.iter_mut() {
        camera_transform.translation = unit_transform.translation + follow.offset;
        camera_transform.look_at(unit_transform.translation, Vec3::Y);
    }
}
