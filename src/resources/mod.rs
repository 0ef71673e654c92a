use crate::config::range_types::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct GameConfig {
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
// NOTE: When adding new fields, update the default config.toml example in the project root
pub struct GameSettings {
    // Reachability settings
    pub move_budget: MoveBudget,
    pub jump_height: JumpHeight,
    pub ground_search_distance: GroundSearchDistance,

    // Locomotion settings
    pub move_speed: MovementSpeed,
    pub jump_velocity: JumpVelocity,
    pub arrival_epsilon: ArrivalEpsilon,
    pub gravity: GravityStrength,

    // Unit body
    pub unit_radius: f32,
    pub unit_length: f32,
    pub unit_scale: f32,

    // Camera and window
    pub camera_offset: [f32; 3],
    pub window_width: f32,
    pub window_height: f32,
    pub ambient_light_brightness: f32,

    // Tile colours
    pub tile_color: [f32; 3],
    pub current_tile_color: [f32; 3],
    pub target_tile_color: [f32; 3],
    pub selectable_tile_color: [f32; 3],
    pub blocked_tile_color: [f32; 3],

    // Map settings
    pub map_file_path: Option<String>, // Path relative to the maps directory; None uses the demo arena
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            move_budget: MoveBudget::default(),
            jump_height: JumpHeight::default(),
            ground_search_distance: GroundSearchDistance::default(),

            move_speed: MovementSpeed::default(),
            jump_velocity: JumpVelocity::default(),
            arrival_epsilon: ArrivalEpsilon::default(),
            gravity: GravityStrength::default(),

            unit_radius: 0.4,
            unit_length: 1.0,
            unit_scale: 1.0,

            camera_offset: [-6.0, 9.0, 8.0],
            window_width: 1280.0,
            window_height: 720.0,
            ambient_light_brightness: 300.0,

            tile_color: [0.9, 0.9, 0.9],
            current_tile_color: [1.0, 0.0, 1.0], // magenta
            target_tile_color: [0.0, 1.0, 0.0],
            selectable_tile_color: [1.0, 0.0, 0.0],
            blocked_tile_color: [0.25, 0.25, 0.3],

            map_file_path: None,
        }
    }
}

impl GameSettings {
    /// Distance from the unit's origin to the soles of its capsule
    pub fn unit_half_height(&self) -> f32 {
        (self.unit_length + 2.0 * self.unit_radius) * self.unit_scale / 2.0
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }
}

/// Tile the pointer was released over this frame, if any
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PendingSelection(pub Option<crate::grid::TileId>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unit_half_height() {
        let settings = GameSettings::default();
        assert!((settings.unit_half_height() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_scaled_unit_half_height() {
        let settings = GameSettings {
            unit_scale: 2.0,
            ..default()
        };
        assert!((settings.unit_half_height() - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = GameConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: GameConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.settings.move_budget, config.settings.move_budget);
        assert_eq!(parsed.settings.camera_offset, config.settings.camera_offset);
        assert!(parsed.settings.map_file_path.is_none());
    }

    #[test]
    fn test_empty_config_is_default() {
        let parsed: GameConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.settings.jump_height.get(), 2.0);
        assert_eq!(parsed.settings.gravity.get(), 9.81);
    }
}
