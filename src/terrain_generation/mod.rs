use crate::game_logic::errors::{TacticsError, TacticsResult};
use crate::map::{GridMapDefinition, TileDefinition};
use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Height field algorithms for tile maps
#[derive(Debug, Clone)]
pub enum GridAlgorithm {
    Flat {
        height: f32,
    },
    /// Octave Perlin noise snapped to terraces of `step` height
    Hills {
        amplitude: f32,
        frequency: f32,
        octaves: u32,
        step: f32,
    },
    /// Perlin noise bucketed into a few discrete plateau levels
    Plateaus {
        levels: u32,
        level_height: f32,
        frequency: f32,
    },
}

/// Generates battlefield layouts
#[derive(Debug, Clone)]
pub struct GridGenerator {
    pub seed: u32,
    pub algorithm: GridAlgorithm,
    pub hole_density: f32,
    pub blocked_density: f32,
}

impl GridGenerator {
    pub fn new(seed: u32, algorithm: GridAlgorithm) -> Self {
        Self {
            seed,
            algorithm,
            hole_density: 0.0,
            blocked_density: 0.0,
        }
    }

    /// Fraction of cells left without a tile
    pub fn with_holes(mut self, density: f32) -> Self {
        self.hole_density = density.clamp(0.0, 1.0);
        self
    }

    /// Fraction of tiles marked not walkable
    pub fn with_blocked(mut self, density: f32) -> Self {
        self.blocked_density = density.clamp(0.0, 1.0);
        self
    }

    /// Top height of the cell at (x, z)
    pub fn height_at(&self, perlin: &Perlin, x: i32, z: i32) -> f32 {
        match &self.algorithm {
            GridAlgorithm::Flat { height } => *height,
            GridAlgorithm::Hills {
                amplitude,
                frequency,
                octaves,
                step,
            } => {
                let mut noise_value = 0.0;
                let mut current_amplitude = *amplitude as f64;
                let mut current_frequency = *frequency as f64;

                for _ in 0..*octaves {
                    noise_value += perlin
                        .get([x as f64 * current_frequency, z as f64 * current_frequency])
                        * current_amplitude;
                    current_amplitude *= 0.5; // Persistence
                    current_frequency *= 2.0; // Lacunarity
                }

                if *step > 0.0 {
                    ((noise_value as f32) / step).round() * step
                } else {
                    noise_value as f32
                }
            }
            GridAlgorithm::Plateaus {
                levels,
                level_height,
                frequency,
            } => {
                let levels = (*levels).max(1);
                let value = perlin.get([x as f64 * *frequency as f64, z as f64 * *frequency as f64]);
                let normalized = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
                let level = ((normalized * levels as f64) as u32).min(levels - 1);
                level as f32 * level_height
            }
        }
    }

    /// Generate a `width` x `depth` map with the unit spawning at the centre cell
    pub fn generate(&self, name: &str, width: u32, depth: u32) -> TacticsResult<GridMapDefinition> {
        if width == 0 || depth == 0 {
            return Err(TacticsError::InvalidMapData {
                reason: format!("map size {width}x{depth} must be non-zero"),
            });
        }

        let perlin = Perlin::new(self.seed);
        let mut rng = Pcg64::seed_from_u64(self.seed as u64);
        let spawn = IVec2::new(width as i32 / 2, depth as i32 / 2);
        let mut tiles = Vec::with_capacity((width * depth) as usize);

        for z in 0..depth as i32 {
            for x in 0..width as i32 {
                let is_spawn = IVec2::new(x, z) == spawn;
                let hole = rng.gen_bool(self.hole_density as f64);
                let blocked = rng.gen_bool(self.blocked_density as f64);
                if hole && !is_spawn {
                    continue;
                }
                let height = self.height_at(&perlin, x, z);
                tiles.push(TileDefinition::new(x, z, height, is_spawn || !blocked));
            }
        }

        GridMapDefinition::new(name.to_string(), 1.0, 0.5, tiles, spawn)
    }
}

/// Get a predefined layout preset
pub fn get_grid_preset(name: &str, seed: Option<u32>) -> Option<GridGenerator> {
    let seed = seed.unwrap_or_else(rand::random);

    match name {
        "flat" => Some(GridGenerator::new(seed, GridAlgorithm::Flat { height: 0.0 })),
        "hills" => Some(GridGenerator::new(
            seed,
            GridAlgorithm::Hills {
                amplitude: 3.0,
                frequency: 0.15,
                octaves: 3,
                step: 0.5,
            },
        )),
        "plateaus" => Some(GridGenerator::new(
            seed,
            GridAlgorithm::Plateaus {
                levels: 3,
                level_height: 1.5,
                frequency: 0.12,
            },
        )),
        _ => None,
    }
}

pub const PRESET_NAMES: [&str; 3] = ["flat", "hills", "plateaus"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_generation() {
        let generator = GridGenerator::new(12345, GridAlgorithm::Flat { height: 1.5 });
        let map = generator.generate("flat", 6, 4).unwrap();

        assert_eq!(map.tiles.len(), 24);
        assert!(map.tiles.iter().all(|t| t.height == 1.5 && t.walkable));
        assert_eq!(map.spawn_coord(), IVec2::new(3, 2));
    }

    #[test]
    fn test_hills_are_terraced() {
        let generator = get_grid_preset("hills", Some(7)).unwrap();
        let map = generator.generate("hills", 12, 12).unwrap();

        for tile in &map.tiles {
            let steps = tile.height / 0.5;
            assert!((steps - steps.round()).abs() < 1e-4, "height {} off terrace", tile.height);
        }
        let first = map.tiles[0].height;
        assert!(
            map.tiles.iter().any(|t| t.height != first),
            "hills should vary in height"
        );
    }

    #[test]
    fn test_plateau_levels() {
        let generator = get_grid_preset("plateaus", Some(99)).unwrap();
        let map = generator.generate("plateaus", 10, 10).unwrap();

        assert!(
            map.tiles
                .iter()
                .all(|t| [0.0, 1.5, 3.0].contains(&t.height))
        );
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = get_grid_preset("hills", Some(42))
            .unwrap()
            .with_holes(0.2)
            .generate("a", 9, 9)
            .unwrap();
        let b = get_grid_preset("hills", Some(42))
            .unwrap()
            .with_holes(0.2)
            .generate("b", 9, 9)
            .unwrap();

        assert_eq!(a.tiles, b.tiles);
    }

    #[test]
    fn test_holes_and_blocked_spare_spawn() {
        let map = GridGenerator::new(3, GridAlgorithm::Flat { height: 0.0 })
            .with_holes(1.0)
            .with_blocked(1.0)
            .generate("empty", 5, 5)
            .unwrap();

        assert_eq!(map.tiles.len(), 1);
        assert_eq!(map.tiles[0].coord(), IVec2::new(2, 2));
        assert!(map.tiles[0].walkable);
    }

    #[test]
    fn test_blocked_density() {
        let map = GridGenerator::new(3, GridAlgorithm::Flat { height: 0.0 })
            .with_blocked(1.0)
            .generate("blocked", 4, 4)
            .unwrap();

        assert_eq!(map.tiles.len(), 16);
        assert_eq!(map.walkable_count(), 1);
    }

    #[test]
    fn test_zero_size_rejected() {
        let generator = GridGenerator::new(1, GridAlgorithm::Flat { height: 0.0 });
        assert!(matches!(
            generator.generate("none", 0, 4),
            Err(TacticsError::InvalidMapData { .. })
        ));
    }

    #[test]
    fn test_presets() {
        for name in PRESET_NAMES {
            let preset = get_grid_preset(name, Some(123)).unwrap();
            assert_eq!(preset.seed, 123);
        }
        assert!(get_grid_preset("mountains", Some(123)).is_none());
    }
}
