use crate::game_logic::errors::{TacticsError, TacticsResult};
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub mod range_types;

pub fn get_config_path() -> TacticsResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or(TacticsError::ConfigDirNotFound)?;
    path.push("tactics");
    fs::create_dir_all(&path)?;
    path.push("config.toml");
    Ok(path)
}

/// Load the user config, falling back to defaults if it is missing or unreadable
pub fn load_config() -> GameConfig {
    match get_config_path().and_then(|path| load_config_from(&path)) {
        Ok(config) => config,
        Err(TacticsError::ConfigFileNotFound { path }) => {
            info!("No config at {}, using defaults", path.display());
            GameConfig::default()
        }
        Err(e) => {
            warn!("Failed to load config, using defaults: {e}");
            GameConfig::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> TacticsResult<GameConfig> {
    if !path.exists() {
        return Err(TacticsError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str::<GameConfig>(&contents)?)
}

pub fn save_config(config: &GameConfig) -> TacticsResult<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &GameConfig, path: &Path) -> TacticsResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::range_types::MoveBudget;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tactics-config-tests");
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_save_and_load_config() {
        let path = scratch_path("save_and_load.toml");
        let mut config = GameConfig::default();
        config.settings.move_budget = MoveBudget::new(7);
        config.settings.map_file_path = Some("hills.bin".to_string());

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.settings.move_budget.get(), 7);
        assert_eq!(loaded.settings.map_file_path.as_deref(), Some("hills.bin"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_config_file() {
        let path = scratch_path("does_not_exist.toml");
        fs::remove_file(&path).ok();

        assert!(matches!(
            load_config_from(&path),
            Err(TacticsError::ConfigFileNotFound { .. })
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let path = scratch_path("partial.toml");
        fs::write(&path, "[settings]\njump_height = 1.0\n").unwrap();

        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.settings.jump_height.get(), 1.0);
        assert_eq!(loaded.settings.move_budget.get(), 5);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_config_rejected() {
        let path = scratch_path("malformed.toml");
        fs::write(&path, "settings = [[[").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(TacticsError::DeserializationFailed(_))
        ));
        fs::remove_file(path).ok();
    }
}
