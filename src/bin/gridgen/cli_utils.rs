use std::path::Path;
use tactics::game_logic::errors::{TacticsError, TacticsResult};

pub const MAX_DIMENSION: u32 = 256;

/// Parse size string "WIDTHxDEPTH" with validation
pub fn parse_size(size_str: &str) -> TacticsResult<(u32, u32)> {
    let invalid = || TacticsError::InvalidMapData {
        reason: format!("Invalid size format '{size_str}'. Expected WIDTHxDEPTH"),
    };

    let (width, depth) = size_str.split_once('x').ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let depth: u32 = depth.trim().parse().map_err(|_| invalid())?;

    if width == 0 || depth == 0 {
        return Err(TacticsError::InvalidMapData {
            reason: "Width and depth must be greater than 0".to_string(),
        });
    }

    if width > MAX_DIMENSION || depth > MAX_DIMENSION {
        return Err(TacticsError::InvalidMapData {
            reason: format!("Width and depth must not exceed {MAX_DIMENSION}"),
        });
    }

    Ok((width, depth))
}

/// Clamp a density to [0.0, 1.0], warning when it was out of range
pub fn validate_density(label: &str, density: f32) -> f32 {
    if !(0.0..=1.0).contains(&density) {
        println!("Warning: {label} density {density} is out of range [0.0, 1.0], clamping");
        density.clamp(0.0, 1.0)
    } else {
        density
    }
}

pub fn validate_output_path(filename: &str) -> TacticsResult<()> {
    let path = Path::new(filename);
    if path.is_absolute() {
        return Err(TacticsError::InvalidMapData {
            reason: format!("Output path must be relative to the maps/ directory, got: {filename}"),
        });
    }

    if path.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(TacticsError::InvalidMapData {
            reason: "Output path cannot contain '..'".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("16x16").unwrap(), (16, 16));
        assert_eq!(parse_size("8x32").unwrap(), (8, 32));
        assert_eq!(parse_size("1x1").unwrap(), (1, 1));

        assert!(parse_size("16").is_err());
        assert!(parse_size("0x16").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("512x16").is_err());
    }

    #[test]
    fn test_validate_density() {
        assert_eq!(validate_density("hole", 0.25), 0.25);
        assert_eq!(validate_density("hole", 1.5), 1.0);
        assert_eq!(validate_density("blocked", -0.5), 0.0);
    }

    #[test]
    fn test_validate_output_path() {
        assert!(validate_output_path("arena.bin").is_ok());
        assert!(validate_output_path("folder/arena.bin").is_ok());
        assert!(validate_output_path("../arena.bin").is_err());
        assert!(validate_output_path("/tmp/arena.bin").is_err());
    }
}
