use clap::Parser;
use tactics::game_logic::errors::{TacticsError, TacticsResult};
use tactics::map::GridMapDefinition;
use tactics::terrain_generation::{PRESET_NAMES, get_grid_preset};

mod gridgen {
    pub mod cli_utils;
}

use gridgen::cli_utils::*;

#[derive(Parser, Clone)]
#[command(name = "gridgen")]
#[command(about = "Generate tile map files for the tactics grid")]
struct Args {
    /// Map name
    #[arg(long, default_value = "generated_grid")]
    name: String,

    /// Grid size in cells (format: WIDTHxDEPTH)
    #[arg(long, default_value = "16x16")]
    size: String,

    /// Output file path relative to the maps/ directory
    #[arg(long)]
    output: Option<String>,

    /// Layout preset (flat, hills, plateaus)
    #[arg(long, default_value = "hills")]
    preset: String,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u32>,

    /// Fraction of cells left empty (0.0-1.0)
    #[arg(long, default_value = "0.0")]
    holes: f32,

    /// Fraction of tiles marked not walkable (0.0-1.0)
    #[arg(long, default_value = "0.05")]
    blocked: f32,

    /// Jump height used for the connectivity report
    #[arg(long, default_value = "2.0")]
    jump_height: f32,

    /// Write the demo arena instead of generating a layout
    #[arg(long)]
    demo: bool,
}

fn build_map(args: &Args) -> TacticsResult<GridMapDefinition> {
    if args.demo {
        return Ok(GridMapDefinition::demo());
    }

    let (width, depth) = parse_size(&args.size)?;
    let generator = get_grid_preset(&args.preset, args.seed)
        .ok_or_else(|| TacticsError::InvalidMapData {
            reason: format!(
                "Unknown preset '{}'. Available: {}",
                args.preset,
                PRESET_NAMES.join(", ")
            ),
        })?
        .with_holes(validate_density("hole", args.holes))
        .with_blocked(validate_density("blocked", args.blocked));

    generator.generate(&args.name, width, depth)
}

fn main() -> TacticsResult<()> {
    let args = Args::parse();

    let output_filename = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{}.bin", args.name));
    validate_output_path(&output_filename)?;

    let map = build_map(&args)?;
    let full_path = map.save_to_file(&output_filename)?;

    println!("Map saved successfully to: {}", full_path.display());
    print_map_summary(&map, args.jump_height);
    Ok(())
}

fn print_map_summary(map: &GridMapDefinition, jump_height: f32) {
    println!("\nMap summary:");
    println!("  Name: {}", map.name);
    println!("  Tiles: {} ({} walkable)", map.tiles.len(), map.walkable_count());
    if let Some((low, high)) = map.height_range() {
        println!("  Heights: {low:.2} to {high:.2}");
    }
    println!("  Unit spawn: {}", map.spawn_coord());
    println!(
        "  Connected to spawn at jump height {jump_height}: {} tiles",
        map.reachable_from_spawn(jump_height).len()
    );
}
