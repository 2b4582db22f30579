use anyhow::{Context, Result};
use cave_maker::export::{export_grid_to_file, render_ascii};
use cave_maker::{Cell, Direction, GenerationConfig, NeighbourhoodFlags, PassMode, generate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line spelling of an entrance edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntranceEdge {
    North,
    East,
    South,
    West,
}

impl From<EntranceEdge> for Direction {
    fn from(edge: EntranceEdge) -> Self {
        match edge {
            EntranceEdge::North => Direction::North,
            EntranceEdge::East => Direction::East,
            EntranceEdge::South => Direction::South,
            EntranceEdge::West => Direction::West,
        }
    }
}

/// Generate a cave map with a seeded cellular automaton
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file to start from; other options override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "CELLS", allow_negative_numbers = true)]
    width: Option<i32>,

    #[arg(long, value_name = "CELLS", allow_negative_numbers = true)]
    height: Option<i32>,

    /// Chance (0-100) of a cell starting as wall
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    fill_percent: Option<i32>,

    #[arg(long)]
    seed: Option<String>,

    /// Derive the seed from the clock
    #[arg(long)]
    random_seed: bool,

    /// Use the von Neumann neighbourhood (takes priority over the others)
    #[arg(long)]
    von_neumann: bool,

    /// Use the Moore neighbourhood (radius 1)
    #[arg(long)]
    moore: bool,

    /// Use the extended Moore neighbourhood (radius 2)
    #[arg(long)]
    moore_extended: bool,

    /// Select no neighbourhood; smoothing passes are skipped with a warning
    #[arg(long, conflicts_with_all = ["von_neumann", "moore", "moore_extended"])]
    no_neighbourhood: bool,

    #[arg(long, allow_negative_numbers = true)]
    wall_threshold: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    space_threshold: Option<i32>,

    /// Number of smoothing passes
    #[arg(long, allow_negative_numbers = true)]
    iterations: Option<i32>,

    /// Edge to cut an entrance into; repeat for several edges
    #[arg(long, value_enum)]
    entrance: Vec<EntranceEdge>,

    #[arg(long, allow_negative_numbers = true)]
    entrance_width: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    entrance_depth: Option<i32>,

    /// Decide each pass from a snapshot instead of updating in place
    #[arg(long)]
    buffered: bool,

    /// Write the grid to this CSV file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not print the map
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<(GenerationConfig, Option<PathBuf>, bool)> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GenerationConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fill_percent) = self.fill_percent {
            config.fill_percent = fill_percent;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.random_seed {
            config.use_random_seed = true;
        }

        let flags = NeighbourhoodFlags {
            von_neumann: self.von_neumann,
            moore: self.moore,
            moore_extended: self.moore_extended,
        };
        if flags.any() || self.no_neighbourhood {
            config.neighbourhood = flags.select();
        }

        if let Some(wall_threshold) = self.wall_threshold {
            config.wall_threshold = wall_threshold;
        }
        if let Some(space_threshold) = self.space_threshold {
            config.space_threshold = space_threshold;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        for edge in self.entrance {
            config.entrances.enable(edge.into());
        }
        if let Some(width) = self.entrance_width {
            config.entrances.width = width;
        }
        if let Some(depth) = self.entrance_depth {
            config.entrances.depth = depth;
        }
        if self.buffered {
            config.pass_mode = PassMode::Buffered;
        }

        Ok((config, self.output, self.quiet))
    }
}

fn main() -> Result<()> {
    let (config, output, quiet) = Cli::parse().into_config()?;

    println!("Cave Maker - Cellular Automaton Caves");
    println!("Generating {}x{} map...", config.width, config.height);
    match config.neighbourhood {
        Some(mode) => println!("Neighbourhood: {}, {} passes", mode, config.iterations),
        None => println!("Neighbourhood: none"),
    }

    let generation = generate(&config).context("invalid configuration")?;

    println!("Seed: {}", generation.seed.text);
    for diagnostic in &generation.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    let grid = &generation.grid;
    println!(
        "Walls: {}, open: {}",
        grid.count(Cell::Wall),
        grid.count(Cell::Open)
    );

    if !quiet {
        print!("{}", render_ascii(grid));
    }

    if let Some(path) = output {
        export_grid_to_file(grid, &path)?;
        println!("Exported grid to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_maker::Neighbourhood;

    fn parse(args: &[&str]) -> (GenerationConfig, Option<PathBuf>, bool) {
        let mut argv = vec!["cave-maker"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).into_config().unwrap()
    }

    #[test]
    fn test_defaults_without_arguments() {
        let (config, output, quiet) = parse(&[]);
        assert_eq!(config, GenerationConfig::default());
        assert!(output.is_none());
        assert!(!quiet);
    }

    #[test]
    fn test_overrides() {
        let (config, output, quiet) = parse(&[
            "--width", "30", "--height", "20", "--seed", "x", "--iterations", "0",
            "--entrance", "north", "--entrance", "west", "--entrance-width", "1",
            "--buffered", "--output", "map.csv", "--quiet",
        ]);
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 20);
        assert_eq!(config.seed, "x");
        assert_eq!(config.iterations, 0);
        assert_eq!(config.entrances.enabled(), vec![Direction::North, Direction::West]);
        assert_eq!(config.entrances.width, 1);
        assert_eq!(config.pass_mode, PassMode::Buffered);
        assert_eq!(output, Some(PathBuf::from("map.csv")));
        assert!(quiet);
    }

    #[test]
    fn test_neighbourhood_flag_priority() {
        let (config, _, _) = parse(&["--moore-extended", "--von-neumann"]);
        assert_eq!(config.neighbourhood, Some(Neighbourhood::VonNeumann));

        let (config, _, _) = parse(&["--moore-extended"]);
        assert_eq!(config.neighbourhood, Some(Neighbourhood::MooreExtended));

        let (config, _, _) = parse(&["--no-neighbourhood"]);
        assert_eq!(config.neighbourhood, None);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let (config, _, _) = parse(&["--width", "-3"]);
        assert_eq!(config.width, -3);
        assert!(generate(&config).is_err());
    }

    #[test]
    fn test_every_entrance_edge_parses() {
        let (config, _, _) = parse(&[
            "--entrance", "south", "--entrance", "east", "--entrance", "west", "--entrance", "north",
        ]);
        assert_eq!(config.entrances.enabled(), Direction::ALL.to_vec());
        assert!(Cli::try_parse_from(["cave-maker", "--entrance", "up"]).is_err());
    }
}
