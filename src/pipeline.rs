use crate::automaton;
use crate::carve::{self, EntranceError};
use crate::config::{ConfigError, GenerationConfig, GenerationParams};
use crate::fill::random_fill;
use crate::grid::{Cell, Grid};
use crate::seed::ResolvedSeed;
use std::fmt;
use tracing::{debug, warn};

/// Non-fatal problem met during a run. The offending step is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An entrance did not fit and was not carved
    EntranceRejected(EntranceError),
    /// A smoothing pass ran with no neighbourhood selected
    NoNeighbourhood { pass: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EntranceRejected(err) => write!(f, "{}", err),
            Diagnostic::NoNeighbourhood { pass } => write!(
                f,
                "no neighbourhood type chosen for pass {}, please select one to enable cellular automata",
                pass
            ),
        }
    }
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct Generation {
    pub grid: Grid,
    /// Seed that reproduces this grid
    pub seed: ResolvedSeed,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validate `config` and generate a map from it
///
/// # Arguments
/// * `config` - Generation settings; a random seed is resolved here
///
/// # Returns
/// * `Result<Generation, ConfigError>` - The map with its seed and warnings,
///   or the first validation failure
pub fn generate(config: &GenerationConfig) -> Result<Generation, ConfigError> {
    // Validation runs before anything is allocated
    let params = config.validate()?;

    // Pin down the seed so the run can be repeated
    let seed = params.seed.resolve();
    Ok(generate_with_seed(&params, seed))
}

/// Run the pipeline with an already resolved seed
///
/// Stages: random fill, boundary seal, entrance carving, smoothing.
///
/// # Arguments
/// * `params` - Validated settings
/// * `seed` - Seed driving the fill; returned unchanged in the result
pub fn generate_with_seed(params: &GenerationParams, seed: ResolvedSeed) -> Generation {
    let mut diagnostics = Vec::new();
    let mut grid = Grid::new(params.width, params.height, Cell::Open);

    // Step 1: Stamp every cell from the seeded stream
    debug!(seed = %seed.text, width = params.width, height = params.height, "filling grid");
    let mut rng = seed.rng();
    random_fill(&mut grid, &mut rng, params.fill_percent);

    // Step 2: Wall off the outer ring
    carve::seal_boundary(&mut grid);

    // Step 3: Cut the requested entrances; a cut that does not fit is
    // reported and skipped, the rest still go ahead
    for &direction in &params.entrances {
        match carve::carve_entrance(&mut grid, direction, params.entrance) {
            Ok(()) => debug!(%direction, "carved entrance"),
            Err(err) => {
                warn!("{}", err);
                diagnostics.push(Diagnostic::EntranceRejected(err));
            }
        }
    }

    // Step 4: Smooth; without a neighbourhood each pass only records a warning
    let summary = automaton::run(
        &mut grid,
        params.neighbourhood,
        params.rules,
        params.iterations,
        params.pass_mode,
        |pass| {
            let diagnostic = Diagnostic::NoNeighbourhood { pass };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        },
    );
    debug!(applied = summary.applied, skipped = summary.skipped, "smoothing finished");

    Generation { grid, seed, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::Direction;
    use crate::neighbourhood::Neighbourhood;

    fn config() -> GenerationConfig {
        GenerationConfig {
            width: 24,
            height: 18,
            seed: "pipeline".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = generate(&config()).unwrap();
        let b = generate(&config()).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.seed.text, "pipeline");
        assert!(a.diagnostics.is_empty());
    }

    #[test]
    fn test_random_seed_replays_from_recorded_seed() {
        let random = GenerationConfig { use_random_seed: true, ..config() };
        let first = generate(&random).unwrap();

        let replay = GenerationConfig { seed: first.seed.text.clone(), ..config() };
        let second = generate(&replay).unwrap();
        assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = GenerationConfig { fill_percent: 150, ..config() };
        assert!(matches!(generate(&bad), Err(ConfigError::FillPercentOutOfRange(150))));
    }

    #[test]
    fn test_rejected_entrance_is_reported_and_run_continues() {
        let mut cfg = GenerationConfig { iterations: 0, ..config() };
        cfg.entrances.north = true;
        cfg.entrances.south = true;
        cfg.entrances.width = 30;

        let generation = generate(&cfg).unwrap();
        assert_eq!(generation.diagnostics.len(), 2);
        assert!(matches!(
            &generation.diagnostics[0],
            Diagnostic::EntranceRejected(EntranceError::TooLarge { direction: Direction::North, .. })
        ));
        // Ring is still sealed since no carve happened
        for x in 0..24 {
            assert_eq!(generation.grid.get(x, 0), Some(Cell::Wall));
            assert_eq!(generation.grid.get(x, 17), Some(Cell::Wall));
        }
    }

    #[test]
    fn test_no_neighbourhood_reports_each_pass() {
        let cfg = GenerationConfig { neighbourhood: None, iterations: 3, ..config() };
        let generation = generate(&cfg).unwrap();
        assert_eq!(
            generation.diagnostics,
            vec![
                Diagnostic::NoNeighbourhood { pass: 0 },
                Diagnostic::NoNeighbourhood { pass: 1 },
                Diagnostic::NoNeighbourhood { pass: 2 },
            ]
        );

        // Same as running no passes at all
        let plain = generate(&GenerationConfig { iterations: 0, ..cfg }).unwrap();
        assert_eq!(generation.grid, plain.grid);
    }

    #[test]
    fn test_modes_produce_different_maps() {
        let moore = generate(&config()).unwrap();
        let extended = generate(&GenerationConfig {
            neighbourhood: Some(Neighbourhood::MooreExtended),
            wall_threshold: 13,
            space_threshold: 10,
            ..config()
        })
        .unwrap();
        assert_eq!(moore.grid.width(), extended.grid.width());
        assert_ne!(moore.grid, extended.grid);
    }
}
