//! Cave Maker - seeded cellular automaton cave generation
//!
//! A run fills a grid from a seeded RNG, seals the outer ring, cuts
//! optional entrances into the edges and then smooths the result with a
//! cellular automaton:
//!
//! ```
//! use cave_maker::{GenerationConfig, generate};
//!
//! let config = GenerationConfig { width: 32, height: 24, ..Default::default() };
//! let map = generate(&config).unwrap();
//! assert_eq!(map.grid.width(), 32);
//! println!("seed {}\n{}", map.seed.text, map.grid);
//! ```

pub mod automaton;
pub mod carve;
pub mod config;
pub mod export;
pub mod fill;
pub mod grid;
pub mod neighbourhood;
pub mod pipeline;
pub mod seed;

pub use automaton::{PassMode, Rules};
pub use carve::{Direction, Entrance, EntranceError};
pub use config::{ConfigError, Entrances, GenerationConfig, GenerationParams};
pub use grid::{Cell, Grid};
pub use neighbourhood::{Neighbourhood, NeighbourhoodFlags};
pub use pipeline::{Diagnostic, Generation, generate, generate_with_seed};
pub use seed::{ResolvedSeed, SeedSource};
