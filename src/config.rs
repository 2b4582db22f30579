//! Configuration for a single generation run.
//!
//! Values arrive as signed integers from TOML or the command line so that
//! bad input such as a negative width is reported by [`GenerationConfig::validate`]
//! with a readable message instead of failing deep inside the pipeline.

use crate::automaton::{PassMode, Rules};
use crate::carve::{Direction, Entrance};
use crate::neighbourhood::{Neighbourhood, NeighbourhoodFlags};
use crate::seed::SeedSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors found before generation starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("fill percent must be between 0 and 100, got {0}")]
    FillPercentOutOfRange(i32),
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: i32 },
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("set either `neighbourhood` or the von_neumann/moore/moore_extended flags, not both")]
    ConflictingNeighbourhood,
}

/// Which edges get an entrance, and how big each one is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Entrances {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
    pub width: i32,
    pub depth: i32,
}

impl Default for Entrances {
    fn default() -> Self {
        Entrances {
            north: false,
            east: false,
            south: false,
            west: false,
            width: 2,
            depth: 3,
        }
    }
}

impl Entrances {
    pub fn is_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn enable(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.north = true,
            Direction::East => self.east = true,
            Direction::South => self.south = true,
            Direction::West => self.west = true,
        }
    }

    /// Enabled edges in carving order: north, east, south, west
    pub fn enabled(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_enabled(d))
            .collect()
    }
}

/// Input for one generation run
///
/// In TOML, `neighbourhood` takes `"none"` or a mode name. The older
/// `von_neumann`, `moore` and `moore_extended` booleans are accepted in its
/// place and resolved with [`NeighbourhoodFlags::select`]. Unknown keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct GenerationConfig {
    pub width: i32,
    pub height: i32,
    /// Chance (0-100) of a cell starting as wall
    pub fill_percent: i32,
    pub seed: String,
    /// Ignore `seed` and derive one from the clock
    pub use_random_seed: bool,
    /// Smoothing neighbourhood; with none, smoothing passes are skipped
    pub neighbourhood: Option<Neighbourhood>,
    pub wall_threshold: i32,
    pub space_threshold: i32,
    /// Number of smoothing passes
    pub iterations: i32,
    pub entrances: Entrances,
    pub pass_mode: PassMode,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            width: 64,
            height: 48,
            fill_percent: 45,
            seed: "cave".to_string(),
            use_random_seed: false,
            neighbourhood: Some(Neighbourhood::Moore),
            wall_threshold: 5,
            space_threshold: 3,
            iterations: 5,
            entrances: Entrances::default(),
            pass_mode: PassMode::InPlace,
        }
    }
}

/// Neighbourhood as written in a config file, where "none" is spelled out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum NeighbourhoodSetting {
    None,
    VonNeumann,
    Moore,
    MooreExtended,
}

impl From<Option<Neighbourhood>> for NeighbourhoodSetting {
    fn from(mode: Option<Neighbourhood>) -> Self {
        match mode {
            None => NeighbourhoodSetting::None,
            Some(Neighbourhood::VonNeumann) => NeighbourhoodSetting::VonNeumann,
            Some(Neighbourhood::Moore) => NeighbourhoodSetting::Moore,
            Some(Neighbourhood::MooreExtended) => NeighbourhoodSetting::MooreExtended,
        }
    }
}

impl From<NeighbourhoodSetting> for Option<Neighbourhood> {
    fn from(setting: NeighbourhoodSetting) -> Self {
        match setting {
            NeighbourhoodSetting::None => None,
            NeighbourhoodSetting::VonNeumann => Some(Neighbourhood::VonNeumann),
            NeighbourhoodSetting::Moore => Some(Neighbourhood::Moore),
            NeighbourhoodSetting::MooreExtended => Some(Neighbourhood::MooreExtended),
        }
    }
}

/// On-disk layout of [`GenerationConfig`]
///
/// `neighbourhood` and the three flags are all optional here so that an
/// absent key can be told apart from an explicit choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    width: i32,
    height: i32,
    fill_percent: i32,
    seed: String,
    use_random_seed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    neighbourhood: Option<NeighbourhoodSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    von_neumann: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moore_extended: Option<bool>,
    wall_threshold: i32,
    space_threshold: i32,
    iterations: i32,
    pass_mode: PassMode,
    // Tables go after plain values in TOML
    entrances: Entrances,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            neighbourhood: None,
            ..ConfigFile::from(GenerationConfig::default())
        }
    }
}

impl From<GenerationConfig> for ConfigFile {
    fn from(config: GenerationConfig) -> Self {
        ConfigFile {
            width: config.width,
            height: config.height,
            fill_percent: config.fill_percent,
            seed: config.seed,
            use_random_seed: config.use_random_seed,
            neighbourhood: Some(config.neighbourhood.into()),
            von_neumann: None,
            moore: None,
            moore_extended: None,
            wall_threshold: config.wall_threshold,
            space_threshold: config.space_threshold,
            iterations: config.iterations,
            pass_mode: config.pass_mode,
            entrances: config.entrances,
        }
    }
}

impl TryFrom<ConfigFile> for GenerationConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let flags_given =
            file.von_neumann.is_some() || file.moore.is_some() || file.moore_extended.is_some();
        let neighbourhood = match (file.neighbourhood, flags_given) {
            (Some(_), true) => return Err(ConfigError::ConflictingNeighbourhood),
            (Some(setting), false) => setting.into(),
            // Flags present but all false select no neighbourhood
            (None, true) => NeighbourhoodFlags {
                von_neumann: file.von_neumann.unwrap_or(false),
                moore: file.moore.unwrap_or(false),
                moore_extended: file.moore_extended.unwrap_or(false),
            }
            .select(),
            (None, false) => GenerationConfig::default().neighbourhood,
        };

        Ok(GenerationConfig {
            width: file.width,
            height: file.height,
            fill_percent: file.fill_percent,
            seed: file.seed,
            use_random_seed: file.use_random_seed,
            neighbourhood,
            wall_threshold: file.wall_threshold,
            space_threshold: file.space_threshold,
            iterations: file.iterations,
            entrances: file.entrances,
            pass_mode: file.pass_mode,
        })
    }
}

/// A config that passed validation, in the types the pipeline works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub width: usize,
    pub height: usize,
    pub fill_percent: u32,
    pub seed: SeedSource,
    pub neighbourhood: Option<Neighbourhood>,
    pub rules: Rules,
    pub iterations: usize,
    pub entrances: Vec<Direction>,
    pub entrance: Entrance,
    pub pass_mode: PassMode,
}

fn non_negative(name: &'static str, value: i32) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| ConfigError::Negative { name, value })
}

impl GenerationConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check preconditions and convert into pipeline parameters
    pub fn validate(&self) -> Result<GenerationParams, ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0..=100).contains(&self.fill_percent) {
            return Err(ConfigError::FillPercentOutOfRange(self.fill_percent));
        }
        let rules = Rules {
            wall_threshold: non_negative("wall threshold", self.wall_threshold)?,
            space_threshold: non_negative("space threshold", self.space_threshold)?,
        };
        let iterations = non_negative("iterations", self.iterations)?;
        let entrance = Entrance {
            width: non_negative("entrance width", self.entrances.width)? as usize,
            depth: non_negative("entrance depth", self.entrances.depth)? as usize,
        };

        Ok(GenerationParams {
            width: self.width as usize,
            height: self.height as usize,
            fill_percent: self.fill_percent as u32,
            seed: SeedSource::new(&self.seed, self.use_random_seed),
            neighbourhood: self.neighbourhood,
            rules,
            iterations: iterations as usize,
            entrances: self.entrances.enabled(),
            entrance,
            pass_mode: self.pass_mode,
        })
    }
}
