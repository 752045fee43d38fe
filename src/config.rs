use std::io::Read;
use std::path::Path;

use crate::engine::{MergeRule, FOUR_PROBABILITY, GRID_SIZE};
use crate::error::ConfigError;

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 16;

/// Settings for one play session.
///
/// Every field may be omitted from the TOML; missing keys take the classic
/// 4x4 defaults.
///
/// ```
/// use game_2048::config::GameConfig;
/// use game_2048::engine::MergeRule;
/// let cfg = GameConfig::from_toml_str("grid_size = 5\nmerge_rule = \"chained\"").unwrap();
/// assert_eq!(cfg.grid_size, 5);
/// assert_eq!(cfg.merge_rule, MergeRule::Chained);
/// assert_eq!(cfg.initial_tiles, 2);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default = "defaults::grid_size")]
    pub grid_size: usize,
    /// Chance that a spawned tile is a 4 (the rest are 2s).
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
    #[serde(default)]
    pub merge_rule: MergeRule,
    /// Tiles placed on a fresh grid at start and on restart.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,
    /// Seed for the tile RNG; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: defaults::grid_size(),
            four_probability: defaults::four_probability(),
            merge_rule: MergeRule::default(),
            initial_tiles: defaults::initial_tiles(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }
        if self.initial_tiles > self.grid_size * self.grid_size {
            return Err(ConfigError::InitialTiles { tiles: self.initial_tiles, size: self.grid_size });
        }
        Ok(())
    }
}

mod defaults {
    pub fn grid_size() -> usize { super::GRID_SIZE }
    pub fn four_probability() -> f64 { super::FOUR_PROBABILITY }
    pub fn initial_tiles() -> usize { 2 }
}
