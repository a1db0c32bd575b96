//! Demo configuration.
//!
//! A JSON file (all fields optional) is layered under command line flags.
//! Spirograph parameters left unset are drawn from a seeded `SmallRng` so a
//! run can be replayed from the logged seed.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on live spirograph segments.
pub const DEFAULT_MAX_SEGMENTS: usize = 2000;
/// Default perimeter radius.
pub const DEFAULT_MAGNITUDE: f32 = 32.0;
/// Default hue advance per tick.
pub const DEFAULT_HUE_STEP: f32 = 0.0005;

/// Range the node count is drawn from when not configured.
const NODE_COUNT_RANGE: std::ops::RangeInclusive<usize> = 48..=240;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("node count must be at least 1")]
    InvalidNodeCount,

    #[error("max segments must be at least 1")]
    InvalidMaxSegments,

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Which demo the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// Single flat-shaded rotating cube
    Cube,
    /// Three lit cubes spinning at different speeds
    Cubes,
    /// Modular times-table line animation
    #[default]
    Spiro,
}

/// Spirograph settings as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiroConfig {
    pub seed: Option<u64>,
    pub node_count: Option<usize>,
    pub magnitude: f32,
    pub multiplier: Option<u32>,
    pub max_segments: usize,
    pub hue_start: Option<f32>,
    pub hue_step: f32,
}

impl Default for SpiroConfig {
    fn default() -> Self {
        Self {
            seed: None,
            node_count: None,
            magnitude: DEFAULT_MAGNITUDE,
            multiplier: None,
            max_segments: DEFAULT_MAX_SEGMENTS,
            hue_start: None,
            hue_step: DEFAULT_HUE_STEP,
        }
    }
}

impl SpiroConfig {
    /// Fills unset values from the seeded RNG and validates the result.
    pub fn resolve(&self) -> Result<SpiroParams, ConfigError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);

        let node_count = match self.node_count {
            Some(n) => n,
            None => rng.gen_range(NODE_COUNT_RANGE),
        };
        let multiplier = match self.multiplier {
            Some(m) => m,
            None if node_count >= 2 => rng.gen_range(2..=node_count as u32),
            None => 2,
        };
        let hue_start = match self.hue_start {
            Some(h) => h,
            None => rng.gen::<f32>(),
        };

        let params = SpiroParams::new(node_count, self.magnitude, multiplier, self.max_segments)?
            .with_hue(hue_start, self.hue_step)?
            .with_seed(seed);

        log::info!(
            "spirograph parameters: seed={} nodes={} magnitude={} multiplier={} max_segments={}",
            params.seed,
            params.node_count,
            params.magnitude,
            params.multiplier,
            params.max_segments
        );

        Ok(params)
    }
}

/// Validated spirograph parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiroParams {
    pub node_count: NonZeroUsize,
    pub magnitude: f32,
    pub multiplier: u32,
    pub max_segments: usize,
    pub hue_start: f32,
    pub hue_step: f32,
    /// Seed the unset values were drawn with; 0 when fully specified by hand.
    pub seed: u64,
}

impl SpiroParams {
    pub fn new(
        node_count: usize,
        magnitude: f32,
        multiplier: u32,
        max_segments: usize,
    ) -> Result<Self, ConfigError> {
        let node_count = NonZeroUsize::new(node_count).ok_or(ConfigError::InvalidNodeCount)?;
        if max_segments == 0 {
            return Err(ConfigError::InvalidMaxSegments);
        }
        ensure_finite("magnitude", magnitude)?;

        Ok(Self {
            node_count,
            magnitude,
            multiplier,
            max_segments,
            hue_start: 0.0,
            hue_step: DEFAULT_HUE_STEP,
            seed: 0,
        })
    }

    pub fn with_hue(mut self, start: f32, step: f32) -> Result<Self, ConfigError> {
        ensure_finite("hue_start", start)?;
        ensure_finite("hue_step", step)?;
        self.hue_start = start.rem_euclid(1.0);
        self.hue_step = step;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

fn ensure_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Top-level config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub demo: DemoKind,
    pub spiro: SpiroConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
