// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, ConfigError, DemoKind};

#[derive(Parser, Debug, Clone)]
#[command(name = "wgpu-primer")]
#[command(about = "Rotating cubes and a times-table spirograph on wgpu", long_about = None)]
pub struct Cli {
    /// Demo to run (overrides the config file)
    #[arg(long, value_enum)]
    pub demo: Option<DemoKind>,

    /// JSON config file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Seed for spirograph values that are not set explicitly
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of perimeter nodes
    #[arg(long = "nodes")]
    pub node_count: Option<usize>,

    /// Radius of the node perimeter
    #[arg(long)]
    pub magnitude: Option<f32>,

    /// Times-table multiplier
    #[arg(long)]
    pub multiplier: Option<u32>,

    /// Maximum number of live segments
    #[arg(long = "max-segments")]
    pub max_segments: Option<usize>,

    /// Disable the egui overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Log filter, e.g. "debug" (falls back to RUST_LOG)
    #[arg(long = "log")]
    pub log_filter: Option<String>,

    /// Run the spirograph without a window and print a summary
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value_t = 3000)]
    pub ticks: u64,
}

impl Cli {
    /// Loads the config file, if any, then applies flags on top.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(demo) = self.demo {
            config.demo = demo;
        }
        let spiro = &mut config.spiro;
        if self.seed.is_some() {
            spiro.seed = self.seed;
        }
        if self.node_count.is_some() {
            spiro.node_count = self.node_count;
        }
        if let Some(magnitude) = self.magnitude {
            spiro.magnitude = magnitude;
        }
        if self.multiplier.is_some() {
            spiro.multiplier = self.multiplier;
        }
        if let Some(max_segments) = self.max_segments {
            spiro.max_segments = max_segments;
        }
    }
}
