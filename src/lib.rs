pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod logging;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod spiro;
pub mod types;

pub use config::{AppConfig, ConfigError, DemoKind, SpiroConfig, SpiroParams};
pub use scene::{Scene, SceneGraph};
pub use scenes::{create_demo, Demo};
