mod cube;
mod cubes;
mod spirograph;

pub use cube::RotatingCube;
pub use cubes::CubeTrio;
pub use spirograph::SpirographDemo;

use crate::camera::PerspectiveCamera;
use crate::config::{AppConfig, ConfigError, DemoKind};
use crate::frame::FrameInfo;
use crate::scene::Scene;

/// One animated demo: builds its scene once, then updates it every frame.
pub trait Demo {
    fn name(&self) -> &str;

    /// Attaches the initial nodes.
    fn setup(&mut self, scene: &mut Scene);

    /// Advances the animation by one frame.
    fn update(&mut self, frame: &FrameInfo, scene: &mut Scene);

    fn camera(&self) -> &PerspectiveCamera;

    fn camera_mut(&mut self) -> &mut PerspectiveCamera;

    /// Extra line for the overlay.
    fn status(&self) -> Option<String> {
        None
    }
}

/// Builds the demo selected in `config`, resolving its parameters.
pub fn create_demo(config: &AppConfig) -> Result<Box<dyn Demo>, ConfigError> {
    let demo: Box<dyn Demo> = match config.demo {
        DemoKind::Cube => Box::new(RotatingCube::new()),
        DemoKind::Cubes => Box::new(CubeTrio::new()),
        DemoKind::Spiro => Box::new(SpirographDemo::new(&config.spiro.resolve()?)),
    };
    log::info!("demo: {}", demo.name());
    Ok(demo)
}

/// Camera shared by the cube demos: 75° fov, canvas-default aspect, z = 2.
fn cube_camera() -> PerspectiveCamera {
    PerspectiveCamera::new(75.0, 2.0, 0.1, 5.0).with_position(glam::Vec3::new(0.0, 0.0, 2.0))
}
