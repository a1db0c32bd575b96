use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::SpiroParams;
use crate::frame::FrameInfo;
use crate::scene::Scene;
use crate::spiro::SpiroDriver;

use super::Demo;

/// One times-table segment per frame, oldest segments fading out of a
/// bounded buffer.
pub struct SpirographDemo {
    camera: PerspectiveCamera,
    driver: SpiroDriver,
}

impl SpirographDemo {
    pub fn new(params: &SpiroParams) -> Self {
        let m = params.magnitude.abs().max(1.0);
        let camera = PerspectiveCamera::new(75.0, 2.0, 0.1, 8.0 * m).with_position(Vec3::new(0.0, 0.0, 2.0 * m));
        Self {
            camera,
            driver: SpiroDriver::new(params),
        }
    }

    pub fn driver(&self) -> &SpiroDriver {
        &self.driver
    }
}

impl Demo for SpirographDemo {
    fn name(&self) -> &str {
        "spiro"
    }

    fn setup(&mut self, _scene: &mut Scene) {}

    fn update(&mut self, _frame: &FrameInfo, scene: &mut Scene) {
        let outcome = self.driver.tick(scene);
        if outcome.step.from == 0 {
            log::debug!(
                "walk wrapped at segment {:?}, {} live",
                outcome.segment,
                self.driver.buffer().len()
            );
        }
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    fn status(&self) -> Option<String> {
        let walk = self.driver.walk();
        Some(format!(
            "{} nodes  x{}  {}/{} segments",
            walk.len(),
            walk.multiplier(),
            self.driver.buffer().len(),
            self.driver.buffer().capacity()
        ))
    }
}
