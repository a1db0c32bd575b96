use crate::camera::PerspectiveCamera;
use crate::frame::FrameInfo;
use crate::math::hex_to_linear;
use crate::scene::{BoxGeometry, Material, Mesh, NodeHandle, Scene, SceneGraph};

use super::{cube_camera, Demo};

const CUBE_COLOR: u32 = 0x44aa88;

/// A single flat-colored cube spinning about X and Y.
pub struct RotatingCube {
    camera: PerspectiveCamera,
    cube: Option<NodeHandle>,
}

impl RotatingCube {
    pub fn new() -> Self {
        Self {
            camera: cube_camera(),
            cube: None,
        }
    }

    pub fn cube(&self) -> Option<NodeHandle> {
        self.cube
    }
}

impl Default for RotatingCube {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for RotatingCube {
    fn name(&self) -> &str {
        "cube"
    }

    fn setup(&mut self, scene: &mut Scene) {
        let mesh = Mesh::new(
            BoxGeometry::cube(1.0),
            Material::Basic {
                color: hex_to_linear(CUBE_COLOR),
            },
        );
        self.cube = Some(scene.attach(mesh.into()));
    }

    fn update(&mut self, frame: &FrameInfo, scene: &mut Scene) {
        let Some(mesh) = self.cube.and_then(|handle| scene.mesh_mut(handle)) else {
            return;
        };
        mesh.transform.rotation.x = frame.time;
        mesh.transform.rotation.y = frame.time;
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Drawable;

    #[test]
    fn rotation_tracks_elapsed_time() {
        let mut scene = Scene::new();
        let mut demo = RotatingCube::new();
        demo.setup(&mut scene);

        demo.update(&FrameInfo::new(10, 1.25, 0.016), &mut scene);

        let handle = demo.cube().unwrap();
        let mesh = scene.get(handle).and_then(Drawable::as_mesh).unwrap();
        assert_eq!(mesh.transform.rotation.x, 1.25);
        assert_eq!(mesh.transform.rotation.y, 1.25);
        assert_eq!(mesh.transform.rotation.z, 0.0);
        assert!(!mesh.material.is_lit());
    }

    #[test]
    fn update_before_setup_is_harmless() {
        let mut scene = Scene::new();
        let mut demo = RotatingCube::new();
        demo.update(&FrameInfo::new(0, 0.5, 0.5), &mut scene);
        assert!(scene.is_empty());
    }
}
