use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::frame::FrameInfo;
use crate::math::{hex_to_linear, Transform};
use crate::scene::{BoxGeometry, DirectionalLight, Material, Mesh, NodeHandle, Scene, SceneGraph};

use super::{cube_camera, Demo};

const SHININESS: f32 = 30.0;

/// (color, x offset) per cube, in the order their speeds are assigned.
const CUBES: [(u32, f32); 3] = [(0x44aa88, 0.0), (0x8844aa, -2.0), (0xaa8844, 2.0)];

/// Three lit cubes, each spinning a little faster than the last.
pub struct CubeTrio {
    camera: PerspectiveCamera,
    cubes: Vec<(NodeHandle, f32)>,
}

impl CubeTrio {
    pub fn new() -> Self {
        Self {
            camera: cube_camera(),
            cubes: Vec::with_capacity(CUBES.len()),
        }
    }

    /// Handles paired with their rotation speed (radians per second).
    pub fn cubes(&self) -> &[(NodeHandle, f32)] {
        &self.cubes
    }
}

impl Default for CubeTrio {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for CubeTrio {
    fn name(&self) -> &str {
        "cubes"
    }

    fn setup(&mut self, scene: &mut Scene) {
        scene.set_light(Some(DirectionalLight::new(
            [1.0, 1.0, 1.0],
            1.0,
            Vec3::new(-1.0, 2.0, 4.0),
        )));

        for (i, (color, x)) in CUBES.into_iter().enumerate() {
            let mesh = Mesh::new(
                BoxGeometry::cube(1.0),
                Material::Lit {
                    color: hex_to_linear(color),
                    shininess: SHININESS,
                },
            )
            .with_transform(Transform::at(Vec3::new(x, 0.0, 0.0)));

            let speed = 1.0 + i as f32 * 0.1;
            self.cubes.push((scene.attach(mesh.into()), speed));
        }
    }

    fn update(&mut self, frame: &FrameInfo, scene: &mut Scene) {
        for &(handle, speed) in &self.cubes {
            if let Some(mesh) = scene.mesh_mut(handle) {
                let rotation = frame.time * speed;
                mesh.transform.rotation.x = rotation;
                mesh.transform.rotation.y = rotation;
            }
        }
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
    fn setup_adds_light_and_three_lit_cubes() {
        let mut scene = Scene::new();
        let mut demo = CubeTrio::new();
        demo.setup(&mut scene);

        assert_eq!(scene.mesh_count(), 3);
        assert!(scene.light().is_some());
        assert!(scene.meshes().all(|m| m.material.is_lit()));

        let xs: Vec<f32> = demo
            .cubes()
            .iter()
            .map(|&(h, _)| scene.get(h).and_then(Drawable::as_mesh).unwrap().transform.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, -2.0, 2.0]);
    }

    #[test]
    fn each_cube_spins_faster() {
        let mut scene = Scene::new();
        let mut demo = CubeTrio::new();
        demo.setup(&mut scene);
        demo.update(&FrameInfo::new(0, 2.0, 0.016), &mut scene);

        let rotations: Vec<f32> = demo
            .cubes()
            .iter()
            .map(|&(h, _)| scene.get(h).and_then(Drawable::as_mesh).unwrap().transform.rotation.y)
            .collect();
        assert!((rotations[0] - 2.0).abs() < 1e-6);
        assert!((rotations[1] - 2.2).abs() < 1e-5);
        assert!((rotations[2] - 2.4).abs() < 1e-5);
    }
}
