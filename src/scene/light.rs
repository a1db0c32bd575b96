use glam::Vec3;

/// Light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn new(color: [f32; 3], intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            position,
        }
    }

    /// Unit direction the light travels in.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or(Vec3::NEG_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_at_origin() {
        let light = DirectionalLight::new([1.0; 3], 1.0, Vec3::new(-1.0, 2.0, 4.0));
        let dir = light.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0 && dir.z < 0.0);
    }

    #[test]
    fn light_at_origin_falls_back_to_down() {
        let light = DirectionalLight::new([1.0; 3], 1.0, Vec3::ZERO);
        assert_eq!(light.direction(), Vec3::NEG_Y);
    }
}
