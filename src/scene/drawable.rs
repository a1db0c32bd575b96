use glam::Vec3;

use crate::math::Transform;

/// Axis-aligned box dimensions, centered on the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// How a drawable is shaded. Colors are linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Flat color, ignores lights.
    Basic { color: [f32; 3] },
    /// Diffuse + specular response to the scene's directional light.
    Lit { color: [f32; 3], shininess: f32 },
    /// Single-pixel line color.
    Line { color: [f32; 3] },
}

impl Material {
    pub fn color(&self) -> [f32; 3] {
        match *self {
            Material::Basic { color } | Material::Lit { color, .. } | Material::Line { color } => color,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Lit { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: Material,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Sequence number of a spirograph segment, starting at 1 and never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SegmentId(pub u64);

/// Line between two points, copied by value at creation and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub id: SegmentId,
    pub start: Vec3,
    pub end: Vec3,
    pub material: Material,
}

impl LineSegment {
    pub fn new(id: SegmentId, start: Vec3, end: Vec3, color: [f32; 3]) -> Self {
        Self {
            id,
            start,
            end,
            material: Material::Line { color },
        }
    }

    pub fn color(&self) -> [f32; 3] {
        self.material.color()
    }
}

/// A leaf node in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawable {
    Mesh(Mesh),
    Line(LineSegment),
}

impl Drawable {
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Drawable::Mesh(mesh) => Some(mesh),
            Drawable::Line(_) => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match self {
            Drawable::Mesh(mesh) => Some(mesh),
            Drawable::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Drawable::Line(line) => Some(line),
            Drawable::Mesh(_) => None,
        }
    }
}

impl From<Mesh> for Drawable {
    fn from(mesh: Mesh) -> Self {
        Drawable::Mesh(mesh)
    }
}

impl From<LineSegment> for Drawable {
    fn from(line: LineSegment) -> Self {
        Drawable::Line(line)
    }
}
