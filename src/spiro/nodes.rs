use std::f32::consts::TAU;
use std::num::NonZeroUsize;
use std::ops::Index;

use glam::{Mat3, Vec3};

/// Ring of points the spirograph connects, generated once.
///
/// Node 0 sits at `(0, magnitude, 0)`. Every following node is the previous
/// one rotated by `TAU / count` about Z, with its Z replaced by
/// `sin(k) * magnitude` where `k` is the node's generation index. The Z
/// wobble follows generation order, not angle.
#[derive(Debug, Clone, PartialEq)]
pub struct PerimeterNodes {
    nodes: Vec<Vec3>,
    magnitude: f32,
}

impl PerimeterNodes {
    pub fn generate(count: NonZeroUsize, magnitude: f32) -> Self {
        let count = count.get();
        let step = Mat3::from_rotation_z(TAU / count as f32);

        let mut nodes = Vec::with_capacity(count);
        let mut current = Vec3::new(0.0, magnitude, 0.0);
        nodes.push(current);

        for k in 1..count {
            current = step * current;
            current.z = (k as f32).sin() * magnitude;
            nodes.push(current);
        }

        Self { nodes, magnitude }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.nodes.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.nodes.iter()
    }
}

impl Index<usize> for PerimeterNodes {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.nodes[index]
    }
}
