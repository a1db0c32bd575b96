use super::{DirectionalLight, Drawable, LineSegment, Mesh, NodeHandle};

/// The attach/detach surface of a scene graph.
///
/// Owners keep the returned handle and detach through it; nothing looks a
/// node up by name or contents.
pub trait SceneGraph {
    /// Adds a leaf node and returns its handle.
    fn attach(&mut self, drawable: Drawable) -> NodeHandle;

    /// Removes the node behind `handle`, returning it. Stale handles return `None`.
    fn detach(&mut self, handle: NodeHandle) -> Option<Drawable>;

    /// Whether `handle` refers to a live node.
    fn contains(&self, handle: NodeHandle) -> bool;

    /// Number of live nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    drawable: Option<Drawable>,
}

/// Slot-based scene graph.
///
/// - `attach` is O(1), reusing freed slots first
/// - `detach` is O(1) and bumps the slot generation
/// - iteration walks slots in index order, skipping empty ones
#[derive(Debug, Clone)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    background: [f32; 3],
    light: Option<DirectionalLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            background: [0.0, 0.0, 0.0],
            light: None,
        }
    }

    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    pub fn set_background(&mut self, color: [f32; 3]) {
        self.background = color;
    }

    pub fn light(&self) -> Option<&DirectionalLight> {
        self.light.as_ref()
    }

    pub fn set_light(&mut self, light: Option<DirectionalLight>) {
        self.light = light;
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&Drawable> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.drawable.as_ref())
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Drawable> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.drawable.as_mut())
    }

    /// Shorthand for mutating a mesh node in place.
    pub fn mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        self.get_mut(handle).and_then(Drawable::as_mesh_mut)
    }

    /// Live nodes with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Drawable)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.drawable
                .as_ref()
                .map(|d| (NodeHandle::new(index as u32, slot.generation), d))
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.iter().filter_map(|(_, d)| d.as_mesh())
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSegment> {
        self.iter().filter_map(|(_, d)| d.as_line())
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Detaches every node. Outstanding handles all become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.drawable.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn attach(&mut self, drawable: Drawable) -> NodeHandle {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.drawable = Some(drawable);
            return NodeHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            drawable: Some(drawable),
        });
        NodeHandle::new(index, 0)
    }

    fn detach(&mut self, handle: NodeHandle) -> Option<Drawable> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let drawable = slot.drawable.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(drawable)
    }

    fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    fn len(&self) -> usize {
        self.live
    }
}
