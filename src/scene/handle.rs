/// Opaque identity of a node attached to a [`Scene`](super::Scene).
///
/// Slots are reused after a detach; the generation makes a stale handle
/// miss instead of aliasing whatever node took its slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeHandle {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the owning scene.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
