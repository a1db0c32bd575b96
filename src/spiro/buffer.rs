use std::collections::VecDeque;

use crate::scene::{Drawable, LineSegment, NodeHandle, SceneGraph};

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: NodeHandle,
    segment: LineSegment,
}

/// FIFO of at most `capacity` live segments.
///
/// Every segment in the buffer is attached to the scene graph and every
/// segment evicted from it is detached, so the two never drift apart. The
/// buffer is the only thing that attaches or detaches its segments.
/// Slots reserved up front; larger buffers grow as segments arrive.
const PREALLOCATED_ENTRIES: usize = 4096;

#[derive(Debug, Clone)]
pub struct LineBuffer {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(PREALLOCATED_ENTRIES) + 1),
            capacity,
        }
    }

    /// Appends `segment`, attaching it to `graph`.
    ///
    /// When this takes the buffer over capacity the oldest segment is
    /// detached and returned.
    pub fn push<G>(&mut self, segment: LineSegment, graph: &mut G) -> Option<LineSegment>
    where
        G: SceneGraph + ?Sized,
    {
        let handle = graph.attach(Drawable::Line(segment));
        self.entries.push_back(Entry { handle, segment });

        if self.entries.len() <= self.capacity {
            return None;
        }

        let oldest = self.entries.pop_front()?;
        if graph.detach(oldest.handle).is_none() {
            log::warn!(
                "segment {:?} was already gone from the scene when evicted",
                oldest.segment.id
            );
        }
        log::trace!("evicted segment {:?}", oldest.segment.id);
        Some(oldest.segment)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Oldest surviving segment.
    pub fn oldest(&self) -> Option<&LineSegment> {
        self.entries.front().map(|e| &e.segment)
    }

    /// Most recently pushed segment.
    pub fn newest(&self) -> Option<&LineSegment> {
        self.entries.back().map(|e| &e.segment)
    }

    pub fn get(&self, index: usize) -> Option<&LineSegment> {
        self.entries.get(index).map(|e| &e.segment)
    }

    /// Segments oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.entries.iter().map(|e| &e.segment)
    }

    /// Scene handles oldest first.
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.entries.iter().map(|e| e.handle)
    }

    /// True when every buffered handle is live in `graph`.
    pub fn is_attached_to<G>(&self, graph: &G) -> bool
    where
        G: SceneGraph + ?Sized,
    {
        self.entries.iter().all(|e| graph.contains(e.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, SegmentId};
    use glam::Vec3;

    fn segment(id: u64) -> LineSegment {
        LineSegment::new(SegmentId(id), Vec3::ZERO, Vec3::Y, [1.0, 0.0, 0.0])
    }

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(3);

        assert!(buffer.push(segment(1), &mut scene).is_none());
        assert!(buffer.push(segment(2), &mut scene).is_none());

        assert_eq!(buffer.len(), 2);
        assert_eq!(scene.len(), 2);
        assert!(!buffer.is_full());
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(2);

        buffer.push(segment(1), &mut scene);
        buffer.push(segment(2), &mut scene);
        let evicted = buffer.push(segment(3), &mut scene);

        assert_eq!(evicted.map(|s| s.id), Some(SegmentId(1)));
        assert_eq!(buffer.oldest().map(|s| s.id), Some(SegmentId(2)));
        assert_eq!(buffer.newest().map(|s| s.id), Some(SegmentId(3)));
        assert_eq!(scene.len(), 2);
        assert!(buffer.is_attached_to(&scene));
    }

    #[test]
    fn capacity_one_always_holds_latest() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(1);

        for id in 1..=5 {
            buffer.push(segment(id), &mut scene);
            assert_eq!(buffer.len(), 1);
            assert_eq!(buffer.oldest().map(|s| s.id), Some(SegmentId(id)));
            assert_eq!(scene.len(), 1);
        }
    }

    #[test]
    fn foreign_detach_is_detected() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(4);
        buffer.push(segment(1), &mut scene);

        let handle = buffer.handles().next().unwrap();
        scene.detach(handle);

        assert!(!buffer.is_attached_to(&scene));
    }

    #[test]
    fn unbounded_capacity_does_not_preallocate() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(usize::MAX);

        for id in 1..=3 {
            assert!(buffer.push(segment(id), &mut scene).is_none());
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.capacity(), usize::MAX);
        assert!(!buffer.is_full());
    }
}
