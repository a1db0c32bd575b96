use std::f32::consts::TAU;
use std::num::NonZeroUsize;

use glam::Vec3;
use wgpu_primer::config::SpiroParams;
use wgpu_primer::scene::{Drawable, LineSegment, NodeHandle, Scene, SceneGraph, SegmentId};
use wgpu_primer::spiro::{simulate, times_table, IndexWalk, LineBuffer, PerimeterNodes, SpiroDriver};

/// Scene wrapper that records every attach and detach.
#[derive(Default)]
struct RecordingGraph {
    inner: Scene,
    attached: Vec<SegmentId>,
    detached: Vec<SegmentId>,
}

impl SceneGraph for RecordingGraph {
    fn attach(&mut self, drawable: Drawable) -> NodeHandle {
        if let Some(line) = drawable.as_line() {
            self.attached.push(line.id);
        }
        self.inner.attach(drawable)
    }

    fn detach(&mut self, handle: NodeHandle) -> Option<Drawable> {
        let removed = self.inner.detach(handle);
        if let Some(line) = removed.as_ref().and_then(Drawable::as_line) {
            self.detached.push(line.id);
        }
        removed
    }

    fn contains(&self, handle: NodeHandle) -> bool {
        self.inner.contains(handle)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn segment(id: u64) -> LineSegment {
    LineSegment::new(SegmentId(id), Vec3::ZERO, Vec3::X, [0.5, 0.5, 0.5])
}

#[cfg(test)]
mod perimeter_tests {
    use super::*;

    #[test]
    fn test_node_count_and_first_node() {
        let nodes = PerimeterNodes::generate(nz(96), 32.0);

        assert_eq!(nodes.len(), 96);
        assert_eq!(nodes[0], Vec3::new(0.0, 32.0, 0.0));
    }

    #[test]
    fn test_consecutive_nodes_are_one_angular_step_apart() {
        let count = 12;
        let nodes = PerimeterNodes::generate(nz(count), 5.0);
        let step = TAU / count as f32;

        for pair in nodes.as_slice().windows(2) {
            let a = pair[0].truncate();
            let b = pair[1].truncate();
            let angle = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0).acos();
            assert!((angle - step).abs() < 1e-3, "angle {angle} vs step {step}");
            assert!((b.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_z_wobble_follows_generation_index() {
        let nodes = PerimeterNodes::generate(nz(8), 2.0);
        for k in 1..8 {
            assert!((nodes[k].z - (k as f32).sin() * 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_node_perimeter() {
        let nodes = PerimeterNodes::generate(nz(1), 3.0);
        assert_eq!(nodes.as_slice(), &[Vec3::new(0.0, 3.0, 0.0)]);
    }
}

#[cfg(test)]
mod walk_tests {
    use super::*;

    #[test]
    fn test_times_table_multiplier_three_over_five() {
        let walk = IndexWalk::new(nz(5), 3);
        let targets: Vec<usize> = walk.take(6).map(|s| s.to).collect();
        assert_eq!(targets, vec![0, 3, 1, 4, 2, 0]);
    }

    #[test]
    fn test_walk_is_periodic_in_node_count() {
        let mut walk = IndexWalk::new(nz(7), 4);
        let first: Vec<_> = walk.by_ref().take(7).collect();
        let second: Vec<_> = walk.by_ref().take(7).collect();

        assert_eq!(first, second);
        assert_eq!(walk.position(), 0);
        assert_eq!(first.iter().map(|s| s.from).collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_multiplier_larger_than_node_count_wraps() {
        assert_eq!(times_table(2, 13, nz(5)), 1);
        assert_eq!(times_table(4, 0, nz(5)), 0);
    }
}

#[cfg(test)]
mod buffer_tests {
    use super::*;

    #[test]
    fn test_fifo_keeps_newest_after_overflow() {
        let mut graph = RecordingGraph::default();
        let mut buffer = LineBuffer::new(10);

        for id in 1..=25 {
            buffer.push(segment(id), &mut graph);
        }

        let ids: Vec<u64> = buffer.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, (16..=25).collect::<Vec<_>>());
        assert_eq!(graph.detached, (1..=15).map(SegmentId).collect::<Vec<_>>());
    }

    #[test]
    fn test_buffer_and_graph_stay_in_lock_step() {
        let mut graph = RecordingGraph::default();
        let mut buffer = LineBuffer::new(4);

        for id in 1..=50 {
            buffer.push(segment(id), &mut graph);
            assert_eq!(graph.len(), buffer.len());
            assert!(buffer.is_attached_to(&graph));
            assert!(buffer.len() <= 4);
        }

        assert_eq!(graph.attached.len(), 50);
        assert_eq!(graph.detached.len(), 46);
        assert!(graph.inner.lines().all(|line| line.id.0 > 46));
    }

    #[test]
    fn test_stale_handles_miss_after_eviction() {
        let mut scene = Scene::new();
        let mut buffer = LineBuffer::new(1);

        buffer.push(segment(1), &mut scene);
        let first = buffer.handles().next().unwrap();
        buffer.push(segment(2), &mut scene);

        assert!(!scene.contains(first));
        assert_eq!(scene.len(), 1);
    }
}

#[cfg(test)]
mod driver_tests {
    use super::*;

    #[test]
    fn test_reference_run_keeps_last_two_thousand() {
        let params = SpiroParams::new(96, 32.0, 7, 2000).unwrap();
        let report = simulate(&params, 3000);

        assert_eq!(report.ticks, 3000);
        assert_eq!(report.live_segments, 2000);
        assert_eq!(report.scene_nodes, 2000);
        assert_eq!(report.oldest, Some(SegmentId(1001)));
        assert_eq!(report.newest, Some(SegmentId(3000)));
        assert_eq!(report.evictions, 1000);
        assert!(report.in_sync);
    }

    #[test]
    fn test_segments_connect_walk_endpoints() {
        let params = SpiroParams::new(5, 1.0, 3, 100).unwrap();
        let mut graph = RecordingGraph::default();
        let mut driver = SpiroDriver::new(&params);

        for _ in 0..6 {
            let outcome = driver.tick(&mut graph);
            let line = driver.buffer().newest().unwrap();
            assert_eq!(line.id, outcome.segment);
            assert_eq!(line.start, driver.nodes()[outcome.step.from]);
            assert_eq!(line.end, driver.nodes()[outcome.step.to]);
        }

        assert_eq!(graph.attached.len(), 6);
        assert!(graph.detached.is_empty());
    }

    #[test]
    fn test_short_run_never_evicts() {
        let params = SpiroParams::new(48, 10.0, 2, 2000).unwrap();
        let report = simulate(&params, 10);

        assert_eq!(report.live_segments, 10);
        assert_eq!(report.evictions, 0);
        assert_eq!(report.oldest, Some(SegmentId(1)));
    }
}
