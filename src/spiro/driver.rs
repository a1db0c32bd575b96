use crate::config::SpiroParams;
use crate::math::{hsv_to_rgb, srgb_to_linear};
use crate::scene::{LineSegment, Scene, SceneGraph, SegmentId};

use super::{IndexWalk, LineBuffer, PerimeterNodes, WalkStep};

const SATURATION: f32 = 0.8;
const VALUE: f32 = 0.9;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub segment: SegmentId,
    pub step: WalkStep,
    pub evicted: Option<SegmentId>,
}

/// Owns all spirograph state and advances it one segment per tick.
#[derive(Debug, Clone)]
pub struct SpiroDriver {
    nodes: PerimeterNodes,
    walk: IndexWalk,
    buffer: LineBuffer,
    hue_start: f32,
    hue_step: f32,
    ticks: u64,
}

impl SpiroDriver {
    pub fn new(params: &SpiroParams) -> Self {
        Self {
            nodes: PerimeterNodes::generate(params.node_count, params.magnitude),
            walk: IndexWalk::new(params.node_count, params.multiplier),
            buffer: LineBuffer::new(params.max_segments),
            hue_start: params.hue_start,
            hue_step: params.hue_step,
            ticks: 0,
        }
    }

    /// Connects the next pair of nodes and pushes the segment into the buffer,
    /// evicting the oldest one if the buffer overflows.
    pub fn tick<G>(&mut self, graph: &mut G) -> TickOutcome
    where
        G: SceneGraph + ?Sized,
    {
        let step = self.walk.step();
        let color = self.color_at(self.ticks);
        self.ticks += 1;

        let id = SegmentId(self.ticks);
        let segment = LineSegment::new(id, self.nodes[step.from], self.nodes[step.to], color);
        let evicted = self.buffer.push(segment, graph).map(|s| s.id);

        TickOutcome {
            segment: id,
            step,
            evicted,
        }
    }

    /// Line color for the zero-based tick `tick`, linear RGB.
    pub fn color_at(&self, tick: u64) -> [f32; 3] {
        let hue = (self.hue_start as f64 + tick as f64 * self.hue_step as f64).rem_euclid(1.0) as f32;
        srgb_to_linear(hsv_to_rgb(hue, SATURATION, VALUE))
    }

    pub fn nodes(&self) -> &PerimeterNodes {
        &self.nodes
    }

    pub fn walk(&self) -> &IndexWalk {
        &self.walk
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Summary of a windowless run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub ticks: u64,
    pub live_segments: usize,
    pub scene_nodes: usize,
    pub oldest: Option<SegmentId>,
    pub newest: Option<SegmentId>,
    pub evictions: u64,
    /// Buffer and scene held exactly the same segments after every tick.
    pub in_sync: bool,
}

/// Runs the driver for `ticks` ticks against an in-memory scene.
pub fn simulate(params: &SpiroParams, ticks: u64) -> SimulationReport {
    let mut scene = Scene::new();
    let mut driver = SpiroDriver::new(params);
    let mut evictions = 0;
    let mut in_sync = true;

    for _ in 0..ticks {
        let outcome = driver.tick(&mut scene);
        if outcome.evicted.is_some() {
            evictions += 1;
        }
        in_sync &= scene.len() == driver.buffer().len() && driver.buffer().is_attached_to(&scene);
    }

    let buffer = driver.buffer();
    SimulationReport {
        ticks: driver.ticks(),
        live_segments: buffer.len(),
        scene_nodes: scene.len(),
        oldest: buffer.oldest().map(|s| s.id),
        newest: buffer.newest().map(|s| s.id),
        evictions,
        in_sync,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SpiroParams {
        SpiroParams::new(5, 1.0, 3, 4).unwrap().with_hue(0.0, 0.1).unwrap()
    }

    #[test]
    fn first_tick_connects_node_zero_to_itself() {
        let mut scene = Scene::new();
        let mut driver = SpiroDriver::new(&params());

        let outcome = driver.tick(&mut scene);

        assert_eq!(outcome.segment, SegmentId(1));
        assert_eq!(outcome.step, WalkStep { from: 0, to: 0 });
        assert_eq!(outcome.evicted, None);

        let line = scene.lines().next().unwrap();
        assert_eq!(line.start, driver.nodes()[0]);
        assert_eq!(line.end, driver.nodes()[0]);
    }

    #[test]
    fn segment_endpoints_are_copied_nodes() {
        let mut scene = Scene::new();
        let mut driver = SpiroDriver::new(&params());
        driver.tick(&mut scene);
        driver.tick(&mut scene);

        let newest = *driver.buffer().newest().unwrap();
        assert_eq!(newest.start, driver.nodes()[1]);
        assert_eq!(newest.end, driver.nodes()[3]);
    }

    #[test]
    fn color_advances_with_tick() {
        let driver = SpiroDriver::new(&params());
        assert_ne!(driver.color_at(0), driver.color_at(1));
        // hue step 0.1 wraps after ten ticks
        let a = driver.color_at(0);
        let b = driver.color_at(10);
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-4);
        }
    }

    #[test]
    fn simulate_counts_evictions() {
        let report = simulate(&params(), 10);
        assert_eq!(report.ticks, 10);
        assert_eq!(report.live_segments, 4);
        assert_eq!(report.evictions, 6);
        assert_eq!(report.oldest, Some(SegmentId(7)));
        assert_eq!(report.newest, Some(SegmentId(10)));
        assert!(report.in_sync);
    }

    #[test]
    fn hue_keeps_advancing_on_long_runs() {
        let driver = SpiroDriver::new(&params());
        let tick = 1u64 << 24;
        assert_ne!(driver.color_at(tick), driver.color_at(tick + 1));

        let hue = (tick as f64 * 0.1f32 as f64).rem_euclid(1.0) as f32;
        let expected = srgb_to_linear(hsv_to_rgb(hue, SATURATION, VALUE));
        let actual = driver.color_at(tick);
        for i in 0..3 {
            assert!((actual[i] - expected[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn huge_segment_cap_builds_and_ticks() {
        let params = SpiroParams::new(5, 1.0, 3, usize::MAX).unwrap();
        let mut scene = Scene::new();
        let mut driver = SpiroDriver::new(&params);

        for _ in 0..5 {
            assert_eq!(driver.tick(&mut scene).evicted, None);
        }
        assert_eq!(driver.buffer().len(), 5);
        assert_eq!(scene.len(), 5);
    }
}
