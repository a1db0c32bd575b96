use std::time::Instant;

/// Per-tick timing handed to demos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame counter.
    pub number: u64,
    /// Seconds since the clock started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }

    /// Frame `number` of a fixed-rate run, for windowless playback.
    pub fn fixed_rate(number: u64, delta: f32) -> Self {
        Self::new(number, number as f32 * delta, delta)
    }
}

/// Produces one `FrameInfo` per displayed frame.
///
/// Delta is capped so a stall (window drag, debugger) does not make
/// time-based animation jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    number: u64,
    max_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            number: 0,
            max_delta: 0.25,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32().min(self.max_delta);
        let time = now.duration_since(self.start).as_secs_f32();
        self.last = now;

        let info = FrameInfo::new(self.number, time, delta);
        self.number += 1;
        info
    }

    /// Frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.number
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
