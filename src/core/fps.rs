/// Frames-per-second estimate, refreshed once per `interval` seconds.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Records one frame. Returns the new estimate when the interval rolls over.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.interval {
            return None;
        }

        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    /// Latest estimate, 0 until the first interval completes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_interval() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..3 {
            assert!(counter.tick(0.25).is_none());
        }
        assert_eq!(counter.tick(0.25), Some(4.0));
        assert_eq!(counter.fps(), 4.0);

        // counters restart for the next interval
        assert!(counter.tick(0.25).is_none());
    }

    #[test]
    fn zero_before_first_report() {
        let mut counter = FpsCounter::default();
        counter.tick(0.1);
        assert_eq!(counter.fps(), 0.0);
    }
}
