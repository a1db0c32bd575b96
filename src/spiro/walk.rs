use std::num::NonZeroUsize;

/// Endpoint indices chosen for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    pub from: usize,
    pub to: usize,
}

/// `(a * multiplier) mod len`, computed without overflow.
pub fn times_table(a: usize, multiplier: u32, len: NonZeroUsize) -> usize {
    ((a as u128 * multiplier as u128) % len.get() as u128) as usize
}

/// Times-table walk: `from` counts `0..len` and wraps, `to` is
/// `from * multiplier mod len`.
#[derive(Debug, Clone)]
pub struct IndexWalk {
    position: usize,
    multiplier: u32,
    len: NonZeroUsize,
}

impl IndexWalk {
    pub fn new(len: NonZeroUsize, multiplier: u32) -> Self {
        Self {
            position: 0,
            multiplier,
            len,
        }
    }

    /// Returns the pair for the current position, then advances it.
    pub fn step(&mut self) -> WalkStep {
        let from = self.position;
        let to = times_table(from, self.multiplier, self.len);
        self.position = (from + 1) % self.len.get();
        WalkStep { from, to }
    }

    /// Index the next `step` will start from.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn len(&self) -> NonZeroUsize {
        self.len
    }
}

impl Iterator for IndexWalk {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        Some(self.step())
    }
}
