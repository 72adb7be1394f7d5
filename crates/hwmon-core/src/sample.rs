//! Sample averaging, graph history, and refresh cadence.

use std::collections::VecDeque;

/// Bounded FIFO of the most recent samples.
///
/// `None` samples are ignored, so the last known readings persist when
/// a sensor briefly stops reporting.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: Option<f64>) {
        let Some(v) = value else {
            return;
        };
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(v);
    }

    /// Arithmetic mean of the held samples, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Fixed-length FIFO of values plotted by a graph. Starts full of zeros.
#[derive(Debug, Clone)]
pub struct History {
    values: VecDeque<f64>,
}

impl History {
    pub fn new(len: usize) -> Self {
        Self {
            values: std::iter::repeat_n(0.0, len.max(2)).collect(),
        }
    }

    /// Appends `value`, dropping the oldest.
    pub fn push(&mut self, value: f64) {
        self.values.pop_front();
        self.values.push_back(value);
    }

    pub fn latest(&self) -> f64 {
        self.values.back().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

/// Counts ticks and fires once every `every` ticks.
#[derive(Debug, Clone)]
pub struct Cadence {
    every: usize,
    count: usize,
}

impl Cadence {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    /// Advances one tick. Returns true when the period elapses.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
            return true;
        }
        false
    }
}
