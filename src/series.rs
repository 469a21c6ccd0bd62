//! Fixed-capacity rolling series for live charting.
//!
//! Each series holds at most `capacity` samples. Appending to a full
//! series resets it first and then writes, so memory stays bounded no
//! matter how long the simulation runs and a fixed-width chart can be
//! reused across repeated bounded-length runs.

use std::collections::HashMap;

/// Presentational classification against a series threshold. Has no
/// effect on buffer mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleClass {
    Above,
    Below,
}

#[derive(Debug, Clone)]
pub struct RollingSeries {
    xs: Box<[f32]>,
    ys: Box<[f32]>,
    write_index: usize,
    threshold: Option<f32>,
}

impl RollingSeries {
    fn new(capacity: usize, threshold: Option<f32>) -> Self {
        // A zero-capacity series could never accept a sample.
        let capacity = capacity.max(1);
        Self {
            xs: vec![0.0; capacity].into_boxed_slice(),
            ys: vec![0.0; capacity].into_boxed_slice(),
            write_index: 0,
            threshold,
        }
    }

    pub fn capacity(&self) -> usize {
        self.xs.len()
    }

    /// Accepted samples since the last reset.
    pub fn len(&self) -> usize {
        self.write_index
    }

    pub fn is_empty(&self) -> bool {
        self.write_index == 0
    }

    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs[..self.write_index]
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys[..self.write_index]
    }

    pub fn latest(&self) -> Option<(f32, f32)> {
        if self.write_index == 0 {
            return None;
        }
        let i = self.write_index - 1;
        Some((self.xs[i], self.ys[i]))
    }

    fn reset(&mut self) {
        self.write_index = 0;
    }

    fn push(&mut self, x: Option<f32>, y: f32) -> Option<SampleClass> {
        if self.write_index == self.capacity() {
            // Hard wraparound: restart the series rather than erroring
            // or dropping the sample.
            self.reset();
        }

        let i = self.write_index;
        self.xs[i] = x.unwrap_or(i as f32);
        self.ys[i] = y;
        self.write_index += 1;

        self.threshold.map(|t| {
            if y >= t {
                SampleClass::Above
            } else {
                SampleClass::Below
            }
        })
    }
}

/// Named multi-series store with one shared capacity.
#[derive(Debug)]
pub struct SeriesBuffer {
    capacity: usize,
    series: HashMap<String, RollingSeries>,
}

impl SeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            series: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Declare a series with a presentational threshold. Appending to an
    /// undeclared name also works; it just has no threshold.
    pub fn define_with_threshold(&mut self, name: &str, threshold: f32) {
        self.series
            .entry(name.to_string())
            .or_insert_with(|| RollingSeries::new(self.capacity, Some(threshold)));
    }

    /// Append one sample. `x` defaults to the series' own sample count,
    /// an implicit tick counter.
    pub fn append(&mut self, name: &str, x: Option<f32>, y: f32) -> Option<SampleClass> {
        let capacity = self.capacity;
        self.series
            .entry(name.to_string())
            .or_insert_with(|| RollingSeries::new(capacity, None))
            .push(x, y)
    }

    /// Restart one series on an external event boundary.
    pub fn reset(&mut self, name: &str) {
        if let Some(series) = self.series.get_mut(name) {
            series.reset();
        }
    }

    /// Restart every series (e.g. when a new simulation run starts).
    pub fn reset_all(&mut self) {
        for series in self.series.values_mut() {
            series.reset();
        }
    }

    pub fn get(&self, name: &str) -> Option<&RollingSeries> {
        self.series.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RollingSeries)> {
        self.series.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Most recent y value per series, for bar-style "current value"
    /// views. Entries are ordered by series name so the view draws the
    /// same layout every frame.
    pub fn latest(&self) -> Vec<(&str, f32)> {
        let mut entries: Vec<(&str, f32)> = self
            .series
            .iter()
            .filter_map(|(name, s)| s.latest().map(|(_, y)| (name.as_str(), y)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
