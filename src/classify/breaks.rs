//! Equal-Interval Breakpoints
//!
//! Five classes spanning equal slices of the observed value range,
//! irrespective of how many values fall in each slice.

use serde::Serialize;
use std::fmt;

/// A 1-based class index in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassIndex(u8);

impl ClassIndex {
    pub const COUNT: usize = 5;
    pub const LOWEST: ClassIndex = ClassIndex(1);
    /// Assigned to missing or non-numeric values
    pub const MIDDLE: ClassIndex = ClassIndex(3);
    pub const HIGHEST: ClassIndex = ClassIndex(5);

    pub fn new(n: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&n).then_some(ClassIndex(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing ramps and tallies
    pub fn slot(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = ClassIndex> {
        (1..=Self::COUNT as u8).map(ClassIndex)
    }

    /// Use a precomputed rank directly. Anything that is not an integer
    /// in 1..=5 falls back to the middle class, like a missing value.
    pub fn from_rank(rank: Option<f64>) -> ClassIndex {
        match rank {
            Some(r) if r.fract() == 0.0 && (1.0..=5.0).contains(&r) => ClassIndex(r as u8),
            _ => Self::MIDDLE,
        }
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Six non-decreasing boundaries `[b0..b5]` for the classes
/// `[b0,b1], (b1,b2], (b2,b3], (b3,b4], (b4,b5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BreakpointSet([f64; 6]);

impl BreakpointSet {
    pub fn bounds(&self) -> &[f64; 6] {
        &self.0
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[5]
    }

    /// Lower and upper boundary of one class
    pub fn range(&self, class: ClassIndex) -> (f64, f64) {
        let i = class.get() as usize;
        (self.0[i - 1], self.0[i])
    }

    pub fn classify(&self, value: Option<f64>) -> ClassIndex {
        classify(value, self)
    }

    /// How many of `values` land in each class
    pub fn class_counts(&self, values: &[f64]) -> [usize; ClassIndex::COUNT] {
        let mut counts = [0; ClassIndex::COUNT];
        for &v in values {
            counts[self.classify(Some(v)).slot()] += 1;
        }
        counts
    }
}

impl fmt::Display for BreakpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|b| format!("{:.2}", b)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Equal-interval breakpoints over the finite entries of `values`.
///
/// Returns `None` when nothing usable remains, which callers treat as
/// "classes not available yet".
pub fn compute_equal_breaks(values: &[f64]) -> Option<BreakpointSet> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    // Split before subtracting so a range wider than f64::MAX stays finite
    let n = ClassIndex::COUNT as f64;
    let step = max / n - min / n;
    let at = |k: f64| (min + k * step).min(max);
    Some(BreakpointSet([min, at(1.0), at(2.0), at(3.0), at(4.0), max]))
}

/// Map a value to its class. Upper bounds are inclusive, so a value equal
/// to a boundary belongs to the lower class; the top class also takes the
/// maximum. Missing values and NaN go to the middle class.
pub fn classify(value: Option<f64>, breaks: &BreakpointSet) -> ClassIndex {
    let v = match value {
        Some(v) if !v.is_nan() => v,
        _ => return ClassIndex::MIDDLE,
    };
    for i in 1..ClassIndex::COUNT {
        if v <= breaks.0[i] {
            return ClassIndex(i as u8);
        }
    }
    ClassIndex::HIGHEST
}
