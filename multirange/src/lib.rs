//! Sets of non-overlapping half-open intervals, with the set operations used
//! for valid-time reasoning: union, intersection, difference and overlap
//! testing. Whenever an interval is inserted that overlaps (or is adjacent
//! to) existing intervals, they are merged, so a [`Multirange`] always tracks
//! total coverage without differentiating between the individual intervals
//! that produced it.
//!
//! # Implementation
//!
//! Internally a [`Multirange`] is a sorted `Vec` of disjoint, non-adjacent,
//! non-empty [`Interval`]s. All binary operations are linear merge-walks over
//! the two operands; insertion is linear in the number of stored intervals.
//! That is a deliberate simplification: these sets hold the valid-time
//! history of a single key, which is small, and a linear scan keeps the
//! invariants obvious.

use std::cmp::{max, min};

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)`.
///
/// An interval with `start >= end` is *empty*: it contains no points, and
/// inserting it into a [`Multirange`] is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T: Ord> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Whether the interval contains no points.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }
}

/// A set of disjoint, non-adjacent, non-empty half-open intervals, ordered by
/// start bound.
///
/// See the [crate documentation](crate) for the invariants and their cost
/// model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multirange<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for Multirange<T> {
    fn default() -> Self {
        Multirange {
            intervals: Vec::new(),
        }
    }
}

impl<T: Ord> Multirange<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains no points at all.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The disjoint intervals making up this set, in ascending order.
    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.intervals.iter()
    }

    /// Insert an interval, merging it with any stored intervals it overlaps
    /// or touches. Empty intervals are ignored.
    pub fn insert(&mut self, interval: Interval<T>) {
        if interval.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.intervals.len() + 1);
        let mut merged = Some(interval);
        for current in self.intervals.drain(..) {
            match merged.take() {
                Some(m) if current.end < m.start => {
                    // Strictly before the new interval, not even adjacent.
                    out.push(current);
                    merged = Some(m);
                }
                Some(m) if m.end < current.start => {
                    out.push(m);
                    out.push(current);
                }
                Some(m) => {
                    merged = Some(Interval {
                        start: min(m.start, current.start),
                        end: max(m.end, current.end),
                    });
                }
                None => out.push(current),
            }
        }
        if let Some(m) = merged {
            out.push(m);
        }
        self.intervals = out;
    }

    /// Whether any point of `self` is also a point of `other` (the range
    /// overlap operator).
    pub fn overlaps(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = &self.intervals[i];
            let b = &other.intervals[j];
            if max(&a.start, &b.start) < min(&a.end, &b.end) {
                return true;
            }
            if a.end <= b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }
}

impl<T: Ord + Clone> Multirange<T> {
    /// The union of both sets (interval aggregation).
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for interval in &other.intervals {
            out.insert(interval.clone());
        }
        out
    }

    /// The points contained in both sets, as a normalized set.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = &self.intervals[i];
            let b = &other.intervals[j];
            let start = max(&a.start, &b.start);
            let end = min(&a.end, &b.end);
            if start < end {
                out.push(Interval {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
            if a.end <= b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        Multirange { intervals: out }
    }

    /// The points of `self` not contained in `other`, as a normalized set.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        let mut j = 0;
        for a in &self.intervals {
            // Skip subtrahend intervals that end before this interval starts;
            // they can't affect this or any later interval.
            while j < other.intervals.len() && other.intervals[j].end <= a.start {
                j += 1;
            }
            let mut cursor = a.start.clone();
            let mut k = j;
            while k < other.intervals.len() && other.intervals[k].start < a.end {
                let b = &other.intervals[k];
                if b.start > cursor {
                    out.push(Interval {
                        start: cursor,
                        end: b.start.clone(),
                    });
                }
                // Subtrahend intervals are sorted and disjoint, so `b.end`
                // always lies past the cursor.
                cursor = b.end.clone();
                if b.end >= a.end {
                    break;
                }
                k += 1;
            }
            if cursor < a.end {
                out.push(Interval {
                    start: cursor,
                    end: a.end.clone(),
                });
            }
        }
        Multirange { intervals: out }
    }
}

impl<T: Ord> From<Interval<T>> for Multirange<T> {
    fn from(interval: Interval<T>) -> Self {
        let mut out = Multirange::new();
        out.insert(interval);
        out
    }
}

impl<T: Ord> FromIterator<Interval<T>> for Multirange<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut out = Multirange::new();
        for interval in iter {
            out.insert(interval);
        }
        out
    }
}
