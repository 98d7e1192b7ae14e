//! Endpoint-pair queue used by the endpoint-based window reductions
//! (`Min`/`Max`, §4.5) to track the values at the boundary of every
//! interval currently inside a sliding window.

use crate::Error;

/// `(time, value)` endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedValue {
    pub time: f64,
    pub value: f64,
}

impl TimedValue {
    pub fn new(time: f64, value: f64) -> Self {
        TimedValue { time, value }
    }
}

/// A flat-endpoint segment: the left and right `TimedValue` of some
/// interval, tracked without its polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalValued {
    pub left: TimedValue,
    pub right: TimedValue,
}

impl IntervalValued {
    pub fn new(left: TimedValue, right: TimedValue) -> Self {
        IntervalValued { left, right }
    }

    pub fn is_left_subset(&self, other: &IntervalValued) -> bool {
        other.left == self.left && self.right.time < other.right.time
    }

    /// `other` must be a prefix of `self` (same left endpoint, a shorter
    /// right endpoint). Returns the remainder `[other.right .. self.right]`.
    pub fn left_minus(&self, other: &IntervalValued) -> Result<IntervalValued, Error> {
        if other.right.time > self.right.time {
            return Err(Error::InvalidRemoval);
        }
        Ok(IntervalValued::new(other.right, self.right))
    }

    pub fn get_value<F: Fn(f64, f64) -> f64>(&self, operator: F) -> f64 {
        operator(self.left.value, self.right.value)
    }

    pub fn is_prolong_of(&self, other: &IntervalValued) -> bool {
        self.left.time == other.right.time
            && self.left.value == self.right.value
            && self.right.value == other.right.value
    }

    pub fn join_left_of(&self, other: &IntervalValued) -> IntervalValued {
        IntervalValued::new(self.left, other.right)
    }
}

/// Ordered queue of `IntervalValued` segments, supporting coalescing
/// appends, head-anchored removal, and reductions over the endpoint pairs.
#[derive(Debug, Default)]
pub struct IntervalQueue {
    intervals: Vec<IntervalValued>,
}

impl IntervalQueue {
    pub fn new() -> Self {
        IntervalQueue { intervals: Vec::new() }
    }

    pub fn is_full(&self) -> bool {
        !self.intervals.is_empty()
    }

    /// Appends `[first, second]`. If it prolongs the current tail, the tail
    /// is extended in place instead of appending a new segment (joining the
    /// *tail*, not the head — see the design note on the source's apparent
    /// head/tail mix-up).
    pub fn add(&mut self, first: TimedValue, second: TimedValue) {
        let segment = IntervalValued::new(first, second);
        if let Some(tail) = self.intervals.last().copied() {
            if segment.is_prolong_of(&tail) {
                *self.intervals.last_mut().unwrap() = tail.join_left_of(&segment);
                return;
            }
        }
        self.intervals.push(segment);
    }

    /// Removes `[first, second]`, which must equal the head or be a left
    /// subset of it.
    pub fn remove(&mut self, first: TimedValue, second: TimedValue) -> Result<(), Error> {
        let target = IntervalValued::new(first, second);
        let head = *self.intervals.first().ok_or(Error::InvalidRemoval)?;
        if head == target {
            self.intervals.remove(0);
            return Ok(());
        }
        if !target.is_left_subset(&head) {
            return Err(Error::InvalidRemoval);
        }
        self.intervals[0] = head.left_minus(&target)?;
        Ok(())
    }

    /// Applies `reducer` to each segment's endpoint values, then reduces
    /// the resulting sequence with the same reducer.
    pub fn evaluate<F: Fn(f64, f64) -> f64 + Copy>(&self, reducer: F) -> Result<f64, Error> {
        if self.intervals.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        let mut values = self.intervals.iter().map(|segment| segment.get_value(reducer));
        let first = values.next().unwrap();
        Ok(values.fold(first, reducer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-5;

    fn numerically_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn tv(t: f64, v: f64) -> TimedValue {
        TimedValue::new(t, v)
    }

    #[test]
    fn add_then_remove_head() {
        let mut queue = IntervalQueue::new();
        queue.add(tv(0.0, 1.0), tv(1.0, 2.0));
        assert!(queue.is_full());
        queue.remove(tv(0.0, 1.0), tv(1.0, 2.0)).unwrap();
        assert!(!queue.is_full());
    }

    #[test]
    fn remove_left_subset_shrinks_head() {
        let mut queue = IntervalQueue::new();
        queue.add(tv(0.0, 1.0), tv(2.0, 1.0));
        queue.remove(tv(0.0, 1.0), tv(1.0, 1.0)).unwrap();
        assert_eq!(queue.evaluate(f64::min).unwrap(), 1.0);
    }

    #[test]
    fn remove_non_subset_fails() {
        let mut queue = IntervalQueue::new();
        queue.add(tv(0.0, 1.0), tv(1.0, 2.0));
        assert!(queue.remove(tv(5.0, 1.0), tv(6.0, 2.0)).is_err());
    }

    #[test]
    fn evaluate_empty_fails() {
        let queue = IntervalQueue::new();
        assert!(matches!(queue.evaluate(f64::min), Err(Error::EmptyBuffer)));
    }

    #[test]
    fn prolonging_append_joins_tail() {
        let mut queue = IntervalQueue::new();
        queue.add(tv(0.0, 1.0), tv(1.0, 1.0));
        queue.add(tv(1.0, 1.0), tv(2.0, 1.0));
        assert_eq!(queue.evaluate(f64::min).unwrap(), 1.0);
        assert!(numerically_equal(queue.intervals[0].left.time, 0.0));
        assert!(numerically_equal(queue.intervals[0].right.time, 2.0));
    }
}
