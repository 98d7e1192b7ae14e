//! Stateful aggregators driven by `WindowInterval`'s `add`/`move` events:
//! running integral, the endpoint-queue and endpoint-list min/max
//! variants, and the monotonic-edge (Lemire-style) running extrema.

use crate::interval::Interval;
use crate::poly::Polynomial;
use crate::queue::IntervalQueue;
use crate::window::WindowObserver;
use crate::Error;

/// Shared shape of every window aggregator: `add` absorbs a newly-admitted
/// interval, `move_` absorbs an eviction+admission pair and returns the
/// intervals to publish downstream.
pub trait WindowOperator {
    fn add(&mut self, interval: Interval);
    fn move_(&mut self, removed: Interval, added: Interval) -> Result<Vec<Interval>, Error>;
}

/// Adapts any `WindowOperator` to the `WindowObserver` callback shape used
/// by `WindowInterval`, buffering the emitted intervals for the caller to
/// drain.
pub struct OperatorObserver<'a, O: WindowOperator> {
    pub operator: &'a mut O,
    pub emitted: Vec<Interval>,
    pub error: Option<Error>,
}

impl<'a, O: WindowOperator> OperatorObserver<'a, O> {
    pub fn new(operator: &'a mut O) -> Self {
        OperatorObserver { operator, emitted: Vec::new(), error: None }
    }
}

impl<'a, O: WindowOperator> WindowObserver for OperatorObserver<'a, O> {
    fn add(&mut self, interval: Interval) {
        self.operator.add(interval);
    }

    fn on_move(&mut self, removed: Interval, added: Interval) {
        match self.operator.move_(removed, added) {
            Ok(mut results) => self.emitted.append(&mut results),
            Err(e) => self.error = Some(e),
        }
    }
}

/// Running integral over the window's contents.
#[derive(Default)]
pub struct Integral {
    value: f64,
}

impl Integral {
    pub fn new() -> Self {
        Integral { value: 0.0 }
    }
}

impl WindowOperator for Integral {
    fn add(&mut self, interval: Interval) {
        if let Ok(v) = interval.integrate() {
            self.value += v;
        }
    }

    fn move_(&mut self, removed: Interval, added: Interval) -> Result<Vec<Interval>, Error> {
        let added_above = added.move_above(&removed);
        let removed_integral = removed.function.integral();
        let added_integral = added_above.function.integral();
        let constant = Polynomial::constant(
            self.value + removed_integral.evaluate(removed.start) - added_integral.evaluate(added_above.start),
        );
        let added_poly = added_integral.into_polynomial().ok_or(Error::InvalidDegree)?;
        let removed_poly = removed_integral.into_polynomial().ok_or(Error::InvalidDegree)?;
        let function = constant.add(&added_poly).sub(&removed_poly);
        self.value = function.evaluate(removed.end);
        Ok(vec![Interval::new(removed.start, removed.end, function)])
    }
}

/// Endpoint-queue min/max over the window, per §4.5's "Min / Max
/// (endpoint-queue variant)".
pub struct EndpointQueueExtremum {
    values: IntervalQueue,
    reducer: fn(f64, f64) -> f64,
    is_min: bool,
}

impl EndpointQueueExtremum {
    pub fn min() -> Self {
        EndpointQueueExtremum { values: IntervalQueue::new(), reducer: f64::min, is_min: true }
    }

    pub fn max() -> Self {
        EndpointQueueExtremum { values: IntervalQueue::new(), reducer: f64::max, is_min: false }
    }
}

impl WindowOperator for EndpointQueueExtremum {
    fn add(&mut self, interval: Interval) {
        let (left, right) = interval.get_extreme_value_with_time();
        self.values.add(left, right);
    }

    fn move_(&mut self, removed: Interval, added: Interval) -> Result<Vec<Interval>, Error> {
        let (left, right) = removed.get_extreme_value_with_time();
        self.values.remove(left, right)?;
        let first_chunk = if self.values.is_full() {
            let other_extremum = self.values.evaluate(self.reducer)?;
            let constant = Interval::new(removed.start, removed.end, Polynomial::constant(other_extremum));
            if self.is_min {
                removed.min_interval(&constant)?
            } else {
                removed.max_interval(&constant)?
            }
        } else {
            vec![removed]
        };
        let added_shifted = added.move_above(&removed);
        let mut output = Vec::new();
        for chunk in first_chunk {
            let projected = added_shifted.project_onto(&chunk)?;
            let mut pieces = if self.is_min {
                chunk.min_interval(&projected)?
            } else {
                chunk.max_interval(&projected)?
            };
            output.append(&mut pieces);
        }
        self.add(added);
        Ok(output)
    }
}

/// Endpoint-list min variant (§4.5's `Min2`): flattens a decreasing
/// `removed` to its right-endpoint value and an increasing `added` to its
/// left-endpoint value before the partition pass — a conservative monotone
/// bound, deliberately distinct from `EndpointQueueExtremum`'s semantics
/// (spec Open Question: both semantics are kept as separate operators
/// rather than unified, see DESIGN.md).
#[derive(Default)]
pub struct Min2 {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Min2 {
    pub fn new() -> Self {
        Min2::default()
    }

    fn remove(&mut self, removed: &Interval) {
        let mut count = 0;
        while count < self.times.len() && self.times[count] <= removed.end {
            count += 1;
        }
        for _ in 0..count {
            self.times.remove(0);
            self.values.remove(0);
        }
    }
}

impl WindowOperator for Min2 {
    fn add(&mut self, interval: Interval) {
        self.times.push(interval.start);
        self.times.push(interval.end);
        self.values.push(interval.function.evaluate(interval.start));
        self.values.push(interval.function.evaluate(interval.end));
    }

    fn move_(&mut self, removed: Interval, added: Interval) -> Result<Vec<Interval>, Error> {
        self.remove(&removed);
        let removed = if removed.is_decreasing() {
            Interval::new(removed.start, removed.end, Polynomial::constant(removed.function.evaluate(removed.end)))
        } else {
            removed
        };
        let added = if added.is_increasing() {
            Interval::new(added.start, added.end, Polynomial::constant(added.function.evaluate(added.start)))
        } else {
            added
        };
        let first_chunk = if !self.times.is_empty() {
            let minimum = self.values.iter().copied().fold(f64::INFINITY, f64::min);
            removed.min_interval(&Interval::new(removed.start, removed.end, Polynomial::constant(minimum)))?
        } else {
            vec![removed]
        };
        let added_shifted = added.move_above(&removed);
        let mut output = Vec::new();
        for chunk in first_chunk {
            let projected = added_shifted.project_onto(&chunk)?;
            output.append(&mut chunk.min_interval(&projected)?);
        }
        self.add(added);
        Ok(output)
    }
}

/// A sequence of constant intervals whose values form a monotone chain
/// (non-decreasing for Min, non-increasing for Max), maintained via the
/// Lemire-style deque algorithm of §4.5.
pub struct MonotonicEdge {
    intervals: Vec<Interval>,
    is_min: bool,
}

impl MonotonicEdge {
    pub fn min() -> Self {
        MonotonicEdge { intervals: Vec::new(), is_min: true }
    }

    pub fn max() -> Self {
        MonotonicEdge { intervals: Vec::new(), is_min: false }
    }

    fn dominates(&self, a: f64, b: f64) -> bool {
        if self.is_min {
            a > b
        } else {
            a < b
        }
    }

    pub fn add(&mut self, interval: Interval) {
        let (value, new_interval) = if interval.is_increasing() == self.is_min {
            (interval.function.evaluate(interval.start), interval)
        } else {
            let v = interval.function.evaluate(interval.end);
            (v, Interval::new(interval.start, interval.end, Polynomial::constant(v)))
        };

        let mut start: Option<f64> = None;
        while let Some(tail) = self.intervals.last() {
            let tail_value = tail.function.evaluate(tail.start);
            if self.dominates(tail_value, value) {
                let removed = self.intervals.pop().unwrap();
                start = Some(removed.start);
            } else {
                break;
            }
        }
        if let Some(tail) = self.intervals.last() {
            let zeros = tail.function.sub(&Polynomial::constant(value)).zeros();
            let in_domain: Vec<f64> = zeros.into_iter().filter(|z| *z > tail.start && *z < tail.end).collect();
            if let Some(zero) = in_domain.first().copied() {
                if let Ok((left, _right)) = tail.split(zero - tail.start) {
                    let len = self.intervals.len();
                    self.intervals[len - 1] = left;
                    start = Some(left.end);
                }
            }
        }
        if let Some(st) = start {
            if (st - new_interval.start).abs() > 1e-5 {
                self.intervals.push(Interval::new(st, new_interval.start, Polynomial::constant(value)));
            }
        }
        self.intervals.push(new_interval);
    }

    /// Pops intervals from the front until total consumed length >= `length`,
    /// splitting the final one if needed, and returns what was popped.
    pub fn remove(&mut self, length: f64) -> Vec<Interval> {
        let mut removed = Vec::new();
        let mut partial = 0.0;
        while partial < length - 1e-5 {
            let candidate = self.intervals.remove(0);
            if candidate.length() <= length - partial + 1e-5 {
                partial += candidate.length();
                removed.push(candidate);
            } else {
                let cut = length - partial;
                let (left, right) = candidate.split(cut).unwrap();
                removed.push(left);
                self.intervals.insert(0, right);
                partial = length;
            }
        }
        removed
    }
}

/// Windowed extremum via the monotonic-edge deque: `move_` feeds `added`
/// into the chain and evicts exactly `removed.length()` worth from the
/// front.
pub struct Lemire {
    edge: MonotonicEdge,
}

impl Lemire {
    pub fn min() -> Self {
        Lemire { edge: MonotonicEdge::min() }
    }

    pub fn max() -> Self {
        Lemire { edge: MonotonicEdge::max() }
    }
}

impl WindowOperator for Lemire {
    fn add(&mut self, interval: Interval) {
        self.edge.add(interval);
    }

    fn move_(&mut self, removed: Interval, added: Interval) -> Result<Vec<Interval>, Error> {
        self.edge.add(added);
        Ok(self.edge.remove(removed.length()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: f64, e: f64, v: f64) -> Interval {
        Interval::new(s, e, Polynomial::constant(v))
    }

    fn run<O: WindowOperator>(op: &mut O, adds: &[Interval], moves: &[(Interval, Interval)]) -> Vec<Interval> {
        for a in adds {
            op.add(*a);
        }
        let mut out = Vec::new();
        for (r, a) in moves {
            out.extend(op.move_(*r, *a).unwrap());
        }
        out
    }

    #[test]
    fn integral_over_constants() {
        let mut integral = Integral::new();
        let result = run(
            &mut integral,
            &[iv(0.0, 1.0, 1.0), iv(1.0, 2.0, 2.0), iv(2.0, 3.0, 3.0)],
            &[(iv(0.0, 1.0, 1.0), iv(3.0, 4.0, 4.0))],
        );
        assert_eq!(result.len(), 1);
        let out = result[0];
        assert_eq!(out.start, 0.0);
        assert_eq!(out.end, 1.0);
        assert_eq!(out.function, Polynomial::linear(3.0, 6.0));
    }

    #[test]
    fn integral_over_linear_mix() {
        let mut integral = Integral::new();
        let result = run(
            &mut integral,
            &[
                Interval::new(0.0, 1.0, Polynomial::linear(1.0, 0.0)),
                iv(1.0, 2.0, 2.0),
                iv(2.0, 3.0, 3.0),
            ],
            &[(
                Interval::new(0.0, 1.0, Polynomial::linear(1.0, 0.0)),
                Interval::new(3.0, 4.0, Polynomial::linear(-1.0, 3.0)),
            )],
        );
        let out = result[0];
        assert_eq!(out.function, Polynomial::full(-1.0, 0.0, 5.5));
    }

    #[test]
    fn monotonic_edge_remove_exact_and_partial() {
        let mut edge = MonotonicEdge::min();
        edge.add(iv(0.0, 1.0, 0.0));
        edge.add(iv(1.0, 2.0, 1.0));
        edge.add(iv(2.0, 3.0, 2.0));

        let removed = edge.remove(1.5);
        assert_eq!(removed, vec![iv(0.0, 1.0, 0.0), iv(1.0, 1.5, 1.0)]);
    }

    #[test]
    fn monotonic_edge_pops_dominated_values() {
        let mut edge = MonotonicEdge::min();
        edge.add(iv(0.0, 1.0, 0.0));
        edge.add(iv(1.0, 2.0, 2.0));
        edge.add(iv(2.0, 3.0, 1.0));

        let removed = edge.remove(1.5);
        assert_eq!(removed, vec![iv(0.0, 1.0, 0.0), iv(1.0, 1.5, 1.0)]);
    }
}
