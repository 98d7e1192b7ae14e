//! Node-local monotonic-edge window minimum (C6): unlike `WindowNode` these
//! two maintain their own window bookkeeping alongside the deque, emitting
//! evictions directly instead of going through `WindowInterval`. Grounded on
//! `nodes.py`'s `MinOptimalWindowNode`/`MinOptimalWindowNode2`, with the
//! same tail-vs-head correction applied to `MonotonicEdge::add`.

use crate::graph::Notifier;
use crate::interval::Interval;
use crate::poly::Polynomial;

const EPS: f64 = 1e-5;

/// Bridges a popped run of dominated tail values back to `add_interval`'s
/// start, splitting the new tail at its crossing with `value` if one falls
/// strictly inside it.
fn bridge(intervals: &mut Vec<Interval>, value: f64, bound: f64) {
    if let Some(new_tail) = intervals.last().copied() {
        let zeros = new_tail.function.sub(&Polynomial::constant(value)).zeros();
        let in_domain: Vec<f64> =
            zeros.into_iter().filter(|z| *z > new_tail.start + EPS && *z < new_tail.end - EPS).collect();
        let (start, _right) = if let Some(zero) = in_domain.first().copied() {
            let (left, right) = new_tail.split(zero - new_tail.start).expect("zero lies within the tail");
            let idx = intervals.len() - 1;
            let left_end = left.end;
            intervals[idx] = left;
            (left_end, right)
        } else {
            (new_tail.end, new_tail)
        };
        intervals.push(Interval::new(start, bound, Polynomial::constant(value)));
    }
}

/// Maintains a running window minimum with a length-`L` deque of its own,
/// evicting directly rather than through `WindowInterval`.
pub struct MinOptimalWindowNode {
    length: f64,
    intervals: Vec<Interval>,
    notifier: Notifier,
}

impl MinOptimalWindowNode {
    pub fn new(length: f64) -> Self {
        MinOptimalWindowNode { length, intervals: Vec::new(), notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, add_interval: Interval) {
        let window_length = match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0.0,
        };
        let mut to_slide = add_interval.length() - (self.length - window_length);
        let value = if add_interval.is_increasing() {
            add_interval.function.evaluate(add_interval.start)
        } else {
            add_interval.function.evaluate(add_interval.end)
        };
        while let Some(tail) = self.intervals.last().copied() {
            if tail.function.evaluate(tail.start) <= value {
                break;
            }
            self.intervals.pop();
            bridge(&mut self.intervals, value, add_interval.start);
        }
        self.intervals.push(Interval::new(add_interval.start, add_interval.end, Polynomial::constant(value)));

        let mut vout = Vec::new();
        if to_slide > 0.0 {
            let mut first_len = self.intervals[0].length();
            while first_len <= to_slide {
                vout.push(self.intervals.remove(0));
                to_slide -= first_len;
                first_len = self.intervals[0].length();
            }
            if to_slide > EPS {
                let (left, right) = self.intervals[0].split(to_slide).expect("slide offset within head interval");
                vout.push(left);
                self.intervals[0] = right;
            }
        }
        if !vout.is_empty() {
            self.notifier.notify_multiple(vout);
        }
    }
}

/// Same algorithm as `MinOptimalWindowNode`, tracking the window's
/// boundaries explicitly instead of deriving them from the deque's ends.
pub struct MinOptimalWindowNode2 {
    length: f64,
    intervals: Vec<Interval>,
    start_window: Option<f64>,
    notifier: Notifier,
}

impl MinOptimalWindowNode2 {
    pub fn new(length: f64) -> Self {
        MinOptimalWindowNode2 { length, intervals: Vec::new(), start_window: None, notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, add_interval: Interval) {
        let value = if add_interval.is_increasing() {
            add_interval.function.evaluate(add_interval.start)
        } else {
            add_interval.function.evaluate(add_interval.end)
        };
        let new_add_interval = Interval::new(add_interval.start, add_interval.end, Polynomial::constant(value));

        while let Some(tail) = self.intervals.last().copied() {
            if tail.function.evaluate(tail.start) <= value {
                break;
            }
            self.intervals.pop();
        }
        if !self.intervals.is_empty() {
            bridge(&mut self.intervals, value, add_interval.start);
            self.intervals.push(new_add_interval);
        } else if self.start_window.is_none() {
            self.start_window = Some(new_add_interval.start);
            self.intervals.push(new_add_interval);
        } else {
            self.intervals.push(Interval::new(
                self.start_window.unwrap(),
                new_add_interval.start,
                Polynomial::constant(value),
            ));
            self.intervals.push(new_add_interval);
        }

        let mut to_slide = self.intervals.last().unwrap().end - self.start_window.unwrap() - self.length;
        let mut vout = Vec::new();
        while to_slide > 0.0 {
            let first_len = self.intervals[0].length();
            if first_len <= to_slide {
                let removed = self.intervals.remove(0);
                to_slide -= first_len;
                self.start_window = Some(removed.end);
                vout.push(removed);
            } else {
                let (left, right) = self.intervals[0].split(to_slide).expect("slide offset within head interval");
                vout.push(left);
                self.start_window = Some(left.end);
                self.intervals[0] = right;
                to_slide = 0.0;
            }
        }
        if !vout.is_empty() {
            self.notifier.notify_multiple(vout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: f64, e: f64, v: f64) -> Interval {
        Interval::new(s, e, Polynomial::constant(v))
    }

    #[test]
    fn min_optimal_evicts_once_window_exceeds_length() {
        let mut node = MinOptimalWindowNode::new(1.0);
        let received = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive(iv(0.0, 0.6, 1.0));
        node.receive(iv(0.6, 1.2, 2.0));
        assert!(!received.borrow().is_empty());
    }

    #[test]
    fn min_optimal_pops_dominated_tail() {
        let mut node = MinOptimalWindowNode::new(3.0);
        node.receive(iv(0.0, 1.0, 5.0));
        node.receive(iv(1.0, 2.0, 1.0));
        assert!(node.intervals.iter().all(|i| i.function.evaluate(i.start) <= 5.0 + EPS));
    }

    #[test]
    fn min_optimal2_tracks_window_start() {
        let mut node = MinOptimalWindowNode2::new(1.0);
        node.receive(iv(0.0, 0.6, 1.0));
        node.receive(iv(0.6, 1.2, 2.0));
        assert!(node.start_window.unwrap() >= 0.0);
    }
}
