//! N-ary dataflow node (C6): merges one interval queue per named input once
//! all of them have a pending interval, per `nodes.py NaryNode`.

use crate::graph::{NaryReceiver, Notifier};
use crate::interval::Interval;
use crate::poly::Polynomial;
use crate::Error;
use log::debug;
use std::collections::VecDeque;

/// Reduces one aligned interval per input location to a single output
/// interval, in the order the locations were registered.
pub trait NaryOp {
    fn apply(&self, intervals: Vec<Interval>) -> Result<Interval, Error>;
}

pub struct NaryNode<Op: NaryOp> {
    names: Vec<String>,
    locations: Vec<VecDeque<Interval>>,
    operator: Op,
    notifier: Notifier,
}

impl<Op: NaryOp> NaryNode<Op> {
    pub fn new(operator: Op) -> Self {
        NaryNode { names: Vec::new(), locations: Vec::new(), operator, notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    fn index_of(&self, name: &str) -> usize {
        self.names.iter().position(|n| n == name).expect("receive on an unregistered input name")
    }

    fn should_merge(&self) -> bool {
        !self.locations.is_empty() && self.locations.iter().all(|q| !q.is_empty())
    }

    fn merge(&mut self) {
        let starts: Vec<f64> = self.locations.iter().map(|q| q[0].start).collect();
        let min_start = starts.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_start = starts.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if (max_start - min_start).abs() > 1e-5 {
            debug!("n-ary node: emitting undefined gap [{}, {})", min_start, max_start);
            self.notifier.notify(Interval::new(min_start, max_start, Polynomial::undefined()));
            for queue in &mut self.locations {
                let front = queue[0];
                let (_, right) = front.split(max_start - front.start).expect("split within the front interval");
                queue[0] = right;
            }
        }
        let min_end = self.locations.iter().map(|q| q[0].end).fold(f64::INFINITY, f64::min);
        let mut cut = Vec::with_capacity(self.locations.len());
        for queue in &mut self.locations {
            let front = queue[0];
            if front.end > min_end + 1e-5 {
                let (left, right) = front.split(min_end - front.start).expect("split within the front interval");
                cut.push(left);
                queue[0] = right;
            } else {
                cut.push(queue.pop_front().unwrap());
            }
        }
        let output = self.operator.apply(cut).expect("n-ary operator never fails on aligned bounds");
        self.notifier.notify(output);
    }
}

impl<Op: NaryOp> NaryReceiver for NaryNode<Op> {
    fn add_receiver(&mut self, name: &str) {
        self.names.push(name.to_string());
        self.locations.push(VecDeque::new());
    }

    fn receive(&mut self, name: &str, interval: Interval) {
        let index = self.index_of(name);
        self.locations[index].push_back(interval);
        while self.should_merge() {
            self.merge();
        }
    }
}
