//! Binary dataflow node (C6): aligns two independently-arriving interval
//! queues and applies a `BinaryOp` once a common sub-interval is available,
//! per the merge algorithm in `nodes.py BinaryNode`.

use super::operators::BinaryOp;
use crate::graph::Notifier;
use crate::interval::Interval;
use crate::poly::Polynomial;
use log::debug;
use std::collections::VecDeque;

pub struct BinaryNode<Op: BinaryOp> {
    left: VecDeque<Interval>,
    right: VecDeque<Interval>,
    operator: Op,
    notifier: Notifier,
}

impl<Op: BinaryOp> BinaryNode<Op> {
    pub fn new(operator: Op) -> Self {
        BinaryNode { left: VecDeque::new(), right: VecDeque::new(), operator, notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive_left(&mut self, interval: Interval) {
        self.left.push_back(interval);
        while !self.left.is_empty() && !self.right.is_empty() {
            self.merge();
        }
    }

    pub fn receive_right(&mut self, interval: Interval) {
        self.right.push_back(interval);
        while !self.left.is_empty() && !self.right.is_empty() {
            self.merge();
        }
    }

    fn merge(&mut self) {
        let mut left = self.left[0];
        let mut right = self.right[0];
        if right.start < left.start {
            debug!("binary node: emitting undefined gap [{}, {})", right.start, left.start);
            self.notifier.notify(Interval::new(right.start, left.start, Polynomial::undefined()));
            right = right.subset(left.start, right.end);
            self.right[0] = right;
        } else if left.start < right.start {
            debug!("binary node: emitting undefined gap [{}, {})", left.start, right.start);
            self.notifier.notify(Interval::new(left.start, right.start, Polynomial::undefined()));
            left = left.subset(right.start, left.end);
            self.left[0] = left;
        } else if left.end < right.end {
            let (right_left, right_right) = right
                .split(left.end - right.start)
                .expect("split point lies within the just-aligned interval");
            self.right[0] = right_right;
            self.left.pop_front();
            let outputs = self
                .operator
                .apply(left, right_left)
                .expect("binary operators never fail on aligned bounds");
            self.notifier.notify_multiple(outputs);
        } else if right.end < left.end {
            let (left_left, left_right) = left
                .split(right.end - left.start)
                .expect("split point lies within the just-aligned interval");
            self.left[0] = left_right;
            self.right.pop_front();
            let outputs = self
                .operator
                .apply(left_left, right)
                .expect("binary operators never fail on aligned bounds");
            self.notifier.notify_multiple(outputs);
        } else {
            self.left.pop_front();
            self.right.pop_front();
            let outputs =
                self.operator.apply(left, right).expect("binary operators never fail on aligned bounds");
            self.notifier.notify_multiple(outputs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::operators::Add;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn aligned_intervals_merge_directly() {
        let mut node = BinaryNode::new(Add);
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive_left(Interval::new(0.0, 1.0, Polynomial::constant(1.0)));
        node.receive_right(Interval::new(0.0, 1.0, Polynomial::constant(2.0)));
        assert_eq!(received.borrow()[0].function, Polynomial::constant(3.0));
    }

    #[test]
    fn lagging_side_emits_undefined_gap_then_splits() {
        let mut node = BinaryNode::new(Add);
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive_left(Interval::new(1.0, 2.0, Polynomial::constant(1.0)));
        node.receive_right(Interval::new(0.0, 2.0, Polynomial::constant(2.0)));
        let received = received.borrow();
        assert!(received[0].is_undefined());
        assert_eq!(received[0].start, 0.0);
        assert_eq!(received[0].end, 1.0);
        assert_eq!(received[1].function, Polynomial::constant(3.0));
    }

    #[test]
    fn unequal_ends_split_the_longer_side() {
        let mut node = BinaryNode::new(Add);
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive_left(Interval::new(0.0, 2.0, Polynomial::constant(1.0)));
        node.receive_right(Interval::new(0.0, 1.0, Polynomial::constant(2.0)));
        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].end, 1.0);
    }
}
