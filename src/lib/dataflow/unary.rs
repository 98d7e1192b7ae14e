//! Unary dataflow node: applies a configured `UnaryOp` to each incoming
//! interval and forwards the (possibly several) results downstream.

use super::operators::UnaryOp;
use crate::graph::Notifier;
use crate::interval::Interval;

pub struct UnaryNode<Op: UnaryOp> {
    operator: Op,
    notifier: Notifier,
}

impl<Op: UnaryOp> UnaryNode<Op> {
    pub fn new(operator: Op) -> Self {
        UnaryNode { operator, notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, interval: Interval) {
        let outputs = self
            .operator
            .apply(interval)
            .expect("unary operators never fail on a single well-formed interval");
        self.notifier.notify_multiple(outputs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::operators::HigherThan;
    use crate::poly::Polynomial;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unary_node_applies_operator() {
        let mut node = UnaryNode::new(HigherThan(0.0));
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive(Interval::new(-1.0, 1.0, Polynomial::linear(1.0, 0.0)));
        assert_eq!(received.borrow().len(), 2);
    }
}
