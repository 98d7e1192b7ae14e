//! Window dataflow node (C6): feeds incoming intervals through a
//! `WindowInterval` and forwards whatever its `WindowOperator` emits on each
//! `add`/`move` event, per `nodes.py WindowNode`.

use crate::graph::Notifier;
use crate::interval::Interval;
use crate::window::WindowInterval;
use crate::window_ops::{OperatorObserver, WindowOperator};

pub struct WindowNode<Op: WindowOperator> {
    window: WindowInterval,
    operator: Op,
    notifier: Notifier,
}

impl<Op: WindowOperator> WindowNode<Op> {
    pub fn new(length: f64, operator: Op) -> Self {
        WindowNode { window: WindowInterval::new(length), operator, notifier: Notifier::new() }
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, interval: Interval) {
        let mut bridge = OperatorObserver::new(&mut self.operator);
        self.window.add(interval, &mut bridge);
        if let Some(e) = bridge.error {
            panic!("window operator failed on an aligned move event: {e}");
        }
        let emitted = bridge.emitted;
        self.notifier.notify_multiple(emitted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Polynomial;
    use crate::window_ops::Integral;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn window_node_forwards_operator_output_on_move() {
        let mut node = WindowNode::new(1.0, Integral::new());
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive(Interval::new(0.0, 0.5, Polynomial::constant(1.0)));
        node.receive(Interval::new(0.5, 1.5, Polynomial::constant(2.0)));
        assert!(!received.borrow().is_empty());
    }
}
