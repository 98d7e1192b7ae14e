//! Source nodes: turn raw `(time, value)` samples into intervals. A PWL
//! source buffers the last sample and emits a linear interval spanning it
//! and the new one; a PWC source emits a constant interval instead.

use crate::graph::Notifier;
use crate::interval::Interval;
use crate::poly::Polynomial;

/// Emits a linear interval `[t, t']` with slope `(v' - v) / (t' - t)` each
/// time a new sample arrives after the first.
#[derive(Default)]
pub struct PwlSourceNode {
    last: Option<(f64, f64)>,
    notifier: Notifier,
}

impl PwlSourceNode {
    pub fn new() -> Self {
        PwlSourceNode::default()
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, time: f64, value: f64) {
        if let Some((last_time, last_value)) = self.last {
            let m = (value - last_value) / (time - last_time);
            let q = last_value - last_time * m;
            self.notifier.notify(Interval::new(last_time, time, Polynomial::linear(m, q)));
        }
        self.last = Some((time, value));
    }
}

/// Emits a constant interval at the prior sample's value each time a new
/// sample arrives after the first.
#[derive(Default)]
pub struct PwcSourceNode {
    last: Option<(f64, f64)>,
    notifier: Notifier,
}

impl PwcSourceNode {
    pub fn new() -> Self {
        PwcSourceNode::default()
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn observe(&mut self) -> std::rc::Rc<std::cell::RefCell<crate::graph::Signal>> {
        self.notifier.observe()
    }

    pub fn receive(&mut self, time: f64, value: f64) {
        if let Some((last_time, last_value)) = self.last {
            self.notifier.notify(Interval::new(last_time, time, Polynomial::constant(last_value)));
        }
        self.last = Some((time, value));
    }
}

/// Identity pass-through, used as a tap point between a source and its
/// observers.
#[derive(Default)]
pub struct VariableNode {
    notifier: Notifier,
}

impl VariableNode {
    pub fn new() -> Self {
        VariableNode::default()
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.notifier.to(observer);
    }

    pub fn receive(&mut self, interval: Interval) {
        self.notifier.notify(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn pwl_source_emits_linear_segment() {
        let mut node = PwlSourceNode::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive(0.0, 1.0);
        node.receive(2.0, 5.0);
        assert_eq!(received.borrow().len(), 1);
        assert_eq!(received.borrow()[0].function, Polynomial::linear(2.0, 1.0));
    }

    #[test]
    fn pwc_source_emits_constant_at_previous_value() {
        let mut node = PwcSourceNode::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
        node.receive(0.0, 3.0);
        node.receive(1.0, 9.0);
        assert_eq!(received.borrow()[0].function, Polynomial::constant(3.0));
    }
}
