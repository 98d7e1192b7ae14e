//! Integration tests for the dataflow wiring layer (unary/binary/n-ary/window
//! nodes strung together through `Notifier`/`Memory`), adapted from the
//! end-to-end scenarios in `test_nodes.py`.

use pwsignal::dataflow::{
    Add, BinaryNode, Filter, HigherThan, MultConst, NaryNode, NaryOp, PwcSourceNode,
    PwlSourceNode, UnaryNode, WindowNode,
};
use pwsignal::graph::{Memory, NaryReceiver};
use pwsignal::poly::Polynomial;
use pwsignal::window_ops::Integral;
use pwsignal::Interval;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn pwl_source_through_unary_threshold() {
    let mut source = PwlSourceNode::new();
    let mut threshold = UnaryNode::new(HigherThan(2.0));
    let signal = threshold.observe();
    source.to(move |interval| threshold.receive(interval));

    source.receive(0.0, 0.0);
    source.receive(1.0, 4.0);

    // The source's linear ramp crosses the threshold partway through, so the
    // unary node splits it into a below/above pair before notifying.
    let (t, v) = signal.borrow().get_points();
    assert_eq!(t.len(), 4);
    assert!(v.contains(&1.0));
    assert!(v.contains(&0.0));
}

#[test]
fn binary_node_fed_by_two_pwc_sources() {
    let mut left_source = PwcSourceNode::new();
    let mut right_source = PwcSourceNode::new();
    let combined = Rc::new(RefCell::new(BinaryNode::new(Add)));

    {
        let combined = combined.clone();
        left_source.to(move |interval| combined.borrow_mut().receive_left(interval));
    }
    {
        let combined = combined.clone();
        right_source.to(move |interval| combined.borrow_mut().receive_right(interval));
    }
    let signal = combined.borrow_mut().observe();

    left_source.receive(0.0, 1.0);
    left_source.receive(1.0, 1.0);
    right_source.receive(0.0, 2.0);
    right_source.receive(1.0, 2.0);

    let (_, v) = signal.borrow().get_points();
    assert!(v.iter().all(|&value| value == 3.0));
}

#[test]
fn window_node_computes_running_mean_via_integral_and_const() {
    let window_length = 2.0;
    let window = Rc::new(RefCell::new(WindowNode::new(window_length, Integral::new())));
    let mut mean = UnaryNode::new(MultConst(1.0 / window_length));
    let signal = mean.observe();
    window.borrow_mut().to(move |interval| mean.receive(interval));

    let mut source = PwlSourceNode::new();
    {
        let window = window.clone();
        source.to(move |interval| window.borrow_mut().receive(interval));
    }

    source.receive(0.0, 4.0);
    source.receive(1.0, 4.0);
    source.receive(2.0, 4.0);
    source.receive(3.0, 4.0);

    let (_, v) = signal.borrow().get_points();
    assert!(!v.is_empty());
    assert!(v.iter().all(|&value| (value - 4.0).abs() < 1e-5));
}

#[test]
fn filter_blocks_left_signal_when_right_is_zero() {
    let value = Rc::new(RefCell::new(BinaryNode::new(Filter)));

    let left = Interval::new(0.0, 1.0, Polynomial::constant(10.0));
    let gate_open = Interval::new(0.0, 1.0, Polynomial::constant(1.0));
    let gate_closed = Interval::new(1.0, 2.0, Polynomial::constant(0.0));
    let left_tail = Interval::new(1.0, 2.0, Polynomial::constant(20.0));

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = seen.clone();
        value.borrow_mut().to(move |interval| sink.borrow_mut().push(interval));
    }

    value.borrow_mut().receive_left(left);
    value.borrow_mut().receive_right(gate_open);
    value.borrow_mut().receive_left(left_tail);
    value.borrow_mut().receive_right(gate_closed);

    let seen = seen.borrow();
    assert_eq!(seen[0].function, Polynomial::constant(10.0));
    assert!(seen[1].is_undefined());
}

struct SumAll;
impl NaryOp for SumAll {
    fn apply(&self, intervals: Vec<Interval>) -> Result<Interval, pwsignal::Error> {
        let (start, end) = (intervals[0].start, intervals[0].end);
        let total: f64 = intervals.iter().map(|i| i.function.evaluate(start)).sum();
        Ok(Interval::new(start, end, Polynomial::constant(total)))
    }
}

#[test]
fn nary_node_wired_by_variable_name_sums_three_inputs() {
    let mut node = NaryNode::new(SumAll);
    node.add_receiver("a");
    node.add_receiver("b");
    node.add_receiver("c");
    let received = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = received.clone();
        node.to(move |interval| sink.borrow_mut().push(interval));
    }

    node.receive("a", Interval::new(0.0, 1.0, Polynomial::constant(1.0)));
    node.receive("b", Interval::new(0.0, 1.0, Polynomial::constant(2.0)));
    node.receive("c", Interval::new(0.0, 1.0, Polynomial::constant(3.0)));

    assert_eq!(received.borrow().len(), 1);
    assert_eq!(received.borrow()[0].function, Polynomial::constant(6.0));
}

#[test]
fn memory_wires_a_computation_by_variable_name_and_records_the_signal() {
    let mut memory = Memory::new();
    let mut doubled = UnaryNode::new(MultConst(2.0));
    let signal = doubled.observe();
    memory.add_computation("x", move |interval| doubled.receive(interval));

    memory.receive("x", Interval::new(0.0, 1.0, Polynomial::constant(5.0)));

    assert_eq!(memory.get_value("x").unwrap(), Interval::new(0.0, 1.0, Polynomial::constant(5.0)));
    assert_eq!(signal.borrow().get_points().1, vec![10.0, 10.0]);
}
