//! Graph/Memory wiring (C7): a `Memory` maps variable names to the last
//! interval produced on them and fans emissions out to subscribers. `Signal`
//! is the observation sink used at graph boundaries.

use crate::interval::Interval;
use log::info;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Accumulates every interval it is fed and renders them to `(t[], v[])`
/// point lists for plotting/inspection, sampling 2 endpoints for degree <=1
/// functions and 20 evenly spaced points for degree-2 functions.
#[derive(Default)]
pub struct Signal {
    intervals: Vec<Interval>,
}

impl Signal {
    pub fn new() -> Self {
        Signal { intervals: Vec::new() }
    }

    pub fn append(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn get_points(&self) -> (Vec<f64>, Vec<f64>) {
        let mut t = Vec::new();
        let mut v = Vec::new();
        for interval in &self.intervals {
            if matches!(interval.function, crate::poly::Polynomial::Quadratic { .. }) {
                const SAMPLES: usize = 20;
                for i in 0..SAMPLES {
                    let time = interval.start + (interval.end - interval.start) * (i as f64) / (SAMPLES as f64 - 1.0);
                    t.push(time);
                    v.push(interval.function.evaluate(time));
                }
            } else {
                t.push(interval.start);
                v.push(interval.function.evaluate(interval.start));
                t.push(interval.end);
                v.push(interval.function.evaluate(interval.end));
            }
        }
        (t, v)
    }
}

/// A single-argument callback a node fans its output out to. Downstream
/// nodes register their `receive`/`receive_left`/`receive_right` methods
/// here; the generic dataflow nodes in `dataflow` hold one of these
/// themselves.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn FnMut(Interval)>>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    pub fn to<F: FnMut(Interval) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    pub fn notify(&mut self, interval: Interval) {
        for observer in &mut self.observers {
            observer(interval);
        }
    }

    pub fn notify_multiple(&mut self, intervals: Vec<Interval>) {
        for interval in intervals {
            self.notify(interval);
        }
    }

    /// Registers a fresh `Signal` as an observer and returns a handle to it.
    pub fn observe(&mut self) -> Rc<RefCell<Signal>> {
        let signal = Rc::new(RefCell::new(Signal::new()));
        let sink = signal.clone();
        self.to(move |interval| sink.borrow_mut().append(interval));
        signal
    }
}

/// Anything that can receive a single interval on a given named input
/// (n-ary nodes), matching spec.md's "capability set" note on dispatch.
pub trait NaryReceiver {
    fn add_receiver(&mut self, name: &str);
    fn receive(&mut self, name: &str, interval: Interval);
}

/// Variable -> latest interval, and variable -> subscriber fan-out.
#[derive(Default)]
pub struct Memory {
    memory: HashMap<String, Interval>,
    observers: HashMap<String, Vec<Box<dyn FnMut(Interval)>>>,
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    pub fn add_computation<F: FnMut(Interval) + 'static>(&mut self, from_variable: &str, computation: F) {
        info!("registering a subscriber on variable \"{from_variable}\"");
        self.observers.entry(from_variable.to_string()).or_default().push(Box::new(computation));
    }

    /// Publishes `interval` under `variable`, updating the latest-value map
    /// and firing every subscriber synchronously.
    pub fn receive(&mut self, variable: &str, interval: Interval) {
        self.memory.insert(variable.to_string(), interval);
        if let Some(subscribers) = self.observers.get_mut(variable) {
            for subscriber in subscribers {
                subscriber(interval);
            }
        }
    }

    pub fn get_value(&self, variable: &str) -> Option<Interval> {
        self.memory.get(variable).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Polynomial;

    #[test]
    fn signal_samples_two_points_for_linear() {
        let mut signal = Signal::new();
        signal.append(Interval::new(0.0, 1.0, Polynomial::linear(1.0, 0.0)));
        let (t, v) = signal.get_points();
        assert_eq!(t.len(), 2);
        assert_eq!(v, vec![0.0, 1.0]);
    }

    #[test]
    fn signal_samples_twenty_points_for_quadratic() {
        let mut signal = Signal::new();
        signal.append(Interval::new(0.0, 1.0, Polynomial::full(1.0, 0.0, 0.0)));
        let (t, _v) = signal.get_points();
        assert_eq!(t.len(), 20);
    }

    #[test]
    fn memory_fans_out_to_subscribers() {
        let mut memory = Memory::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        memory.add_computation("x", move |interval| sink.borrow_mut().push(interval));
        memory.receive("x", Interval::new(0.0, 1.0, Polynomial::constant(1.0)));
        assert_eq!(received.borrow().len(), 1);
        assert_eq!(memory.get_value("x").unwrap(), Interval::new(0.0, 1.0, Polynomial::constant(1.0)));
    }
}
