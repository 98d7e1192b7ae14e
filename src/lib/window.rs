//! Sliding fixed-length temporal window. Buffers the intervals currently
//! intersecting `[wl, wr]` and emits `add`/`move` events to its observer as
//! new intervals arrive.

use crate::interval::Interval;
use log::trace;

const EPS: f64 = 1e-5;

fn numerically_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Receives the events a `WindowInterval` produces as it fills and slides.
pub trait WindowObserver {
    fn add(&mut self, interval: Interval);
    fn on_move(&mut self, removed: Interval, added: Interval);
}

/// Sliding window of configured length `L`. Opens on the first received
/// interval and persists for the lifetime of the owning node.
pub struct WindowInterval {
    length: f64,
    wl: Option<f64>,
    wr: Option<f64>,
    intervals: Vec<Interval>,
}

impl WindowInterval {
    pub fn new(length: f64) -> Self {
        WindowInterval { length, wl: None, wr: None, intervals: Vec::new() }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Feeds one upstream interval through the window, driving `add`/`move`
    /// callbacks on `observer` per §4.4.
    pub fn add<O: WindowObserver>(&mut self, interval: Interval, observer: &mut O) {
        self.intervals.push(interval);
        if self.wr.is_none() {
            self.wr = Some(interval.start);
            self.wl = Some(interval.start);
        }
        let wl = self.wl.unwrap();
        let mut wr = self.wr.unwrap();
        if (wr - wl) + interval.length() <= self.length + EPS {
            wr += interval.length();
            self.wr = Some(wr);
            observer.add(interval);
        } else {
            observer.add(interval.subset(wr, wl + self.length));
            wr = wl + self.length;
            self.wr = Some(wr);
            while !numerically_equal(self.wr.unwrap(), self.intervals.last().unwrap().end) {
                self.slide(observer);
            }
        }
    }

    fn slide<O: WindowObserver>(&mut self, observer: &mut O) {
        let wl = self.wl.unwrap();
        let wr = self.wr.unwrap();
        let head = self.intervals.first().copied().unwrap();
        let last_buffered = self.intervals.last().copied().unwrap();
        let delta = (head.end - wl).min(last_buffered.end - wr).min(self.length);

        let removed;
        if delta < head.end - wl - EPS {
            let (left, right) = head.split(delta).unwrap();
            removed = left;
            self.intervals[0] = right;
        } else {
            removed = self.intervals.remove(0);
        }
        let added = last_buffered.subset(wr, wr + delta);
        let new_wr = wr + delta;
        self.wr = Some(new_wr);
        self.wl = Some(self.intervals.first().map(|i| i.start).unwrap_or(new_wr));
        trace!("window slid by {delta} to [{}, {}]", self.wl.unwrap(), new_wr);
        observer.on_move(removed, added);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Polynomial;

    #[derive(Default)]
    struct Recorder {
        adds: Vec<Interval>,
        moves: Vec<(Interval, Interval)>,
    }

    impl WindowObserver for Recorder {
        fn add(&mut self, interval: Interval) {
            self.adds.push(interval);
        }
        fn on_move(&mut self, removed: Interval, added: Interval) {
            self.moves.push((removed, added));
        }
    }

    fn iv(s: f64, e: f64, v: f64) -> Interval {
        Interval::new(s, e, Polynomial::constant(v))
    }

    #[test]
    fn fill_and_slide_l1() {
        let mut window = WindowInterval::new(1.0);
        let mut rec = Recorder::default();
        window.add(iv(0.0, 0.5, 0.0), &mut rec);
        window.add(iv(0.5, 0.8, 1.0), &mut rec);
        window.add(iv(0.8, 1.2, 2.0), &mut rec);
        window.add(iv(1.2, 1.6, 3.0), &mut rec);

        // The fourth sample arrives exactly when the window is already full
        // length, so its "fill" chunk is the zero-width point at wl+length.
        assert_eq!(
            rec.adds,
            vec![iv(0.0, 0.5, 0.0), iv(0.5, 0.8, 1.0), iv(0.8, 1.0, 2.0), iv(1.2, 1.2, 3.0)]
        );
        assert_eq!(rec.moves.len(), 3);
        assert_eq!(rec.moves[0], (iv(0.0, 0.2, 0.0), iv(1.0, 1.2, 2.0)));
        assert_eq!(rec.moves[1], (iv(0.2, 0.5, 0.0), iv(1.2, 1.5, 3.0)));
        assert_eq!(rec.moves[2], (iv(0.5, 0.6, 1.0), iv(1.5, 1.6, 3.0)));
    }

    #[test]
    fn window_larger_than_first_input() {
        let mut window = WindowInterval::new(2.0);
        let mut rec = Recorder::default();
        window.add(iv(0.0, 2.5, 0.0), &mut rec);

        assert_eq!(rec.adds, vec![iv(0.0, 2.0, 0.0)]);
        assert_eq!(rec.moves, vec![(iv(0.0, 0.5, 0.0), iv(2.0, 2.5, 0.0))]);
    }

    #[test]
    fn window_stays_within_length_bound() {
        let mut window = WindowInterval::new(1.0);
        let mut rec = Recorder::default();
        for i in 0..10 {
            window.add(iv(i as f64 * 0.3, (i + 1) as f64 * 0.3, i as f64), &mut rec);
            if let (Some(wl), Some(wr)) = (window.wl, window.wr) {
                assert!(wr - wl <= window.length + EPS);
                assert!(wl <= wr + EPS);
            }
        }
    }
}
