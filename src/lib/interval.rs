//! A maximal contiguous time range carrying a single polynomial, and the
//! algebra over it: arithmetic, pointwise min/max, thresholding, shifting,
//! integration, and crossing-aware partitioning.

use crate::poly::Polynomial;
use crate::queue::TimedValue;
use crate::Error;

const EPS: f64 = 1e-5;

fn numerically_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// `(start, end, function)` with `start <= end`. Value-typed and immutable
/// after construction; every transformation below returns a new `Interval`.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub function: Polynomial,
}

impl Interval {
    pub fn new(start: f64, end: f64, function: Polynomial) -> Self {
        Interval { start, end, function }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Splits at `self.start + time`, failing if that position falls
    /// outside `[start, end]`.
    pub fn split(&self, time: f64) -> Result<(Interval, Interval), Error> {
        if time < -EPS || time > self.length() + EPS {
            return Err(Error::InvalidSplit);
        }
        let split_time = self.start + time;
        Ok((
            Interval::new(self.start, split_time, self.function),
            Interval::new(split_time, self.end, self.function),
        ))
    }

    /// Same function, new endpoints. Caller ensures containment.
    pub fn subset(&self, start: f64, end: f64) -> Interval {
        Interval::new(start, end, self.function)
    }

    fn require_same_bounds(&self, other: &Interval) -> Result<(), Error> {
        if !numerically_equal(self.start, other.start) || !numerically_equal(self.end, other.end) {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }

    pub fn add(&self, other: &Interval) -> Result<Interval, Error> {
        self.require_same_bounds(other)?;
        Ok(Interval::new(self.start, self.end, self.function.add(&other.function)))
    }

    pub fn sub(&self, other: &Interval) -> Result<Interval, Error> {
        self.require_same_bounds(other)?;
        Ok(Interval::new(self.start, self.end, self.function.sub(&other.function)))
    }

    /// Definite integral `F(end) - F(start)`. Fails on a degree-2 function:
    /// the engine's compositions never require integrating a quadratic.
    pub fn integrate(&self) -> Result<f64, Error> {
        if matches!(self.function, Polynomial::Quadratic { .. }) {
            return Err(Error::InvalidDegree);
        }
        let antiderivative = self.function.integral();
        Ok(antiderivative.evaluate(self.end) - antiderivative.evaluate(self.start))
    }

    /// An interval whose function is the antiderivative anchored so
    /// `F(start) = 0`.
    pub fn integral(&self) -> Result<Interval, Error> {
        let antiderivative = self.function.integral();
        let value_at_start = antiderivative.evaluate(self.start);
        let anchored = antiderivative
            .into_polynomial()
            .ok_or(Error::InvalidDegree)?
            .sub(&Polynomial::constant(value_at_start));
        Ok(Interval::new(self.start, self.end, anchored))
    }

    /// Translates this interval's domain onto `other`'s, adjusting the
    /// polynomial so values align at the new start.
    pub fn move_above(&self, other: &Interval) -> Interval {
        let delta = self.start - other.start;
        Interval::new(other.start, other.end, self.function.add_to_x(delta))
    }

    /// Translates the interval on the time axis by `delta`.
    pub fn shift(&self, delta: f64) -> Interval {
        Interval::new(self.start + delta, self.end + delta, self.function.add_to_x(-delta))
    }

    /// Restricts to `other`'s endpoints; fails if `other` is not contained
    /// in `self`.
    pub fn project_onto(&self, other: &Interval) -> Result<Interval, Error> {
        if self.start > other.start + EPS || self.end < other.end - EPS {
            return Err(Error::InvalidProjection);
        }
        Ok(Interval::new(other.start, other.end, self.function))
    }

    /// Real roots of `self.function - other.function` within `[start, end]`.
    pub fn zeros(&self, other: &Interval) -> Vec<f64> {
        self.function
            .sub(&other.function)
            .zeros()
            .into_iter()
            .filter(|z| *z >= self.start - EPS && *z <= self.end + EPS)
            .collect()
    }

    pub fn apply_operator<F: Fn(&Polynomial) -> Polynomial>(&self, operator: F) -> Interval {
        Interval::new(self.start, self.end, operator(&self.function))
    }

    pub fn apply_binary_operator<F: Fn(&Polynomial, &Polynomial) -> Polynomial>(
        &self,
        operator: F,
        other: &Interval,
    ) -> Result<Interval, Error> {
        self.require_same_bounds(other)?;
        Ok(Interval::new(self.start, self.end, operator(&self.function, &other.function)))
    }

    pub fn get_extreme_value(&self) -> (f64, f64) {
        (self.function.evaluate(self.start), self.function.evaluate(self.end))
    }

    pub fn get_extreme_value_with_time(&self) -> (TimedValue, TimedValue) {
        let (left, right) = self.get_extreme_value();
        (TimedValue::new(self.start, left), TimedValue::new(self.end, right))
    }

    pub fn is_increasing(&self) -> bool {
        let (left, right) = self.get_extreme_value();
        left < right
    }

    pub fn is_decreasing(&self) -> bool {
        let (left, right) = self.get_extreme_value();
        right < left
    }

    pub fn is_constant(&self) -> bool {
        let (left, right) = self.get_extreme_value();
        numerically_equal(left, right)
    }

    pub fn is_undefined(&self) -> bool {
        self.function.is_undefined()
    }

    /// Builds the `[s, z1, z2, ..., e]` partition over a sorted, deduplicated
    /// set of interior crossings, shared by `min_interval`/`max_interval`
    /// and the threshold operators.
    fn partition_points(&self, zeros: &[f64]) -> Vec<f64> {
        let mut points = Vec::with_capacity(zeros.len() + 2);
        if zeros.first().map(|z| !numerically_equal(*z, self.start)).unwrap_or(true) {
            points.push(self.start);
        }
        points.extend_from_slice(zeros);
        if zeros.last().map(|z| !numerically_equal(*z, self.end)).unwrap_or(true) {
            points.push(self.end);
        }
        points
    }

    /// Pointwise minimum of `self` and `other`, partitioned at their
    /// crossings. Both must share endpoints.
    pub fn min_interval(&self, other: &Interval) -> Result<Vec<Interval>, Error> {
        self.require_same_bounds(other)?;
        let (self_left, _) = self.get_extreme_value();
        let (other_left, _) = other.get_extreme_value();
        let zeros = self.zeros(other);
        if zeros.is_empty() {
            return Ok(vec![if self_left <= other_left { *self } else { *other }]);
        }
        let points = self.partition_points(&zeros);
        let mut result = Vec::with_capacity(points.len() - 1);
        for window in points.windows(2) {
            let mid = (window[0] + window[1]) / 2.0;
            let function = if self.function.evaluate(mid) <= other.function.evaluate(mid) {
                self.function
            } else {
                other.function
            };
            result.push(Interval::new(window[0], window[1], function));
        }
        Ok(result)
    }

    /// Pointwise maximum of `self` and `other`, partitioned at their
    /// crossings. Both must share endpoints.
    pub fn max_interval(&self, other: &Interval) -> Result<Vec<Interval>, Error> {
        self.require_same_bounds(other)?;
        let (self_left, _) = self.get_extreme_value();
        let (other_left, _) = other.get_extreme_value();
        let zeros = self.zeros(other);
        if zeros.is_empty() {
            return Ok(vec![if self_left <= other_left { *other } else { *self }]);
        }
        let points = self.partition_points(&zeros);
        let mut result = Vec::with_capacity(points.len() - 1);
        for window in points.windows(2) {
            let mid = (window[0] + window[1]) / 2.0;
            let function = if self.function.evaluate(mid) <= other.function.evaluate(mid) {
                other.function
            } else {
                self.function
            };
            result.push(Interval::new(window[0], window[1], function));
        }
        Ok(result)
    }

    fn threshold(&self, threshold: f64, higher: bool) -> Vec<Interval> {
        let constant = Interval::new(self.start, self.end, Polynomial::constant(threshold));
        let zeros = self.zeros(&constant);
        let classify = |value: f64| -> f64 {
            let above = if higher { value > threshold } else { value < threshold };
            if above { 1.0 } else { 0.0 }
        };
        if zeros.is_empty() {
            let value_at_start = self.function.evaluate(self.start);
            return vec![Interval::new(self.start, self.end, Polynomial::constant(classify(value_at_start)))];
        }
        let points = self.partition_points(&zeros);
        points
            .windows(2)
            .map(|window| {
                let mid = (window[0] + window[1]) / 2.0;
                Interval::new(window[0], window[1], Polynomial::constant(classify(self.function.evaluate(mid))))
            })
            .collect()
    }

    pub fn higher_than(&self, threshold: f64) -> Vec<Interval> {
        self.threshold(threshold, true)
    }

    pub fn lower_than(&self, threshold: f64) -> Vec<Interval> {
        self.threshold(threshold, false)
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        numerically_equal(self.start, other.start)
            && numerically_equal(self.end, other.end)
            && self.function == other.function
    }
}
