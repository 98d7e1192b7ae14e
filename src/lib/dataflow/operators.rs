//! Interval-level operators (C8): thin callables used by the generic
//! unary/binary dataflow nodes, composed from `Interval`/`Polynomial`.

use crate::interval::Interval;
use crate::poly::Polynomial;
use crate::Error;

/// A single-interval transform producing zero or more output intervals.
pub trait UnaryOp {
    fn apply(&self, interval: Interval) -> Result<Vec<Interval>, Error>;
}

/// A two-interval transform producing zero or more output intervals.
pub trait BinaryOp {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error>;
}

pub struct Add;
impl BinaryOp for Add {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error> {
        Ok(vec![left.add(&right)?])
    }
}

pub struct Sub;
impl BinaryOp for Sub {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error> {
        Ok(vec![left.sub(&right)?])
    }
}

pub struct Min;
impl BinaryOp for Min {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error> {
        left.min_interval(&right)
    }
}

pub struct Max;
impl BinaryOp for Max {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error> {
        left.max_interval(&right)
    }
}

/// Returns `left` if `right` is the constant-1 polynomial, otherwise an
/// undefined interval on `left`'s domain.
pub struct Filter;
impl BinaryOp for Filter {
    fn apply(&self, left: Interval, right: Interval) -> Result<Vec<Interval>, Error> {
        if right.function == Polynomial::constant(1.0) {
            Ok(vec![left])
        } else {
            Ok(vec![Interval::new(left.start, left.end, Polynomial::undefined())])
        }
    }
}

pub struct HigherThan(pub f64);
impl UnaryOp for HigherThan {
    fn apply(&self, interval: Interval) -> Result<Vec<Interval>, Error> {
        Ok(interval.higher_than(self.0))
    }
}

pub struct LowerThan(pub f64);
impl UnaryOp for LowerThan {
    fn apply(&self, interval: Interval) -> Result<Vec<Interval>, Error> {
        Ok(interval.lower_than(self.0))
    }
}

pub struct Shift(pub f64);
impl UnaryOp for Shift {
    fn apply(&self, interval: Interval) -> Result<Vec<Interval>, Error> {
        Ok(vec![interval.shift(self.0)])
    }
}

pub struct MultConst(pub f64);
impl UnaryOp for MultConst {
    fn apply(&self, interval: Interval) -> Result<Vec<Interval>, Error> {
        Ok(vec![interval.apply_operator(|p| p.mult_by_const(self.0))])
    }
}
