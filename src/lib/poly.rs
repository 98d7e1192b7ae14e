//! Degree-<=2 real polynomial algebra, including a distinguished `Undefined`
//! variant used to represent "no information" regions of a signal.

const EPS: f64 = 1e-5;

fn numerically_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// A real polynomial of degree at most 2, or the distinguished `Undefined`
/// marker. `Undefined` propagates through every binary operation and its
/// root set is always empty.
#[derive(Debug, Clone, Copy)]
pub enum Polynomial {
    Undefined,
    Constant(f64),
    Linear { a: f64, b: f64 },
    Quadratic { a: f64, b: f64, c: f64 },
}

impl Polynomial {
    pub fn undefined() -> Self {
        Polynomial::Undefined
    }

    pub fn constant(value: f64) -> Self {
        Polynomial::Constant(value)
    }

    /// `a*x + b`
    pub fn linear(a: f64, b: f64) -> Self {
        Polynomial::Linear { a, b }
    }

    /// `a*x^2 + b*x + c`
    pub fn full(a: f64, b: f64, c: f64) -> Self {
        Polynomial::Quadratic { a, b, c }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Polynomial::Undefined)
    }

    /// Evaluates the polynomial at `x`. Evaluating `Undefined` returns `NaN`:
    /// callers that care about gaps check `is_undefined` first.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Polynomial::Undefined => f64::NAN,
            Polynomial::Constant(c) => *c,
            Polynomial::Linear { a, b } => a * x + b,
            Polynomial::Quadratic { a, b, c } => a * x * x + b * x + c,
        }
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        if self.is_undefined() || other.is_undefined() {
            return Polynomial::Undefined;
        }
        let (a1, b1, c1) = self.coeffs();
        let (a2, b2, c2) = other.coeffs();
        Polynomial::normalize(a1 + a2, b1 + b2, c1 + c2)
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        if self.is_undefined() || other.is_undefined() {
            return Polynomial::Undefined;
        }
        let (a1, b1, c1) = self.coeffs();
        let (a2, b2, c2) = other.coeffs();
        Polynomial::normalize(a1 - a2, b1 - b2, c1 - c2)
    }

    pub fn mult_by_const(&self, k: f64) -> Polynomial {
        if self.is_undefined() {
            return Polynomial::Undefined;
        }
        let (a, b, c) = self.coeffs();
        Polynomial::normalize(a * k, b * k, c * k)
    }

    /// Symbolic antiderivative. A quadratic's antiderivative is a cubic,
    /// which has no representation here: callers that only ever integrate
    /// degree-<=1 polynomials (the only compositions the engine allows,
    /// see `Interval::integrate`/`Interval::integral`) never hit this path
    /// in a way that escapes the degree-<=2 family, since a linear's
    /// antiderivative is quadratic and a constant's is linear.
    pub fn integral(&self) -> Antiderivative {
        match self {
            Polynomial::Undefined => Antiderivative::Undefined,
            Polynomial::Constant(c) => Antiderivative::Linear { a: *c, b: 0.0 },
            Polynomial::Linear { a, b } => {
                Antiderivative::Quadratic { a: a / 2.0, b: *b, c: 0.0 }
            }
            Polynomial::Quadratic { a, b, c } => {
                Antiderivative::Cubic { a: a / 3.0, b: b / 2.0, c: *c, d: 0.0 }
            }
        }
    }

    /// `p(x + delta)`: shifts the polynomial's domain.
    pub fn add_to_x(&self, delta: f64) -> Polynomial {
        match self {
            Polynomial::Undefined => Polynomial::Undefined,
            Polynomial::Constant(c) => Polynomial::Constant(*c),
            Polynomial::Linear { a, b } => Polynomial::Linear { a: *a, b: b + a * delta },
            Polynomial::Quadratic { a, b, c } => Polynomial::Quadratic {
                a: *a,
                b: b + 2.0 * a * delta,
                c: c + b * delta + a * delta * delta,
            },
        }
    }

    /// Real roots of this polynomial, unfiltered by any domain. `Undefined`
    /// and a zero constant both return an empty list (spec: "no isolated
    /// zeros" for a zero constant, since every point is a root).
    pub fn zeros(&self) -> Vec<f64> {
        match self {
            Polynomial::Undefined => vec![],
            Polynomial::Constant(_) => vec![],
            Polynomial::Linear { a, b } => {
                if a.abs() < EPS {
                    vec![]
                } else {
                    vec![-b / a]
                }
            }
            Polynomial::Quadratic { a, b, c } => {
                if a.abs() < EPS {
                    return Polynomial::Linear { a: *b, b: *c }.zeros();
                }
                let discriminant = b * b - 4.0 * a * c;
                if discriminant < -EPS {
                    vec![]
                } else if discriminant.abs() < EPS {
                    vec![-b / (2.0 * a)]
                } else {
                    let sqrt_d = discriminant.sqrt();
                    let r1 = (-b - sqrt_d) / (2.0 * a);
                    let r2 = (-b + sqrt_d) / (2.0 * a);
                    if r1 < r2 {
                        vec![r1, r2]
                    } else {
                        vec![r2, r1]
                    }
                }
            }
        }
    }

    fn coeffs(&self) -> (f64, f64, f64) {
        match self {
            Polynomial::Undefined => (0.0, 0.0, 0.0),
            Polynomial::Constant(c) => (0.0, 0.0, *c),
            Polynomial::Linear { a, b } => (0.0, *a, *b),
            Polynomial::Quadratic { a, b, c } => (*a, *b, *c),
        }
    }

    fn normalize(a: f64, b: f64, c: f64) -> Polynomial {
        if a.abs() < EPS {
            if b.abs() < EPS {
                Polynomial::Constant(c)
            } else {
                Polynomial::Linear { a: b, b: c }
            }
        } else {
            Polynomial::Quadratic { a, b, c }
        }
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Polynomial::Undefined, Polynomial::Undefined) => true,
            (Polynomial::Undefined, _) | (_, Polynomial::Undefined) => false,
            _ => {
                let (a1, b1, c1) = self.coeffs();
                let (a2, b2, c2) = other.coeffs();
                numerically_equal(a1, a2) && numerically_equal(b1, b2) && numerically_equal(c1, c2)
            }
        }
    }
}

/// Result of integrating a `Polynomial`. Carried separately from
/// `Polynomial` because a quadratic's antiderivative is a cubic, which has
/// no degree-<=2 representation; only the degree-<=1 paths the engine
/// actually uses get folded back into a `Polynomial` (see `Interval`).
#[derive(Debug, Clone, Copy)]
pub enum Antiderivative {
    Undefined,
    Linear { a: f64, b: f64 },
    Quadratic { a: f64, b: f64, c: f64 },
    Cubic { a: f64, b: f64, c: f64, d: f64 },
}

impl Antiderivative {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Antiderivative::Undefined => f64::NAN,
            Antiderivative::Linear { a, b } => a * x + b,
            Antiderivative::Quadratic { a, b, c } => a * x * x + b * x + c,
            Antiderivative::Cubic { a, b, c, d } => a * x * x * x + b * x * x + c * x + d,
        }
    }

    /// Downgrades back to a `Polynomial`, failing if the antiderivative was
    /// actually a cubic (i.e. the source was a quadratic).
    pub fn into_polynomial(self) -> Option<Polynomial> {
        match self {
            Antiderivative::Undefined => Some(Polynomial::Undefined),
            Antiderivative::Linear { a, b } => Some(Polynomial::normalize(0.0, a, b)),
            Antiderivative::Quadratic { a, b, c } => Some(Polynomial::normalize(a, b, c)),
            Antiderivative::Cubic { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_has_no_zeros() {
        assert!(Polynomial::constant(0.0).zeros().is_empty());
        assert!(Polynomial::constant(4.0).zeros().is_empty());
    }

    #[test]
    fn linear_zero() {
        let p = Polynomial::linear(2.0, -4.0);
        assert_eq!(p.zeros(), vec![2.0]);
    }

    #[test]
    fn quadratic_two_zeros() {
        let p = Polynomial::full(1.0, 0.0, -1.0);
        let zeros = p.zeros();
        assert_eq!(zeros.len(), 2);
        assert!(numerically_equal(zeros[0], -1.0));
        assert!(numerically_equal(zeros[1], 1.0));
    }

    #[test]
    fn quadratic_no_real_zeros() {
        let p = Polynomial::full(1.0, 0.0, 1.0);
        assert!(p.zeros().is_empty());
    }

    #[test]
    fn undefined_propagates() {
        let u = Polynomial::undefined();
        let c = Polynomial::constant(3.0);
        assert!(u.add(&c).is_undefined());
        assert!(c.add(&u).is_undefined());
        assert!(u.zeros().is_empty());
    }

    #[test]
    fn shift_matches_evaluation() {
        let p = Polynomial::linear(2.0, 1.0);
        let shifted = p.add_to_x(3.0);
        assert!(numerically_equal(shifted.evaluate(0.0), p.evaluate(3.0)));
    }
}
