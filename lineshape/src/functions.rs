//! Narrow scalar-function contracts.
//!
//! The atomic-data layer supplies density/energy dependent intensity ratios
//! and field-dependent Zeeman component positions as opaque real-valued
//! functions. Models accept anything satisfying these traits; closures get
//! blanket implementations so callers can pass plain `|x| ...` lambdas.

/// A real-valued function of one variable.
pub trait Function1D: Send + Sync {
    /// Evaluate the function at `x`.
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> Function1D for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A real-valued function of two variables.
pub trait Function2D: Send + Sync {
    /// Evaluate the function at `(x, y)`.
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

impl<F> Function2D for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_satisfy_the_contracts() {
        let linear = |x: f64| 2.0 * x + 1.0;
        assert_eq!(Function1D::evaluate(&linear, 3.0), 7.0);

        let product = |x: f64, y: f64| x * y;
        assert_eq!(Function2D::evaluate(&product, 3.0, 4.0), 12.0);
    }
}
