//! Laplace potential kernel.
use std::marker::PhantomData;
use std::ops::AddAssign;

use num::Float;

use crate::kernel::point::Point3;
use crate::traits::kernel::{Kernel, SymmetricKernel};

/// Single particle Laplace potential, `K(t, s) = 1 / (4 pi |t - s|)`.
///
/// Coincident points contribute zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaplacePotential<T> {
    _scalar: PhantomData<T>,
}

impl<T> LaplacePotential<T> {
    /// Constructor
    pub fn new() -> Self {
        Self {
            _scalar: PhantomData,
        }
    }
}

fn inv_four_pi<T: Float>() -> T {
    T::from(0.25 / std::f64::consts::PI).unwrap()
}

impl<T> Kernel for LaplacePotential<T>
where
    T: Float + AddAssign + Send + Sync,
{
    type Source = Point3<T>;
    type Target = Point3<T>;
    type Charge = T;
    type Result = T;

    fn accumulate(
        &self,
        target: &Self::Target,
        source: &Self::Source,
        charge: &Self::Charge,
        result: &mut Self::Result,
    ) {
        let r2 = target.distance_square(source);
        if r2 > T::zero() {
            *result += inv_four_pi::<T>() / r2.sqrt() * *charge;
        }
    }
}

impl<T> SymmetricKernel for LaplacePotential<T>
where
    T: Float + AddAssign + Send + Sync,
{
    fn accumulate_pair(
        &self,
        a: &Self::Source,
        ca: &Self::Charge,
        ra: &mut Self::Result,
        b: &Self::Source,
        cb: &Self::Charge,
        rb: &mut Self::Result,
    ) {
        let r2 = a.distance_square(b);
        if r2 > T::zero() {
            let k = inv_four_pi::<T>() / r2.sqrt();
            *ra += k * *cb;
            *rb += k * *ca;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_value() {
        let kernel = LaplacePotential::<f64>::new();
        let t = Point3::new(0.0, 0.0, 0.0);
        let s = Point3::new(1.0, 0.0, 0.0);
        let mut r = 0.0;
        kernel.accumulate(&t, &s, &2.0, &mut r);
        assert_relative_eq!(r, 2.0 / (4.0 * std::f64::consts::PI), epsilon = 1e-15);
    }

    #[test]
    fn test_singularity_is_skipped() {
        let kernel = LaplacePotential::<f64>::new();
        let t = Point3::new(0.5, 0.5, 0.5);
        let mut r = 0.0;
        kernel.accumulate(&t, &t, &1.0, &mut r);
        assert_relative_eq!(r, 0.0);
    }

    #[test]
    fn test_pair_matches_two_evaluations() {
        let kernel = LaplacePotential::<f64>::new();
        let a = Point3::new(0.1, 0.2, 0.3);
        let b = Point3::new(0.9, 0.5, 0.4);
        let (ca, cb) = (0.7, 1.3);

        let (mut ra, mut rb) = (0.0, 0.0);
        kernel.accumulate_pair(&a, &ca, &mut ra, &b, &cb, &mut rb);

        let (mut ra_ref, mut rb_ref) = (0.0, 0.0);
        kernel.accumulate(&a, &b, &cb, &mut ra_ref);
        kernel.accumulate(&b, &a, &ca, &mut rb_ref);

        assert_relative_eq!(ra, ra_ref, epsilon = 1e-15);
        assert_relative_eq!(rb, rb_ref, epsilon = 1e-15);
    }
}
