//! Softened inverse square kernel.
use std::ops::AddAssign;

use num::Float;

use crate::kernel::point::Point3;
use crate::traits::kernel::{Kernel, SymmetricKernel};

/// Inverse square kernel, `K(t, s) = c / (|t - s|^2 + eta)`.
///
/// The softening `eta` keeps the diagonal finite, so diagonal blocks need no
/// special casing.
#[derive(Clone, Copy, Debug)]
pub struct InvSq<T> {
    /// Numerator constant
    pub coefficient: T,
    /// Softening added to the squared distance
    pub eta: T,
}

impl<T> InvSq<T>
where
    T: Float,
{
    /// Constructor
    pub fn new(coefficient: T, eta: T) -> Self {
        Self { coefficient, eta }
    }
}

impl<T> Default for InvSq<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(T::one(), T::from(1e-10).unwrap())
    }
}

impl<T> Kernel for InvSq<T>
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
        *result += self.coefficient / (r2 + self.eta) * *charge;
    }
}

impl<T> SymmetricKernel for InvSq<T>
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
        let k = self.coefficient / (r2 + self.eta);
        *ra += k * *cb;
        *rb += k * *ca;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_value() {
        let kernel = InvSq::new(2.0, 0.5);
        let t = Point3::new(0.0, 0.0, 0.0);
        let s = Point3::new(1.0, 1.0, 0.0);
        let mut r = 0.0;
        kernel.accumulate(&t, &s, &3.0, &mut r);
        assert_relative_eq!(r, 2.0 / 2.5 * 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_symmetry() {
        let kernel = InvSq::<f64>::default();
        let a = Point3::new(0.3, 0.1, 0.9);
        let b = Point3::new(0.2, 0.8, 0.4);

        let (mut ab, mut ba) = (0.0, 0.0);
        kernel.accumulate(&a, &b, &1.0, &mut ab);
        kernel.accumulate(&b, &a, &1.0, &mut ba);
        assert_relative_eq!(ab, ba, epsilon = 1e-15);
    }
}
