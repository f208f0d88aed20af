//! Non-parametric Bayesian covariance kernel.
use std::ops::AddAssign;

use num::Float;

use crate::kernel::point::Point3;
use crate::traits::kernel::{Kernel, SymmetricKernel};

/// Squared exponential covariance,
/// `K(t, s) = sigma^2 exp(-|t - s|^2 / (2 l^2))`.
#[derive(Clone, Copy, Debug)]
pub struct NonParaBayesian<T> {
    /// Marginal standard deviation
    pub sigma: T,
    /// Correlation length scale
    pub length_scale: T,
}

impl<T> NonParaBayesian<T>
where
    T: Float,
{
    /// Constructor
    pub fn new(sigma: T, length_scale: T) -> Self {
        Self {
            sigma,
            length_scale,
        }
    }

    fn value(&self, r2: T) -> T {
        let two = T::one() + T::one();
        self.sigma * self.sigma * (-r2 / (two * self.length_scale * self.length_scale)).exp()
    }
}

impl<T> Kernel for NonParaBayesian<T>
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
        *result += self.value(target.distance_square(source)) * *charge;
    }
}

impl<T> SymmetricKernel for NonParaBayesian<T>
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
        let k = self.value(a.distance_square(b));
        *ra += k * *cb;
        *rb += k * *ca;
    }
}
