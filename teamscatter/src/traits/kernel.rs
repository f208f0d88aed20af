//! The pairwise kernel contract consumed by the block evaluator.
//!
//! Schedules never inspect kernel internals. They move blocks of `Source`,
//! `Charge` and `Result` values between processes and hand them to the block
//! evaluator in [`crate::p2p`], which is the only code that touches a kernel.

/// Interface to a pairwise interaction kernel `K(t, s)`.
///
/// A kernel is consumed exclusively through [`accumulate`](Kernel::accumulate):
/// one evaluation of `K` at a (target, source) pair, scaled by the source's
/// charge and added onto the target's partial result. Accumulation is additive,
/// callers are responsible for zero-initialising result ranges.
pub trait Kernel: Sync {
    /// Source value type, typically a 3-vector of real coordinates.
    type Source;

    /// Target value type. Equal to [`Source`](Kernel::Source) for symmetric kernels.
    type Target;

    /// Charge attached to each source, typically a real scalar.
    type Charge;

    /// Partial result accumulated per target, supports `+=` and zero.
    type Result;

    /// Accumulate `K(target, source) * charge` onto `result`.
    fn accumulate(
        &self,
        target: &Self::Target,
        source: &Self::Source,
        charge: &Self::Charge,
        result: &mut Self::Result,
    );
}

/// Marker-plus-operation trait for kernels with `K(a, b) = K(b, a)`.
///
/// Implementing this trait is how a kernel signals symmetry at build time;
/// the symmetric schedules bound on it and are unavailable otherwise.
pub trait SymmetricKernel: Kernel<Target = <Self as Kernel>::Source> {
    /// Accumulate both directions of an unordered pair with a single kernel
    /// evaluation: `ra += K(a, b) * cb` and `rb += K(b, a) * ca`.
    fn accumulate_pair(
        &self,
        a: &Self::Source,
        ca: &Self::Charge,
        ra: &mut Self::Result,
        b: &Self::Source,
        cb: &Self::Charge,
        rb: &mut Self::Result,
    );
}
