//! Dense block-to-block evaluation of the kernel weighted sum.
//!
//! The four forms below are the only way schedules touch a kernel. All of
//! them accumulate additively into the result ranges they are given, callers
//! zero-initialise. Accumulation order is deterministic for a given block
//! ordering.
use itertools::izip;

use crate::traits::kernel::{Kernel, SymmetricKernel};

/// Symmetric diagonal block.
///
/// Every unordered pair `(i, j)` with `i < j` inside the block is evaluated
/// once and accumulated in both directions; the diagonal `i = i` contributes
/// once.
pub fn eval_sym_diag<K>(
    kernel: &K,
    sources: &[K::Source],
    charges: &[K::Charge],
    results: &mut [K::Result],
) where
    K: SymmetricKernel,
{
    let n = sources.len();
    for i in 0..n {
        let (head, tail) = results.split_at_mut(i + 1);
        let ri = &mut head[i];

        kernel.accumulate(&sources[i], &sources[i], &charges[i], ri);

        for (xj, cj, rj) in izip!(&sources[i + 1..], &charges[i + 1..], tail) {
            kernel.accumulate_pair(&sources[i], &charges[i], ri, xj, cj, rj);
        }
    }
}

/// Symmetric off-diagonal block pair.
///
/// For every `(i, j)` across the two blocks, one kernel evaluation feeds both
/// `ri[i] += K * cj[j]` and `rj[j] += K * ci[i]`.
pub fn eval_sym_pair<K>(
    kernel: &K,
    xj: &[K::Source],
    cj: &[K::Charge],
    rj: &mut [K::Result],
    xi: &[K::Source],
    ci: &[K::Charge],
    ri: &mut [K::Result],
) where
    K: SymmetricKernel,
{
    for (a, ca, ra) in izip!(xi, ci, ri.iter_mut()) {
        for (b, cb, rb) in izip!(xj, cj, rj.iter_mut()) {
            kernel.accumulate_pair(a, ca, ra, b, cb, rb);
        }
    }
}

/// Asymmetric off-diagonal block, targets share the source type.
///
/// Accumulates only into `results`; used when the partner block's
/// contribution is not wanted.
pub fn eval_asym<K>(
    kernel: &K,
    sources: &[K::Source],
    charges: &[K::Charge],
    targets: &[K::Source],
    results: &mut [K::Result],
) where
    K: SymmetricKernel,
{
    eval_asym_distinct(kernel, sources, charges, targets, results)
}

/// Asymmetric block with a distinct target set.
pub fn eval_asym_distinct<K>(
    kernel: &K,
    sources: &[K::Source],
    charges: &[K::Charge],
    targets: &[K::Target],
    results: &mut [K::Result],
) where
    K: Kernel,
{
    for (t, r) in izip!(targets, results.iter_mut()) {
        for (s, c) in izip!(sources, charges) {
            kernel.accumulate(t, s, c, r);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::helpers::random_system;
    use crate::kernel::InvSq;
    use approx::assert_relative_eq;

    #[test]
    fn test_sym_diag_matches_asym() {
        let kernel = InvSq::<f64>::default();
        let (sources, charges) = random_system(17, 42);

        let mut sym = vec![0.0; 17];
        eval_sym_diag(&kernel, &sources, &charges, &mut sym);

        let mut asym = vec![0.0; 17];
        eval_asym(&kernel, &sources, &charges, &sources, &mut asym);

        for (a, b) in sym.iter().zip(asym.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_sym_pair_matches_two_asym() {
        let kernel = InvSq::<f64>::default();
        let (xi, ci) = random_system(11, 7);
        let (xj, cj) = random_system(13, 8);

        let mut ri = vec![0.0; 11];
        let mut rj = vec![0.0; 13];
        eval_sym_pair(&kernel, &xj, &cj, &mut rj, &xi, &ci, &mut ri);

        let mut ri_ref = vec![0.0; 11];
        let mut rj_ref = vec![0.0; 13];
        eval_asym(&kernel, &xj, &cj, &xi, &mut ri_ref);
        eval_asym(&kernel, &xi, &ci, &xj, &mut rj_ref);

        for (a, b) in ri.iter().zip(ri_ref.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
        for (a, b) in rj.iter().zip(rj_ref.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_accumulation_is_additive() {
        let kernel = InvSq::<f64>::default();
        let (sources, charges) = random_system(5, 3);

        let mut once = vec![0.0; 5];
        eval_sym_diag(&kernel, &sources, &charges, &mut once);

        let mut twice = vec![0.0; 5];
        eval_sym_diag(&kernel, &sources, &charges, &mut twice);
        eval_sym_diag(&kernel, &sources, &charges, &mut twice);

        for (a, b) in once.iter().zip(twice.iter()) {
            assert_relative_eq!(2.0 * a, *b, max_relative = 1e-12);
        }
    }
}
