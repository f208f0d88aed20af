//! Serial baseline, the reference every distributed schedule is checked
//! against.
use std::iter::repeat_with;

use num::Zero;
use rayon::prelude::*;

use crate::p2p;
use crate::traits::kernel::Kernel;

/// Dense evaluation of the full interaction sum on one process.
pub fn evaluate<K>(
    kernel: &K,
    sources: &[K::Source],
    charges: &[K::Charge],
    targets: &[K::Target],
) -> Vec<K::Result>
where
    K: Kernel,
    K::Result: Zero + Clone,
{
    let mut results = vec![K::Result::zero(); targets.len()];
    p2p::eval_asym_distinct(kernel, sources, charges, targets, &mut results);
    results
}

/// Multi-threaded dense evaluation, parallelised over targets.
pub fn evaluate_mt<K>(
    kernel: &K,
    sources: &[K::Source],
    charges: &[K::Charge],
    targets: &[K::Target],
) -> Vec<K::Result>
where
    K: Kernel,
    K::Source: Sync,
    K::Target: Sync,
    K::Charge: Sync,
    K::Result: Zero + Clone + Send,
{
    let mut results: Vec<K::Result> =
        repeat_with(K::Result::zero).take(targets.len()).collect();

    results
        .par_iter_mut()
        .zip(targets.par_iter())
        .for_each(|(result, target)| {
            for (source, charge) in sources.iter().zip(charges.iter()) {
                kernel.accumulate(target, source, charge, result);
            }
        });

    results
}
