//! Ring scatter schedule, one process per block and no symmetry
//! exploitation.
use std::time::Instant;

use mpi::topology::SimpleCommunicator;
use mpi::traits::{Communicator, Equivalence};
use num::Zero;

use crate::comm::{self, MASTER};
use crate::p2p;
use crate::profile::{Phase, PhaseTimes};
use crate::traits::kernel::SymmetricKernel;
use crate::traits::types::EvalError;

/// Ring scatter over the world channel.
///
/// The master scatters one block of sources and charges per process; blocks
/// then rotate around the ring so that after `P - 1` shifts every process has
/// accumulated the contribution of every block onto its fixed target block.
pub struct RingScatter<K> {
    world: SimpleCommunicator,
    kernel: K,
    times: PhaseTimes,
}

impl<K> RingScatter<K>
where
    K: SymmetricKernel,
    K::Source: Equivalence + Clone + Default,
    K::Charge: Equivalence + Clone + Default,
    K::Result: Equivalence + Zero + Clone,
{
    /// Constructor
    pub fn new(world: &SimpleCommunicator, kernel: K) -> Self {
        Self {
            world: world.duplicate(),
            kernel,
            times: PhaseTimes::new(),
        }
    }

    /// Per-phase wall clock totals of the last evaluation.
    pub fn times(&self) -> &PhaseTimes {
        &self.times
    }

    /// Evaluate the all-pairs sum.
    ///
    /// `sources` and `charges` are read on the master only. Returns the full
    /// result vector on the master, `None` elsewhere. Fails when the number
    /// of processes does not divide the number of points.
    pub fn evaluate(
        &mut self,
        sources: &[K::Source],
        charges: &[K::Charge],
    ) -> Result<Option<Vec<K::Result>>, EvalError> {
        self.times = PhaseTimes::new();
        let size = self.world.size();
        let rank = self.world.rank();

        let mut n = sources.len() as u64;
        comm::broadcast_value(&self.world, MASTER, &mut n);
        let n = n as usize;

        if n % size as usize != 0 {
            return Err(EvalError::InvalidGrid(format!(
                "the number of processes ({}) must divide the number of points ({})",
                size, n
            )));
        }
        let block = n / size as usize;

        // Scatter the blocks to all processes
        let mut xj = vec![K::Source::default(); block];
        let mut cj = vec![K::Charge::default(); block];
        let start = Instant::now();
        comm::scatter_blocks(&self.world, MASTER, sources, &mut xj);
        comm::scatter_blocks(&self.world, MASTER, charges, &mut cj);
        self.times.accumulate(Phase::Split, start);

        let xi = xj.clone();
        let mut ri = vec![K::Result::zero(); block];

        // The resident block interacts with itself symmetrically
        let start = Instant::now();
        p2p::eval_sym_diag(&self.kernel, &xj, &cj, &mut ri);
        self.times.accumulate(Phase::Compute, start);

        for _ in 1..size {
            // Pass the current block along the ring
            let start = Instant::now();
            comm::shift_ring(&self.world, &mut xj, -1);
            comm::shift_ring(&self.world, &mut cj, -1);
            self.times.accumulate(Phase::Shift, start);

            let start = Instant::now();
            p2p::eval_asym(&self.kernel, &xj, &cj, &xi, &mut ri);
            self.times.accumulate(Phase::Compute, start);
        }

        // Collect the per-process accumulators on the master
        let mut result = if rank == MASTER {
            vec![K::Result::zero(); n]
        } else {
            Vec::new()
        };
        let start = Instant::now();
        comm::gather_blocks(&self.world, MASTER, &ri, &mut result);
        self.times.accumulate(Phase::Reduce, start);

        if rank == MASTER {
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }
}
