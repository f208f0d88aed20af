//! Team scatter schedule, a 2-D process grid without symmetry exploitation.
use std::time::Instant;

use mpi::topology::SimpleCommunicator;
use mpi::traits::Equivalence;
use num::Zero;

use crate::comm::{self, MASTER};
use crate::p2p;
use crate::profile::{Phase, PhaseTimes};
use crate::schedule::grid::ProcessGrid;
use crate::schedule::transformer::team_horizon;
use crate::traits::kernel::SymmetricKernel;
use crate::traits::types::EvalError;

/// Team scatter over a `num_teams x teamsize` grid.
///
/// Each team shares a target block; its members start the ring at different
/// offsets and sweep disjoint source blocks, so the horizon shrinks to
/// `ceil(num_teams / teamsize) - 1`. Partial results are reduced inside each
/// team before the gather.
pub struct TeamScatter<K> {
    grid: ProcessGrid,
    kernel: K,
    times: PhaseTimes,
}

impl<K> TeamScatter<K>
where
    K: SymmetricKernel,
    K::Source: Equivalence + Clone + Default,
    K::Charge: Equivalence + Clone + Default,
    K::Result: Equivalence + Zero + Clone,
{
    /// Build the process grid and validate its shape.
    pub fn new(world: &SimpleCommunicator, kernel: K, teamsize: i32) -> Result<Self, EvalError> {
        Ok(Self {
            grid: ProcessGrid::new(world, teamsize)?,
            kernel,
            times: PhaseTimes::new(),
        })
    }

    /// The underlying process grid.
    pub fn grid(&self) -> &ProcessGrid {
        &self.grid
    }

    /// Per-phase wall clock totals of the last evaluation.
    pub fn times(&self) -> &PhaseTimes {
        &self.times
    }

    /// Evaluate the all-pairs sum.
    ///
    /// `sources` and `charges` are read on the master only. Returns the full
    /// result vector on the master, `None` elsewhere.
    pub fn evaluate(
        &mut self,
        sources: &[K::Source],
        charges: &[K::Charge],
    ) -> Result<Option<Vec<K::Result>>, EvalError> {
        self.times = PhaseTimes::new();
        let grid = &self.grid;
        let teamsize = grid.teamsize();
        let num_teams = grid.num_teams();
        let team_rank = grid.team_rank();

        let mut n = sources.len() as u64;
        comm::broadcast_value(grid.world(), MASTER, &mut n);
        let n = n as usize;

        if n % grid.size() as usize != 0 {
            return Err(EvalError::InvalidGrid(format!(
                "the number of processes ({}) must divide the number of points ({})",
                grid.size(),
                n
            )));
        }
        let block = grid.block_size(n)?;

        // Scatter one block per team to the team leaders, who broadcast to
        // their team.
        let mut xj = vec![K::Source::default(); block];
        let mut cj = vec![K::Charge::default(); block];
        let start = Instant::now();
        if grid.is_team_leader() {
            comm::scatter_blocks(grid.row_comm(), MASTER, sources, &mut xj);
            comm::scatter_blocks(grid.row_comm(), MASTER, charges, &mut cj);
        }
        comm::broadcast(grid.team_comm(), MASTER, &mut xj);
        comm::broadcast(grid.team_comm(), MASTER, &mut cj);
        self.times.accumulate(Phase::Split, start);

        let xi = xj.clone();
        let mut ri = vec![K::Result::zero(); block];

        // Offset each team member's starting point in the ring
        let start = Instant::now();
        comm::shift_ring(grid.row_comm(), &mut xj, team_rank);
        comm::shift_ring(grid.row_comm(), &mut cj, team_rank);
        self.times.accumulate(Phase::Shift, start);

        let last_iter = team_horizon(num_teams, teamsize);

        let start = Instant::now();
        if grid.is_team_leader() {
            p2p::eval_sym_diag(&self.kernel, &xj, &cj, &mut ri);
        } else {
            p2p::eval_asym(&self.kernel, &xj, &cj, &xi, &mut ri);
        }
        self.times.accumulate(Phase::Compute, start);

        for curr_iter in 1..=last_iter {
            let start = Instant::now();
            comm::shift_ring(grid.row_comm(), &mut xj, teamsize);
            comm::shift_ring(grid.row_comm(), &mut cj, teamsize);
            self.times.accumulate(Phase::Shift, start);

            // On the boundary iteration only the remainder team ranks hold a
            // block that has not been seen by the team yet.
            let remainder = num_teams % teamsize;
            if curr_iter < last_iter || remainder == 0 || team_rank < remainder {
                let start = Instant::now();
                p2p::eval_asym(&self.kernel, &xj, &cj, &xi, &mut ri);
                self.times.accumulate(Phase::Compute, start);
            }
        }

        // Collapse the team's partial results onto its leader
        let mut team_ri = if grid.is_team_leader() {
            vec![K::Result::zero(); block]
        } else {
            Vec::new()
        };
        let start = Instant::now();
        comm::reduce_sum(grid.team_comm(), MASTER, &ri, &mut team_ri);
        self.times.accumulate(Phase::Reduce, start);

        // Gather the team results on the master
        let mut result = if grid.is_master() {
            vec![K::Result::zero(); n]
        } else {
            Vec::new()
        };
        if grid.is_team_leader() {
            let start = Instant::now();
            comm::gather_blocks(grid.row_comm(), MASTER, &team_ri, &mut result);
            self.times.accumulate(Phase::Reduce, start);
        }

        if grid.is_master() {
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }
}
