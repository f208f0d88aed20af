//! Symmetric team scatter schedule.
//!
//! Same 2-D grid as the plain team scatter, but each off-diagonal block pair
//! is evaluated once: the computing side accumulates its own direction into
//! `rI` and the transposed direction into `rJ`, then ships `rJ` to the
//! block's owner, named by the index transformer, on the next iteration.
//! The horizon shrinks to `ceil((num_teams + 1) / (2 teamsize)) - 1`.
use std::ops::AddAssign;
use std::time::Instant;

use itertools::izip;
use mpi::topology::SimpleCommunicator;
use mpi::traits::Equivalence;
use mpi::Rank;
use num::Zero;

use crate::comm::{self, MASTER};
use crate::p2p;
use crate::profile::{Phase, PhaseTimes};
use crate::schedule::grid::ProcessGrid;
use crate::schedule::transformer::{symmetric_horizon, IndexTransformer};
use crate::traits::kernel::SymmetricKernel;
use crate::traits::types::EvalError;

/// Symmetric team scatter over a `num_teams x teamsize` grid.
pub struct SymmetricTeamScatter<K> {
    grid: ProcessGrid,
    transformer: IndexTransformer,
    kernel: K,
    times: PhaseTimes,
}

impl<K> SymmetricTeamScatter<K>
where
    K: SymmetricKernel,
    K::Source: Equivalence + Clone + Default,
    K::Charge: Equivalence + Clone + Default,
    K::Result: Equivalence + Zero + Clone + AddAssign,
{
    /// Build the process grid and validate its shape.
    pub fn new(world: &SimpleCommunicator, kernel: K, teamsize: i32) -> Result<Self, EvalError> {
        let grid = ProcessGrid::new(world, teamsize)?;
        let transformer = IndexTransformer::new(grid.num_teams(), grid.teamsize());
        Ok(Self {
            grid,
            transformer,
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
        let rank = grid.rank();
        let teamsize = grid.teamsize();
        let num_teams = grid.num_teams();
        let team = grid.team();
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

        // The target block and its charges stay fixed from here on
        let xi = xj.clone();
        let ci = cj.clone();
        let mut ri = vec![K::Result::zero(); block];
        let mut rj = vec![K::Result::zero(); block];
        let mut temp_ri = vec![K::Result::zero(); block];

        // Offset each team member's starting point in the ring
        let start = Instant::now();
        comm::shift_ring(grid.row_comm(), &mut xj, team_rank);
        comm::shift_ring(grid.row_comm(), &mut cj, team_rank);
        self.times.accumulate(Phase::Shift, start);

        let last_iter = symmetric_horizon(num_teams, teamsize);

        // Transpose partner the current rJ is owed to, if any
        let mut r_dst: Option<Rank> = None;

        if grid.is_team_leader() {
            // Team leaders sit on the grid diagonal and own the symmetric
            // diagonal block; there is no transpose partner.
            let start = Instant::now();
            p2p::eval_sym_diag(&self.kernel, &xj, &cj, &mut ri);
            self.times.accumulate(Phase::Compute, start);
        } else {
            let (i_dst, dst) = self.transformer.transpose(0, team, team_rank);

            if i_dst != last_iter {
                let start = Instant::now();
                p2p::eval_sym_pair(&self.kernel, &xj, &cj, &mut rj, &xi, &ci, &mut ri);
                self.times.accumulate(Phase::Compute, start);
                r_dst = Some(dst);
            } else {
                // The partner computes this pair on its boundary iteration,
                // keep our direction only and send nothing.
                let start = Instant::now();
                p2p::eval_asym(&self.kernel, &xj, &cj, &xi, &mut ri);
                self.times.accumulate(Phase::Compute, start);
            }
        }

        // Team leaders have no previous symmetric send to match
        let i_prime_offset = if team_rank == 0 { 0 } else { 1 };

        for curr_iter in 1..=last_iter {
            // The iteration whose transpose we would receive now
            let i_src = num_teams / teamsize - (curr_iter - 1) - i_prime_offset;
            let (_, src) = self.transformer.transpose(i_src, team, team_rank);
            let r_src = if i_src == last_iter || src == rank {
                None
            } else {
                Some(src)
            };

            // Ship the previous iteration's rJ, receive our transpose
            let start = Instant::now();
            comm::exchange(grid.world(), &rj, r_dst, &mut temp_ri, r_src);
            self.times.accumulate(Phase::SendRecv, start);

            if r_src.is_some() {
                for (r, t) in izip!(ri.iter_mut(), temp_ri.iter()) {
                    *r += t.clone();
                }
            }

            let start = Instant::now();
            comm::shift_ring(grid.row_comm(), &mut xj, teamsize);
            comm::shift_ring(grid.row_comm(), &mut cj, teamsize);
            self.times.accumulate(Phase::Shift, start);

            let (i_dst, dst) = self.transformer.transpose(curr_iter, team, team_rank);

            if i_dst != last_iter {
                rj.fill(K::Result::zero());

                let start = Instant::now();
                p2p::eval_sym_pair(&self.kernel, &xj, &cj, &mut rj, &xi, &ci, &mut ri);
                self.times.accumulate(Phase::Compute, start);
                r_dst = Some(dst);
            } else {
                let start = Instant::now();
                p2p::eval_asym(&self.kernel, &xj, &cj, &xi, &mut ri);
                self.times.accumulate(Phase::Compute, start);
                r_dst = None;
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
