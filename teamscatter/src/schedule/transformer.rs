//! Transpose partner indexing for the symmetric team schedule.
//!
//! Pure integer arithmetic, shared by the schedule itself and by the tests
//! that table-verify it.

/// Ceiling division for non-negative operands.
pub(crate) fn div_ceil(a: i32, b: i32) -> i32 {
    (a + b - 1) / b
}

/// Maps a block computed at `(iteration, team, team_rank)` to the
/// `(iteration, rank)` pair naming its transpose partner.
///
/// Over the live iteration range the mapping is an involution: the partner's
/// named iteration and rank designate the mirror image of the same unordered
/// block pair, which is how each off-diagonal pair is evaluated once and its
/// transposed contribution routed back to the owner.
#[derive(Clone, Copy, Debug)]
pub struct IndexTransformer {
    /// The number of process teams in the computation
    num_teams: i32,
    /// The size of the process teams in the computation
    teamsize: i32,
}

impl IndexTransformer {
    /// Constructor
    pub fn new(num_teams: i32, teamsize: i32) -> Self {
        Self {
            num_teams,
            teamsize,
        }
    }

    /// The `(iteration, rank)` of the transpose block for the block computed
    /// at `(iteration, team, team_rank)`.
    pub fn transpose(&self, iteration: i32, team: i32, team_rank: i32) -> (i32, i32) {
        // Column number, and positive distance from the diagonal
        let y = (team + team_rank + iteration * self.teamsize).rem_euclid(self.num_teams);
        let d = (team - y).rem_euclid(self.num_teams);
        (d / self.teamsize, y * self.teamsize + d % self.teamsize)
    }
}

/// Final iteration of the symmetric team schedule,
/// `ceil((num_teams + 1) / (2 teamsize)) - 1`.
pub fn symmetric_horizon(num_teams: i32, teamsize: i32) -> i32 {
    div_ceil(num_teams + 1, 2 * teamsize) - 1
}

/// Final iteration of the non-symmetric team schedule,
/// `ceil(num_teams / teamsize) - 1`.
pub fn team_horizon(num_teams: i32, teamsize: i32) -> i32 {
    div_ceil(num_teams, teamsize) - 1
}

#[cfg(test)]
mod test {
    use super::*;

    // (num_teams, teamsize) grids exercised by the end-to-end scenarios.
    const GRIDS: [(i32, i32); 11] = [
        (2, 1),
        (4, 1),
        (6, 1),
        (8, 1),
        (16, 1),
        (2, 2),
        (4, 2),
        (8, 2),
        (16, 2),
        (4, 4),
        (8, 4),
    ];

    #[test]
    fn test_horizons() {
        assert_eq!(symmetric_horizon(4, 1), 2);
        assert_eq!(symmetric_horizon(8, 2), 2);
        assert_eq!(symmetric_horizon(2, 2), 0);
        assert_eq!(symmetric_horizon(4, 4), 0);

        assert_eq!(team_horizon(4, 1), 3);
        assert_eq!(team_horizon(4, 2), 1);
        assert_eq!(team_horizon(5, 2), 2);
    }

    /// The partner's named (iteration, rank) designates the mirror image of
    /// the computing side's block pair: the source block the partner holds at
    /// its iteration is the computing side's target block, and the partner's
    /// team is the computing side's source block.
    #[test]
    fn test_partner_names_transposed_pair() {
        for &(t, c) in GRIDS.iter() {
            let transformer = IndexTransformer::new(t, c);
            for iteration in 0..=(t / c + 1) {
                for team in 0..t {
                    for team_rank in 0..c {
                        let source = (team + team_rank + iteration * c).rem_euclid(t);
                        let (i_dst, r_dst) = transformer.transpose(iteration, team, team_rank);
                        let (p_team, p_rank) = (r_dst / c, r_dst % c);

                        assert_eq!(p_team, source);
                        assert_eq!((p_team + p_rank + i_dst * c).rem_euclid(t), team);
                    }
                }
            }
        }
    }

    /// Where the block index does not wrap the ring, the mapping is a strict
    /// involution on (iteration, rank).
    #[test]
    fn test_involution() {
        for &(t, c) in GRIDS.iter() {
            let transformer = IndexTransformer::new(t, c);
            for iteration in 0..t {
                for team in 0..t {
                    for team_rank in 0..c {
                        if team_rank + iteration * c >= t {
                            continue;
                        }
                        let (i_dst, r_dst) = transformer.transpose(iteration, team, team_rank);
                        let image = transformer.transpose(i_dst, r_dst / c, r_dst % c);
                        assert_eq!(image, (iteration, team * c + team_rank));
                    }
                }
            }
        }
    }

    /// Drive the full symmetric schedule's indexing on one integer grid and
    /// tally which source blocks end up accumulated per team, including the
    /// transpose exchange. After the team reduction every team must hold
    /// exactly one contribution from every block.
    fn simulate_symmetric(num_teams: i32, teamsize: i32) {
        let transformer = IndexTransformer::new(num_teams, teamsize);
        let last_iter = symmetric_horizon(num_teams, teamsize);
        let n_ranks = (num_teams * teamsize) as usize;

        // Per rank: contributions to the owned target block, by source block.
        let mut tally = vec![vec![0usize; num_teams as usize]; n_ranks];
        // Per rank: transpose contribution awaiting the next exchange, as
        // (destination rank, destination block, source block of contribution).
        let mut pending: Vec<Option<(i32, i32, i32)>> = vec![None; n_ranks];

        // Iteration 0
        for rank in 0..n_ranks as i32 {
            let (team, team_rank) = (rank / teamsize, rank % teamsize);
            let source = (team + team_rank).rem_euclid(num_teams);
            if team_rank == 0 {
                tally[rank as usize][team as usize] += 1;
            } else {
                let (i_dst, r_dst) = transformer.transpose(0, team, team_rank);
                tally[rank as usize][source as usize] += 1;
                if i_dst != last_iter {
                    pending[rank as usize] = Some((r_dst, source, team));
                }
            }
        }

        for curr_iter in 1..=last_iter {
            // Exchange previous iteration's transpose contributions.
            let outgoing = std::mem::replace(&mut pending, vec![None; n_ranks]);
            let mut delivered = vec![false; n_ranks];
            for rank in 0..n_ranks as i32 {
                let (team, team_rank) = (rank / teamsize, rank % teamsize);
                let offset = if team_rank == 0 { 0 } else { 1 };
                let i_src = num_teams / teamsize - (curr_iter - 1) - offset;
                let (_, r_src) = transformer.transpose(i_src, team, team_rank);
                if i_src == last_iter || r_src == rank {
                    continue;
                }

                let (dst, block, source) =
                    outgoing[r_src as usize].expect("receive without matching send");
                assert_eq!(dst, rank);
                assert_eq!(block, team);
                tally[rank as usize][source as usize] += 1;
                delivered[r_src as usize] = true;
            }
            for (sent, received) in outgoing.iter().zip(delivered.iter()) {
                if let Some((dst, _, _)) = sent {
                    assert!(*received, "send to rank {} was never received", dst);
                }
            }

            // Shift, then compute the next block.
            for rank in 0..n_ranks as i32 {
                let (team, team_rank) = (rank / teamsize, rank % teamsize);
                let source = (team + team_rank + curr_iter * teamsize).rem_euclid(num_teams);
                let (i_dst, r_dst) = transformer.transpose(curr_iter, team, team_rank);
                tally[rank as usize][source as usize] += 1;
                if i_dst != last_iter {
                    pending[rank as usize] = Some((r_dst, source, team));
                }
            }
        }

        // Team reduction: team members' tallies are summed.
        for team in 0..num_teams {
            let mut reduced = vec![0usize; num_teams as usize];
            for team_rank in 0..teamsize {
                let rank = (team * teamsize + team_rank) as usize;
                for (acc, count) in reduced.iter_mut().zip(tally[rank].iter()) {
                    *acc += count;
                }
            }
            for (block, count) in reduced.iter().enumerate() {
                assert_eq!(
                    *count, 1,
                    "team {} holds {} contributions from block {} on a {}x{} grid",
                    team, count, block, num_teams, teamsize
                );
            }
        }
    }

    #[test]
    fn test_symmetric_schedule_covers_every_pair() {
        // The trailing transpose of a pending boundary send is only matched on
        // grids where the ring closes evenly; these are the supported shapes.
        for &(t, c) in GRIDS.iter() {
            simulate_symmetric(t, c);
        }
    }

    /// Same tally for the non-symmetric team schedule, which visits every
    /// ordered pair directly.
    fn simulate_team(num_teams: i32, teamsize: i32) {
        let last_iter = team_horizon(num_teams, teamsize);
        let remainder = num_teams % teamsize;

        for team in 0..num_teams {
            let mut reduced = vec![0usize; num_teams as usize];
            for team_rank in 0..teamsize {
                for iteration in 0..=last_iter {
                    if iteration == last_iter && remainder != 0 && team_rank >= remainder {
                        continue;
                    }
                    let source = (team + team_rank + iteration * teamsize).rem_euclid(num_teams);
                    reduced[source as usize] += 1;
                }
            }
            for (block, count) in reduced.iter().enumerate() {
                assert_eq!(
                    *count, 1,
                    "team {} holds {} contributions from block {} on a {}x{} grid",
                    team, count, block, num_teams, teamsize
                );
            }
        }
    }

    #[test]
    fn test_team_schedule_covers_every_pair() {
        let grids = GRIDS
            .iter()
            .copied()
            .chain([(3, 1), (5, 1), (9, 3), (6, 2), (5, 5)]);
        for (t, c) in grids {
            simulate_team(t, c);
        }
    }
}
