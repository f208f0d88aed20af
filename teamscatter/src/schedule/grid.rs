//! Process grid construction for the team schedules.
use mpi::topology::{Color, SimpleCommunicator};
use mpi::traits::Communicator;
use mpi::Rank;

use crate::traits::types::EvalError;

/// A 2-D arrangement of `num_teams x teamsize` processes with the two
/// subgroup channels the team schedules communicate over.
///
/// Teams are the columns of the grid; a team's processes eventually all hold
/// the same target block and cooperate over the team channel. Rows group the
/// processes sharing a team rank across teams; source blocks circulate along
/// the row channel.
pub struct ProcessGrid {
    world: SimpleCommunicator,
    team_comm: SimpleCommunicator,
    row_comm: SimpleCommunicator,
    teamsize: Rank,
    num_teams: Rank,
    team: Rank,
    team_rank: Rank,
}

impl ProcessGrid {
    /// Split `world` into a `num_teams x teamsize` grid.
    ///
    /// Fails when the teamsize does not divide the world size, or when
    /// `teamsize^2` exceeds it.
    pub fn new(world: &SimpleCommunicator, teamsize: Rank) -> Result<Self, EvalError> {
        let size = world.size();
        let rank = world.rank();

        if teamsize < 1 {
            return Err(EvalError::InvalidGrid(
                "the teamsize (c) must be positive".to_string(),
            ));
        }
        if size % teamsize != 0 {
            return Err(EvalError::InvalidGrid(format!(
                "the teamsize (c = {}) must divide the total number of processes (p = {})",
                teamsize, size
            )));
        }
        if teamsize * teamsize > size {
            return Err(EvalError::InvalidGrid(format!(
                "the teamsize squared (c^2 = {}) must be less than or equal to the number of processes (p = {})",
                teamsize * teamsize,
                size
            )));
        }

        let num_teams = size / teamsize;
        let team = rank / teamsize;
        let team_rank = rank % teamsize;

        // Keyed by rank, so the member order in both channels follows the
        // world rank: position in the team channel is the team rank, position
        // in the row channel is the team.
        let team_comm = world
            .split_by_color_with_key(Color::with_value(team), rank)
            .ok_or_else(|| EvalError::Failed("failed to split team channel".to_string()))?;
        let row_comm = world
            .split_by_color_with_key(Color::with_value(team_rank), rank)
            .ok_or_else(|| EvalError::Failed("failed to split row channel".to_string()))?;

        Ok(Self {
            world: world.duplicate(),
            team_comm,
            row_comm,
            teamsize,
            num_teams,
            team,
            team_rank,
        })
    }

    /// The world channel the grid was built over.
    pub fn world(&self) -> &SimpleCommunicator {
        &self.world
    }

    /// Channel shared by the processes of this process's team.
    pub fn team_comm(&self) -> &SimpleCommunicator {
        &self.team_comm
    }

    /// Channel shared by the processes with this process's team rank.
    pub fn row_comm(&self) -> &SimpleCommunicator {
        &self.row_comm
    }

    /// World rank
    pub fn rank(&self) -> Rank {
        self.world.rank()
    }

    /// World size
    pub fn size(&self) -> Rank {
        self.world.size()
    }

    /// Number of teams (columns) in the grid
    pub fn num_teams(&self) -> Rank {
        self.num_teams
    }

    /// Processes per team
    pub fn teamsize(&self) -> Rank {
        self.teamsize
    }

    /// This process's team
    pub fn team(&self) -> Rank {
        self.team
    }

    /// This process's rank within its team
    pub fn team_rank(&self) -> Rank {
        self.team_rank
    }

    /// Whether this process is the global master.
    pub fn is_master(&self) -> bool {
        self.world.rank() == crate::comm::MASTER
    }

    /// Whether this process leads its team.
    pub fn is_team_leader(&self) -> bool {
        self.team_rank == 0
    }

    /// Block length for a problem of `n` points, `n / num_teams`.
    ///
    /// Fails unless the number of teams divides `n`.
    pub fn block_size(&self, n: usize) -> Result<usize, EvalError> {
        let num_teams = self.num_teams as usize;
        if n % num_teams != 0 {
            return Err(EvalError::InvalidGrid(format!(
                "the number of teams ({}) must divide the number of points ({})",
                num_teams, n
            )));
        }
        Ok(n / num_teams)
    }
}
