//! Wall clock profiling of schedule phases.
//!
//! Each schedule phase is timed with the monotonic clock and summed into a
//! [`PhaseTimes`] accumulator carried by the schedule object. Totals can be
//! reduced across the job and divided by the process count to report averages.
use std::fmt;
use std::time::{Duration, Instant};

/// Enumeration of schedule phases for timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Block evaluator calls
    Compute,

    /// Scatter and broadcast of the input blocks
    Split,

    /// Ring rotation of the current source block
    Shift,

    /// Transpose partner exchange
    SendRecv,

    /// Team local reduction
    Reduce,
}

/// All phases, in reporting order.
pub const PHASES: [Phase; 5] = [
    Phase::Compute,
    Phase::Split,
    Phase::Shift,
    Phase::SendRecv,
    Phase::Reduce,
];

impl Phase {
    fn index(&self) -> usize {
        match self {
            Phase::Compute => 0,
            Phase::Split => 1,
            Phase::Shift => 2,
            Phase::SendRecv => 3,
            Phase::Reduce => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compute => write!(f, "Computation"),
            Phase::Split => write!(f, "Split"),
            Phase::Shift => write!(f, "Shift"),
            Phase::SendRecv => write!(f, "SendReceive"),
            Phase::Reduce => write!(f, "Reduce"),
        }
    }
}

/// Accumulated wall clock time per phase on one process.
#[derive(Debug, Default, Clone)]
pub struct PhaseTimes {
    totals: [Duration; 5],
}

impl PhaseTimes {
    /// Constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the time elapsed since `start` to a phase total.
    pub fn accumulate(&mut self, phase: Phase, start: Instant) {
        self.totals[phase.index()] += start.elapsed();
    }

    /// Total accumulated time for a phase.
    pub fn total(&self, phase: Phase) -> Duration {
        self.totals[phase.index()]
    }

    /// Total accumulated time for a phase in seconds.
    pub fn seconds(&self, phase: Phase) -> f64 {
        self.total(phase).as_secs_f64()
    }
}

#[cfg(feature = "mpi")]
mod reduce {
    use super::{PhaseTimes, PHASES};
    use mpi::collective::SystemOperation;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::{Communicator, Root};

    /// Average the per-phase totals over all processes.
    ///
    /// Phase totals are sum-reduced to the master and divided by the process
    /// count; returns `Some` with one average per [`PHASES`] entry on the
    /// master, `None` elsewhere.
    pub fn average_to_master(
        comm: &SimpleCommunicator,
        times: &PhaseTimes,
    ) -> Option<Vec<f64>> {
        let root = comm.process_at_rank(0);
        let local: Vec<f64> = PHASES.iter().map(|&p| times.seconds(p)).collect();

        if comm.rank() == 0 {
            let mut summed = vec![0f64; local.len()];
            root.reduce_into_root(&local[..], &mut summed[..], SystemOperation::sum());
            let size = comm.size() as f64;
            Some(summed.into_iter().map(|t| t / size).collect())
        } else {
            root.reduce_into(&local[..], SystemOperation::sum());
            None
        }
    }
}

#[cfg(feature = "mpi")]
pub use reduce::average_to_master;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accumulate() {
        let mut times = PhaseTimes::new();
        let start = Instant::now();
        times.accumulate(Phase::Compute, start);
        times.accumulate(Phase::Compute, start);

        assert!(times.seconds(Phase::Compute) >= 0.0);
        assert_eq!(times.total(Phase::Shift), Duration::ZERO);
    }
}
