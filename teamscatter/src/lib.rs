//! # Team scatter
//!
//! Distributed evaluation of all-pairs kernel sums
//! `r_i = sum_j K(t_i, s_j) c_j` over teams of MPI processes.
//!
//! Notable features of this library are:
//! * A family of parallel schedules partitioning the interaction matrix, up
//!   to a symmetric team scatter that evaluates each unordered block pair
//!   once and routes the transposed contribution to its owner.
//! * A pluggable pairwise kernel boundary with Laplace, inverse square and
//!   non-parametric Bayesian kernels bundled.
//! * Per-phase wall clock profiling averaged across the job.
//!
//! Multi-process schedules are gated behind the `mpi` feature; the block
//! evaluator, kernels, index transformer and serial baseline build without
//! it.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[cfg(feature = "mpi")]
pub mod comm;
pub mod helpers;
pub mod io;
pub mod kernel;
pub mod p2p;
pub mod profile;
pub mod schedule;
pub mod traits;

// Public API
#[doc(inline)]
pub use kernel::{InvSq, LaplacePotential, NonParaBayesian, Point3};
#[doc(inline)]
pub use traits::kernel::{Kernel, SymmetricKernel};
#[doc(inline)]
pub use traits::types::EvalError;

#[cfg(feature = "mpi")]
#[doc(inline)]
pub use schedule::{ring::RingScatter, symmetric::SymmetricTeamScatter, team::TeamScatter};
