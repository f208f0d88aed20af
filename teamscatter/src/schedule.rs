//! The distributable evaluation schedules.
//!
//! Four schedules of increasing sophistication partition the `N x N`
//! interaction matrix across processes: a serial baseline, a ring scatter, a
//! team scatter over a 2-D process grid, and the symmetric team scatter that
//! exploits kernel symmetry through transpose partner exchanges.
pub mod serial;
pub mod transformer;

#[cfg(feature = "mpi")]
pub mod grid;
#[cfg(feature = "mpi")]
pub mod ring;
#[cfg(feature = "mpi")]
pub mod symmetric;
#[cfg(feature = "mpi")]
pub mod team;
