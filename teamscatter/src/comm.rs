//! Thin helpers over the MPI collectives and point to point calls the
//! schedules share.
//!
//! All element counts are typed: buffers travel as `Equivalence` datatypes,
//! never as raw byte counts.
use mpi::point_to_point;
use mpi::topology::SimpleCommunicator;
use mpi::traits::{Communicator, Destination, Equivalence, Root, Source};
use mpi::Rank;

/// Rank of the process that owns the global input and result.
pub const MASTER: Rank = 0;

/// Rotate `buf` around the ring of `comm` by `step` hops: send to
/// `(rank - step) mod size`, receive from `(rank + step) mod size`, in place.
pub fn shift_ring<T: Equivalence>(comm: &SimpleCommunicator, buf: &mut [T], step: Rank) {
    let size = comm.size();
    let rank = comm.rank();
    let dst = (rank - step).rem_euclid(size);
    let src = (rank + step).rem_euclid(size);
    if dst == rank && src == rank {
        return;
    }
    point_to_point::send_receive_replace_into(
        buf,
        &comm.process_at_rank(dst),
        &comm.process_at_rank(src),
    );
}

/// Combined send/receive with optional partners on either side.
///
/// A `None` partner suppresses that half, standing in for `MPI_PROC_NULL` in
/// the C bindings' idiom.
pub fn exchange<T: Equivalence>(
    comm: &SimpleCommunicator,
    sendbuf: &[T],
    dst: Option<Rank>,
    recvbuf: &mut [T],
    src: Option<Rank>,
) {
    match (dst, src) {
        (Some(d), Some(s)) => {
            point_to_point::send_receive_into(
                sendbuf,
                &comm.process_at_rank(d),
                recvbuf,
                &comm.process_at_rank(s),
            );
        }
        (Some(d), None) => {
            comm.process_at_rank(d).send(sendbuf);
        }
        (None, Some(s)) => {
            comm.process_at_rank(s).receive_into(recvbuf);
        }
        (None, None) => {}
    }
}

/// Scatter equally sized blocks of `global` from the root; every process
/// receives its block into `local`.
pub fn scatter_blocks<T: Equivalence>(
    comm: &SimpleCommunicator,
    root: Rank,
    global: &[T],
    local: &mut [T],
) {
    let root_process = comm.process_at_rank(root);
    if comm.rank() == root {
        root_process.scatter_into_root(global, local);
    } else {
        root_process.scatter_into(local);
    }
}

/// Gather equally sized blocks into `global` on the root.
pub fn gather_blocks<T: Equivalence>(
    comm: &SimpleCommunicator,
    root: Rank,
    local: &[T],
    global: &mut [T],
) {
    let root_process = comm.process_at_rank(root);
    if comm.rank() == root {
        root_process.gather_into_root(local, global);
    } else {
        root_process.gather_into(local);
    }
}

/// Element-wise sum reduction of `local` into `reduced` on the root.
pub fn reduce_sum<T: Equivalence>(
    comm: &SimpleCommunicator,
    root: Rank,
    local: &[T],
    reduced: &mut [T],
) {
    use mpi::collective::SystemOperation;
    let root_process = comm.process_at_rank(root);
    if comm.rank() == root {
        root_process.reduce_into_root(local, reduced, SystemOperation::sum());
    } else {
        root_process.reduce_into(local, SystemOperation::sum());
    }
}

/// Broadcast `buf` from the root to every process in `comm`.
pub fn broadcast<T: Equivalence>(comm: &SimpleCommunicator, root: Rank, buf: &mut [T]) {
    comm.process_at_rank(root).broadcast_into(buf);
}

/// Broadcast a single value from the root.
pub fn broadcast_value<T: Equivalence>(comm: &SimpleCommunicator, root: Rank, value: &mut T) {
    comm.process_at_rank(root).broadcast_into(value);
}
