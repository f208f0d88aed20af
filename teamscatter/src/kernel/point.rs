//! Coordinate value type shared by the bundled kernels.
use num::Float;

/// A point in three dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// Physical coordinate
    pub coordinate: [T; 3],
}

impl<T> Point3<T>
where
    T: Float,
{
    /// Construct from coordinates
    pub fn new(x: T, y: T, z: T) -> Self {
        Self {
            coordinate: [x, y, z],
        }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_square(&self, other: &Self) -> T {
        let dx = self.coordinate[0] - other.coordinate[0];
        let dy = self.coordinate[1] - other.coordinate[1];
        let dz = self.coordinate[2] - other.coordinate[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[cfg(feature = "mpi")]
mod mpi_point {
    use super::Point3;

    use memoffset::offset_of;
    use mpi::{
        datatype::{Equivalence, UncommittedUserDatatype, UserDatatype},
        Address,
    };
    use num::Float;

    unsafe impl<T> Equivalence for Point3<T>
    where
        T: Float + Equivalence,
    {
        type Out = UserDatatype;
        fn equivalent_datatype() -> Self::Out {
            UserDatatype::structured(
                &[1],
                &[offset_of!(Point3<T>, coordinate) as Address],
                &[UncommittedUserDatatype::contiguous(3, &T::equivalent_datatype()).as_ref()],
            )
        }
    }
}
