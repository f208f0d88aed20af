//! Readers and writers for the whitespace separated input and result files,
//! and the relative error report used to verify distributed runs.
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use num::Float;

use crate::kernel::point::Point3;

fn parse_scalars<T: Float>(raw: &str) -> io::Result<Vec<T>> {
    raw.split_whitespace()
        .map(|token| {
            let value: f64 = token.parse().map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, format!("bad float: {}", e))
            })?;
            T::from(value).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "value out of range for scalar type")
            })
        })
        .collect()
}

/// Read a whitespace separated sequence of 3-vectors, one record per point.
pub fn read_points<T: Float>(path: impl AsRef<Path>) -> io::Result<Vec<Point3<T>>> {
    let mut raw = String::new();
    File::open(path)?.read_to_string(&mut raw)?;

    let scalars = parse_scalars::<T>(&raw)?;
    if scalars.len() % 3 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "point file does not contain a whole number of 3-vectors",
        ));
    }

    Ok(scalars
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Read a whitespace separated sequence of scalars.
pub fn read_scalars<T: Float>(path: impl AsRef<Path>) -> io::Result<Vec<T>> {
    let mut raw = String::new();
    File::open(path)?.read_to_string(&mut raw)?;
    parse_scalars(&raw)
}

/// Write points one `x y z` record per line.
pub fn write_points<T: Float + Display>(
    path: impl AsRef<Path>,
    points: &[Point3<T>],
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for p in points {
        writeln!(out, "{} {} {}", p.coordinate[0], p.coordinate[1], p.coordinate[2])?;
    }
    out.flush()
}

/// Write scalars one record per line.
pub fn write_scalars<T: Float + Display>(path: impl AsRef<Path>, values: &[T]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in values {
        writeln!(out, "{}", v)?;
    }
    out.flush()
}

/// Path of the cached exact reference for a kernel label, point count and seed,
/// e.g. `data/invsq_n256_s1337.txt`.
pub fn reference_path(label: &str, n: usize, seed: u64) -> PathBuf {
    PathBuf::from(format!("data/{}_n{}_s{}.txt", label, n, seed))
}

/// L2 relative error `|approx - exact| / |exact|`.
pub fn relative_error<T: Float + std::iter::Sum>(approximate: &[T], exact: &[T]) -> T {
    let num: T = approximate
        .iter()
        .zip(exact.iter())
        .map(|(&a, &e)| (a - e) * (a - e))
        .sum();
    let den: T = exact.iter().map(|&e| e * e).sum();
    (num / den).sqrt()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip() {
        let dir = std::env::temp_dir();
        let points_path = dir.join("teamscatter_test_points.txt");
        let charges_path = dir.join("teamscatter_test_charges.txt");

        let points = vec![Point3::new(0.25, 0.5, 0.75), Point3::new(1.0, 2.0, 3.0)];
        let charges = vec![0.125, 4.5];

        write_points(&points_path, &points).unwrap();
        write_scalars(&charges_path, &charges).unwrap();

        assert_eq!(read_points::<f64>(&points_path).unwrap(), points);
        assert_eq!(read_scalars::<f64>(&charges_path).unwrap(), charges);

        std::fs::remove_file(points_path).unwrap();
        std::fs::remove_file(charges_path).unwrap();
    }

    #[test]
    fn test_rejects_ragged_points() {
        let dir = std::env::temp_dir();
        let path = dir.join("teamscatter_test_ragged.txt");
        std::fs::write(&path, "0.0 1.0 2.0 3.0").unwrap();

        assert!(read_points::<f64>(&path).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_reference_path() {
        assert_eq!(
            reference_path("invsq", 256, 1337),
            PathBuf::from("data/invsq_n256_s1337.txt")
        );
    }

    #[test]
    fn test_relative_error() {
        let exact = [3.0, 4.0];
        let approximate = [3.0, 4.5];
        assert_relative_eq!(relative_error(&approximate, &exact), 0.1, epsilon = 1e-15);

        assert_relative_eq!(relative_error(&exact, &exact), 0.0);
    }
}
