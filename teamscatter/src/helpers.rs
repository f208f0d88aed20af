//! Helper functions used in testing and by the drivers, specifically seeded
//! random source and charge generators.
use num::Float;
use rand::prelude::*;

use crate::kernel::point::Point3;

/// Sources uniformly sampled in `[0, 1)^3` from a seeded generator.
pub fn points_fixture<T>(n_points: usize, seed: u64) -> Vec<Point3<T>>
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let between = rand::distributions::Uniform::from(T::zero()..T::one());

    (0..n_points)
        .map(|_| {
            Point3::new(
                between.sample(&mut rng),
                between.sample(&mut rng),
                between.sample(&mut rng),
            )
        })
        .collect()
}

/// Charges uniformly sampled in `[0, 1)` from a seeded generator.
pub fn charges_fixture<T>(n_charges: usize, seed: u64) -> Vec<T>
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let between = rand::distributions::Uniform::from(T::zero()..T::one());
    (0..n_charges).map(|_| between.sample(&mut rng)).collect()
}

/// A full source/charge system drawn from a single seeded generator, sources
/// first, matching the order the drivers generate their inputs in.
pub fn random_system<T>(n: usize, seed: u64) -> (Vec<Point3<T>>, Vec<T>)
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let between = rand::distributions::Uniform::from(T::zero()..T::one());

    let sources = (0..n)
        .map(|_| {
            Point3::new(
                between.sample(&mut rng),
                between.sample(&mut rng),
                between.sample(&mut rng),
            )
        })
        .collect();
    let charges = (0..n).map(|_| between.sample(&mut rng)).collect();
    (sources, charges)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fixture_is_deterministic() {
        let a = random_system::<f64>(32, 1337);
        let b = random_system::<f64>(32, 1337);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_fixture_respects_seed() {
        let a = points_fixture::<f64>(8, 1);
        let b = points_fixture::<f64>(8, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixture_range() {
        for p in points_fixture::<f64>(100, 99) {
            for c in p.coordinate {
                assert!((0.0..1.0).contains(&c));
            }
        }
    }
}
