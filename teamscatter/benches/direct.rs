use criterion::{criterion_group, criterion_main, Criterion};

use teamscatter::helpers::random_system;
use teamscatter::p2p;
use teamscatter::LaplacePotential;

fn benchmark_diagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagonal");
    let kernel = LaplacePotential::<f64>::new();

    for n_points in [1000, 4000] {
        let (sources, charges) = random_system::<f64>(n_points, 0);

        group.bench_function(format!("symmetric, n_points={}", n_points), |b| {
            b.iter(|| {
                let mut results = vec![0f64; n_points];
                p2p::eval_sym_diag(&kernel, &sources, &charges, &mut results);
                results
            })
        });

        group.bench_function(format!("asymmetric, n_points={}", n_points), |b| {
            b.iter(|| {
                let mut results = vec![0f64; n_points];
                p2p::eval_asym(&kernel, &sources, &charges, &sources, &mut results);
                results
            })
        });
    }
    group.finish();
}

fn benchmark_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair");
    let kernel = LaplacePotential::<f64>::new();

    for n_points in [1000, 4000] {
        let (xi, ci) = random_system::<f64>(n_points, 1);
        let (xj, cj) = random_system::<f64>(n_points, 2);

        group.bench_function(format!("symmetric, n_points={}", n_points), |b| {
            b.iter(|| {
                let mut ri = vec![0f64; n_points];
                let mut rj = vec![0f64; n_points];
                p2p::eval_sym_pair(&kernel, &xj, &cj, &mut rj, &xi, &ci, &mut ri);
                (ri, rj)
            })
        });

        group.bench_function(format!("two asymmetric, n_points={}", n_points), |b| {
            b.iter(|| {
                let mut ri = vec![0f64; n_points];
                let mut rj = vec![0f64; n_points];
                p2p::eval_asym(&kernel, &xj, &cj, &xi, &mut ri);
                p2p::eval_asym(&kernel, &xi, &ci, &xj, &mut rj);
                (ri, rj)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_diagonal, benchmark_pair);
criterion_main!(benches);
