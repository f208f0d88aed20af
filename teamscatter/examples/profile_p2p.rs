//! Compare the optimized block evaluator forms against their naive
//! counterparts across doubling block sizes.
use std::time::Instant;

use teamscatter::helpers::random_system;
use teamscatter::io::relative_error;
use teamscatter::p2p;
use teamscatter::schedule::serial;
use teamscatter::LaplacePotential;

fn main() {
    let kernel = LaplacePotential::<f64>::new();

    println!("Symmetric Diagonal");
    let mut n = 2;
    while n < 40000 {
        let (sources, charges) = random_system::<f64>(n, n as u64);

        let start = Instant::now();
        let reference = serial::evaluate(&kernel, &sources, &charges, &sources);
        let reference_time = start.elapsed().as_secs_f64();

        let mut results = vec![0.0; n];
        let start = Instant::now();
        p2p::eval_sym_diag(&kernel, &sources, &charges, &mut results);
        let new_time = start.elapsed().as_secs_f64();

        let error = relative_error(&results, &reference);
        println!(
            "{:10}\t{:10e}\t{:10}\t{:10}",
            n, error, reference_time, new_time
        );
        n *= 2;
    }

    println!();
    println!("Symmetric Off-Diagonal");
    let mut n = 2;
    while n < 80000 {
        let (sources, charges) = random_system::<f64>(n, n as u64);
        let (xi, xj) = sources.split_at(n / 2);
        let (ci, cj) = charges.split_at(n / 2);

        let start = Instant::now();
        let mut ri_ref = serial::evaluate(&kernel, xj, cj, xi);
        let mut rj_ref = serial::evaluate(&kernel, xi, ci, xj);
        let reference_time = start.elapsed().as_secs_f64();

        let mut ri = vec![0.0; n / 2];
        let mut rj = vec![0.0; n - n / 2];
        let start = Instant::now();
        p2p::eval_sym_pair(&kernel, xj, cj, &mut rj, xi, ci, &mut ri);
        let new_time = start.elapsed().as_secs_f64();

        ri_ref.append(&mut rj_ref);
        let mut combined = ri;
        combined.append(&mut rj);
        let error = relative_error(&combined, &ri_ref);
        println!(
            "{:10}\t{:10e}\t{:10}\t{:10}",
            n / 2,
            error,
            reference_time,
            new_time
        );
        n *= 2;
    }

    println!();
    println!("Asymmetric off-diagonal");
    let mut n = 1;
    while n < 40000 {
        let (sources, charges) = random_system::<f64>(n, n as u64);
        let targets = random_system::<f64>(n, n as u64 + 1).0;

        let start = Instant::now();
        let reference = serial::evaluate(&kernel, &sources, &charges, &targets);
        let reference_time = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let results = serial::evaluate_mt(&kernel, &sources, &charges, &targets);
        let new_time = start.elapsed().as_secs_f64();

        let error = relative_error(&results, &reference);
        println!(
            "{:10}\t{:10e}\t{:10}\t{:10}",
            n, error, reference_time, new_time
        );
        n *= 2;
    }
}
