//! Serial baseline driver, writes the dense matvec result to `data/phi.txt`.
use std::time::Instant;

use teamscatter::io;
use teamscatter::schedule::serial;
use teamscatter::LaplacePotential;

fn main() {
    let arg: Vec<String> = std::env::args().collect();

    if arg.len() < 3 {
        eprintln!("Usage: {} PHI_FILE SIGMA_FILE", arg[0]);
        std::process::exit(1);
    }

    let sources = match io::read_points::<f64>(&arg[1]) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to read {}: {}", arg[1], e);
            std::process::exit(1);
        }
    };
    let charges = match io::read_scalars::<f64>(&arg[2]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to read {}: {}", arg[2], e);
            std::process::exit(1);
        }
    };

    assert_eq!(sources.len(), charges.len());
    let n = charges.len();
    println!("N = {}", n);

    let kernel = LaplacePotential::new();

    let start = Instant::now();
    let phi = serial::evaluate(&kernel, &sources, &charges, &sources);
    let time = start.elapsed().as_secs_f64();

    println!("Computed in {} seconds", time);
    let checksum: f64 = phi.iter().sum();
    println!("Serial - checksum answer is: {}", checksum);

    std::fs::create_dir_all("data").unwrap();
    io::write_scalars("data/phi.txt", &phi).unwrap();
}
